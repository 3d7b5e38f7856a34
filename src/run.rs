//! Application execution logic.
//!
//! This module contains the one-shot commands and the watch loop that keeps
//! presets current while accepting console commands.

use std::fmt::Write as _;
use std::io;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

use scan_selector::config::{Command, ValidatedConfig};
use scan_selector::diagnostics::ActivityLog;
use scan_selector::presets::{
    PresetCache, PresetEntry, PresetRepository, PresetSnapshot, PresetSource,
};
use scan_selector::scanner::ScannerConfigStore;
use scan_selector::selector::{ActionError, ConfigStatus, ScanSelector};
use scan_selector::watch::{ChangePoller, FileProbe, PollerHandle, ReloadRequest, reload_channel};

use crate::console::{self, ConsoleCommand};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A user action was rejected.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Failed to render JSON output.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read console input.
    #[error("Failed to read console input: {0}")]
    Console(#[source] io::Error),
}

/// What the console loop does after a command.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Text(String),
    Quit,
}

/// JSON shape of the `presets` command.
#[derive(Serialize)]
struct PresetListing<'a> {
    source: PresetSource,
    presets: Vec<&'a PresetEntry>,
}

/// Builds the selector from validated settings.
fn open_selector(config: &ValidatedConfig, log: ActivityLog) -> ScanSelector {
    let store = ScannerConfigStore::new(
        config.locations.clone(),
        config.default_address.clone(),
        log.clone(),
    );
    let cache = PresetCache::new(config.cache_file.clone(), log.clone());
    let repository = PresetRepository::new(config.remote_presets.clone(), cache, log.clone());
    ScanSelector::open(store, repository, log)
}

/// Runs a one-shot command and returns the text to print.
///
/// `Init` and `Watch` are dispatched by the entry point and produce no
/// output here.
///
/// # Errors
///
/// Returns an error if the action is rejected or JSON cannot be rendered.
pub fn execute_once(config: &ValidatedConfig, command: &Command) -> Result<String, RunError> {
    let selector = open_selector(config, ActivityLog::new());

    let output = match command {
        Command::Show { json: false } => render_status(&selector.status()),
        Command::Show { json: true } => serde_json::to_string_pretty(&selector.status())?,
        Command::Presets { json: false } => render_presets(selector.presets()),
        Command::Presets { json: true } => {
            let snapshot = selector.presets();
            serde_json::to_string_pretty(&PresetListing {
                source: snapshot.source(),
                presets: snapshot.sorted(),
            })?
        }
        Command::Set { address } => {
            let saved = selector.save_address(address)?;
            format!("Scanner address set to {saved}")
        }
        Command::Apply { name } => {
            let saved = selector.apply_preset(name)?;
            format!("Applied preset '{name}': scanner address set to {saved}")
        }
        Command::Init { .. } | Command::Watch => String::new(),
    };

    Ok(output)
}

/// Runs the interactive watch loop.
///
/// This function:
/// 1. Resolves the scanner configuration and loads presets
/// 2. Starts the change poller on a background task
/// 3. Handles reload requests and console commands on this task until
///    `quit` or a shutdown signal (Ctrl+C)
///
/// # Errors
///
/// Returns an error if console input cannot be read.
///
/// Excluded from coverage - requires an interactive console and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute_watch(config: ValidatedConfig) -> Result<(), RunError> {
    let log = ActivityLog::new();
    let mut selector = open_selector(&config, log.clone());

    println!("{}", render_status(&selector.status()));
    println!("{}", render_presets(selector.presets()));
    println!("Type 'help' for commands.");

    let (tx, mut rx) = reload_channel();
    let poller = ChangePoller::new(FileProbe::new(&config.remote_presets), config.poll_interval)
        .with_auto_refresh(config.auto_refresh)
        .with_log(log)
        .spawn(tx);

    tracing::info!(
        "Watching {} every {}s (auto-refresh {})",
        config.remote_presets.display(),
        config.poll_interval.as_secs(),
        on_off(poller.auto_refresh())
    );

    let result = console_loop(&mut selector, &poller, &mut rx).await;
    poller.stop();
    result
}

#[cfg(not(tarpaulin_include))]
async fn console_loop(
    selector: &mut ScanSelector,
    poller: &PollerHandle,
    requests: &mut tokio::sync::mpsc::Receiver<ReloadRequest>,
) -> Result<(), RunError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut console_open = true;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }
            Some(_) = requests.recv() => {
                println!("{}", handle_reload_request(selector));
            }
            line = lines.next_line(), if console_open => {
                let Some(line) = line.map_err(RunError::Console)? else {
                    tracing::debug!("Console input closed, watching until shutdown");
                    console_open = false;
                    continue;
                };
                match handle_line(selector, poller, &line) {
                    Some(Reply::Text(text)) => println!("{text}"),
                    Some(Reply::Quit) => return Ok(()),
                    None => {}
                }
            }
        }
    }
}

/// Reloads presets after the shared file changed.
fn handle_reload_request(selector: &mut ScanSelector) -> String {
    let snapshot = selector.reload_presets();
    format!("Preset source changed.\n{}", render_presets(snapshot))
}

/// Parses and runs one console line. Returns `None` for blank input.
fn handle_line(selector: &mut ScanSelector, poller: &PollerHandle, line: &str) -> Option<Reply> {
    match console::parse(line) {
        Ok(Some(command)) => Some(respond(selector, poller, command)),
        Ok(None) => None,
        Err(e) => Some(Reply::Text(e.to_string())),
    }
}

fn respond(selector: &mut ScanSelector, poller: &PollerHandle, command: ConsoleCommand) -> Reply {
    let text = match command {
        ConsoleCommand::Show => render_status(&selector.status()),
        ConsoleCommand::List => render_presets(selector.presets()),
        ConsoleCommand::Apply(name) => match selector.apply_preset(&name) {
            Ok(saved) => format!("Applied preset '{name}': scanner address set to {saved}"),
            Err(e) => render_action_error(&e),
        },
        ConsoleCommand::Set(address) => match selector.save_address(&address) {
            Ok(saved) => format!("Scanner address set to {saved}"),
            Err(e) => render_action_error(&e),
        },
        ConsoleCommand::Reload => render_presets(selector.reload_presets()),
        ConsoleCommand::Auto(None) => {
            format!("Auto-refresh is {}", on_off(poller.auto_refresh()))
        }
        ConsoleCommand::Auto(Some(enabled)) => {
            poller.set_auto_refresh(enabled);
            selector
                .log()
                .info(format!("Auto-refresh turned {}", on_off(enabled)));
            format!("Auto-refresh is {}", on_off(enabled))
        }
        ConsoleCommand::Log(count) => render_log(selector.log(), count),
        ConsoleCommand::Help => console::HELP.to_string(),
        ConsoleCommand::Quit => return Reply::Quit,
    };
    Reply::Text(text)
}

/// Renders a failed action, with a hint when the user can correct it.
fn render_action_error(error: &ActionError) -> String {
    match error {
        ActionError::Config(e) if e.is_validation() => {
            format!("Error: {e}. Nothing was saved.")
        }
        ActionError::Config(e) if e.is_permission_denied() => {
            format!("Error: {e}. Check that the file is not read-only and you may write to it.")
        }
        other => format!("Error: {other}"),
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Renders the configuration summary.
fn render_status(status: &ConfigStatus) -> String {
    let mut out = String::new();

    match (&status.path, status.tier) {
        (Some(path), Some(tier)) => {
            let _ = writeln!(out, "Configuration: {} ({tier})", path.display());
        }
        _ => out.push_str("Configuration: unavailable (read-only)\n"),
    }

    let address = if status.address.is_empty() {
        "(not set)"
    } else {
        status.address.as_str()
    };
    let _ = write!(out, "Scanner address: {address}");

    if status.degraded && !status.read_only {
        out.push_str(
            "\nWarning: not the driver's configuration location, the scanner will not see changes",
        );
    }

    out
}

/// Renders presets alphabetically with aligned addresses.
fn render_presets(snapshot: &PresetSnapshot) -> String {
    if snapshot.is_empty() {
        return "No presets available".to_string();
    }

    let sorted = snapshot.sorted();
    let width = sorted
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("Presets ({}):", snapshot.source());
    for entry in sorted {
        let _ = write!(out, "\n  {:<width$}  {}", entry.name, entry.address);
    }
    out
}

fn render_log(log: &ActivityLog, count: usize) -> String {
    let entries = log.recent(count);
    if entries.is_empty() {
        return "No activity yet".to_string();
    }
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
