//! Console command parsing for the watch loop.

use thiserror::Error;

/// Number of log entries shown by `log` without an argument.
pub const DEFAULT_LOG_LINES: usize = 20;

/// Help text listing every console command.
pub const HELP: &str = "\
Commands:
  show              Show the scanner configuration and address
  list              List presets
  apply <name>      Save the address of a preset
  set <address>     Save a scanner address
  reload            Reload presets now
  auto [on|off]     Show or change automatic preset reloading
  log [n]           Show the last n activity log entries
  help              Show this help
  quit              Exit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Show,
    List,
    Apply(String),
    Set(String),
    Reload,
    /// `None` reports the current setting.
    Auto(Option<bool>),
    Log(usize),
    Help,
    Quit,
}

/// Error type for console input that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("Unknown command '{0}', type 'help' for a list of commands")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid argument '{value}' for '{command}': {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Parses one line of console input.
///
/// Returns `Ok(None)` for blank lines. Command words ignore case; preset
/// names and addresses are the rest of the line, trimmed.
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_lowercase().as_str() {
        "show" => ConsoleCommand::Show,
        "list" => ConsoleCommand::List,
        "apply" => ConsoleCommand::Apply(required(rest, "apply", "a preset name")?),
        "set" => ConsoleCommand::Set(required(rest, "set", "an address")?),
        "reload" => ConsoleCommand::Reload,
        "auto" => ConsoleCommand::Auto(parse_switch(rest)?),
        "log" => ConsoleCommand::Log(parse_count(rest)?),
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => return Err(ConsoleError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn required(
    rest: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ConsoleError> {
    if rest.is_empty() {
        return Err(ConsoleError::MissingArgument { command, argument });
    }
    Ok(rest.to_string())
}

fn parse_switch(rest: &str) -> Result<Option<bool>, ConsoleError> {
    match rest.to_lowercase().as_str() {
        "" => Ok(None),
        "on" | "true" | "1" => Ok(Some(true)),
        "off" | "false" | "0" => Ok(Some(false)),
        _ => Err(ConsoleError::InvalidArgument {
            command: "auto",
            value: rest.to_string(),
            expected: "expected on or off",
        }),
    }
}

fn parse_count(rest: &str) -> Result<usize, ConsoleError> {
    if rest.is_empty() {
        return Ok(DEFAULT_LOG_LINES);
    }
    match rest.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ConsoleError::InvalidArgument {
            command: "log",
            value: rest.to_string(),
            expected: "expected a positive number",
        }),
    }
}
