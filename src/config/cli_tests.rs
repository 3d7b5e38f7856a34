//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["scan-selector"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

mod parsing {
    use super::*;

    #[test]
    fn no_arguments_defaults_to_watch() {
        let cli = cli(&[]);

        assert!(cli.command.is_none());
        assert_eq!(cli.command(), Command::Watch);
        assert!(!cli.verbose);
        assert!(!cli.no_auto_refresh);
    }

    #[test]
    fn parse_path_options() {
        let cli = cli(&[
            "--remote",
            "/mnt/share/presets.ini",
            "--cache-file",
            "/var/cache/presets.ini",
            "--app-data-dir",
            "/home/me/.config",
            "--local-cache-dir",
            "/home/me/.cache",
            "--temp-dir",
            "/tmp",
        ]);

        assert_eq!(cli.remote, Some(PathBuf::from("/mnt/share/presets.ini")));
        assert_eq!(cli.cache_file, Some(PathBuf::from("/var/cache/presets.ini")));
        assert_eq!(cli.app_data_dir, Some(PathBuf::from("/home/me/.config")));
        assert_eq!(cli.local_cache_dir, Some(PathBuf::from("/home/me/.cache")));
        assert_eq!(cli.temp_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn parse_watch_options() {
        let cli = cli(&["--poll-interval", "5", "--no-auto-refresh", "-v"]);

        assert_eq!(cli.poll_interval, Some(5));
        assert!(cli.no_auto_refresh);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_short_flag() {
        let cli = cli(&["-c", "scan-selector.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("scan-selector.toml")));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = cli(&["show", "--remote", "presets.ini", "--default-address", "10.1.1.1"]);

        assert_eq!(cli.command(), Command::Show { json: false });
        assert_eq!(cli.remote, Some(PathBuf::from("presets.ini")));
        assert_eq!(cli.default_address.as_deref(), Some("10.1.1.1"));
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn init_uses_default_output() {
        let cli = cli(&["init"]);

        assert_eq!(
            cli.command(),
            Command::Init {
                output: PathBuf::from("scan-selector.toml")
            }
        );
    }

    #[test]
    fn init_with_output() {
        let cli = cli(&["init", "-o", "custom.toml"]);
        assert_eq!(
            cli.command,
            Some(Command::Init {
                output: PathBuf::from("custom.toml")
            })
        );
    }

    #[test]
    fn show_and_presets_accept_json() {
        assert_eq!(cli(&["show", "--json"]).command(), Command::Show { json: true });
        assert_eq!(
            cli(&["presets", "--json"]).command(),
            Command::Presets { json: true }
        );
        assert_eq!(cli(&["presets"]).command(), Command::Presets { json: false });
    }

    #[test]
    fn set_takes_address() {
        assert_eq!(
            cli(&["set", "192.168.1.50"]).command(),
            Command::Set {
                address: "192.168.1.50".to_string()
            }
        );
    }

    #[test]
    fn apply_takes_name_with_spaces() {
        let cli = cli(&["apply", "Accounting 2nd floor"]);
        assert_eq!(
            cli.command(),
            Command::Apply {
                name: "Accounting 2nd floor".to_string()
            }
        );
    }

    #[test]
    fn explicit_watch() {
        assert_eq!(cli(&["watch"]).command, Some(Command::Watch));
    }
}

mod errors {
    use super::*;

    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        use clap::Parser;
        let mut full_args = vec!["scan-selector"];
        full_args.extend(args);
        Cli::try_parse_from(full_args)
    }

    #[test]
    fn set_requires_address() {
        assert!(try_parse(&["set"]).is_err());
    }

    #[test]
    fn poll_interval_must_be_number() {
        assert!(try_parse(&["--poll-interval", "soon"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_error() {
        assert!(try_parse(&["frobnicate"]).is_err());
    }
}
