//! Command-line interface definitions.
//!
//! Defines the CLI structure for fuelwatch using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fuel price threshold alerts
#[derive(Parser, Debug)]
#[command(name = "fuelwatch")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll prices and deliver alerts until interrupted
    Run(ConfigPathArg),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Fetch the current price snapshot once and print it
    Prices(ConfigPathArg),
}

/// Subcommands for `fuelwatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_config_path() {
        let cli = Cli::try_parse_from(["fuelwatch", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => assert_eq!(args.config, PathBuf::from("config.toml")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn check_config_accepts_path() {
        let cli =
            Cli::try_parse_from(["fuelwatch", "--json", "check", "config", "-c", "alt.toml"])
                .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Check(CheckCommand::Config(args)) => {
                assert_eq!(args.config, PathBuf::from("alt.toml"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
