//! Command-line interface

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use commands::entities::{EntitiesArgs, handle_entities_command};
use commands::index::{IndexCommands, handle_index_command};
use commands::params::{ParamsCommands, handle_params_command};

#[derive(Debug, Parser)]
#[command(name = "estate-cli", version, about = "Rent indexation and entity relationship tooling for property management data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to <config dir>/estate-cli/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rent indexation adjustments
    #[command(subcommand)]
    Index(IndexCommands),
    /// Base Parameters (index values and currency rates)
    #[command(subcommand)]
    Params(ParamsCommands),
    /// Entity relationship model
    Entities(EntitiesArgs),
}

impl Cli {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Dispatch a parsed command
pub async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Index(cmd) => handle_index_command(cmd, config).await,
        Commands::Params(cmd) => handle_params_command(cmd, config).await,
        Commands::Entities(args) => handle_entities_command(args, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::OutputFormat;
    use commands::entities::EntitiesCommands;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_index_compute() {
        let cli = Cli::try_parse_from([
            "estate-cli",
            "index",
            "compute",
            "--contract",
            "contract.json",
            "--payment",
            "payment.json",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), "debug");
        match cli.command {
            Commands::Index(IndexCommands::Compute(args)) => {
                assert_eq!(args.contract, PathBuf::from("contract.json"));
                assert!(args.parameters.is_none());
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_entities_related() {
        let cli = Cli::try_parse_from(["estate-cli", "entities", "related", "maintenance", "supplier"])
            .unwrap();

        assert_eq!(cli.log_level(), "warn");
        match cli.command {
            Commands::Entities(args) => {
                assert_eq!(args.format, OutputFormat::Text);
                assert!(matches!(
                    args.command,
                    EntitiesCommands::Related { ref source, ref target }
                        if source == "maintenance" && target == "supplier"
                ));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_params_list_compact() {
        let cli = Cli::try_parse_from([
            "estate-cli",
            "params",
            "list",
            "--parameters",
            "params.json",
            "--format",
            "json-compact",
        ])
        .unwrap();

        match cli.command {
            Commands::Params(ParamsCommands::List(args)) => {
                assert_eq!(args.parameters, Some(PathBuf::from("params.json")));
                assert_eq!(args.format, OutputFormat::JsonCompact);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["estate-cli", "params", "show", "--json"]).is_err());
    }

    #[test]
    fn test_compute_requires_inputs() {
        assert!(Cli::try_parse_from(["estate-cli", "index", "compute", "--payment", "p.json"]).is_err());
    }

    #[tokio::test]
    async fn test_run_entities_command() {
        let cli = Cli::try_parse_from(["estate-cli", "entities", "inherited", "contract"]).unwrap();
        run(cli.command, &Config::default()).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_unknown_entity_fails() {
        let cli = Cli::try_parse_from(["estate-cli", "entities", "show", "spaceship"]).unwrap();
        assert!(run(cli.command, &Config::default()).await.is_err());
    }
}
