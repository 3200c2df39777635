//! `params` command: inspect Base Parameters

pub mod handler;

use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::OutputFormat;

pub use handler::handle_params_command;

#[derive(Debug, Subcommand)]
pub enum ParamsCommands {
    /// Show the active Base Parameters record
    Show(ParamsArgs),
    /// List every Base Parameters record
    List(ParamsArgs),
}

#[derive(Debug, Args)]
pub struct ParamsArgs {
    /// Read Base Parameters from this JSON file instead of the API
    #[arg(long)]
    pub parameters: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
