//! `index` command: rent indexation adjustments

pub mod handler;

use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::OutputFormat;

pub use handler::handle_index_command;

#[derive(Debug, Subcommand)]
pub enum IndexCommands {
    /// Compute the adjustment for one payment under its contract
    Compute(ComputeArgs),
    /// Compute adjustments for a list of payment/contract pairs
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub struct ComputeArgs {
    /// Contract JSON file
    #[arg(long)]
    pub contract: PathBuf,

    /// Payment JSON file
    #[arg(long)]
    pub payment: PathBuf,

    /// Read Base Parameters from this JSON file instead of the API
    #[arg(long)]
    pub parameters: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON file holding `[{ "payment": {...}, "contract": {...} }, ...]`
    #[arg(long)]
    pub input: PathBuf,

    /// Read Base Parameters from this JSON file instead of the API
    #[arg(long)]
    pub parameters: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
