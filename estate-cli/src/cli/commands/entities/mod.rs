//! `entities` command: query the entity relationship model

pub mod handler;

use clap::{Args, Subcommand};

use super::OutputFormat;

pub use handler::handle_entities_command;

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    #[command(subcommand)]
    pub command: EntitiesCommands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum EntitiesCommands {
    /// List every entity kind
    List,
    /// Show the edges and attributes of one entity kind
    Show {
        kind: String,
    },
    /// Check whether SOURCE has an edge to TARGET
    Related {
        source: String,
        target: String,
    },
    /// Attributes KIND inherits from its ancestors
    Inherited {
        kind: String,
    },
}
