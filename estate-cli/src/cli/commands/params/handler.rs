//! Params command handler

use anyhow::{Context, Result};
use colored::*;

use super::ParamsCommands;
use crate::api::BaseParameters;
use crate::cli::commands::{OutputFormat, format_json, parameters_source};
use crate::config::Config;

pub async fn handle_params_command(command: ParamsCommands, config: &Config) -> Result<()> {
    match command {
        ParamsCommands::Show(args) => {
            let source = parameters_source(config, args.parameters.as_ref())?;
            let active = source
                .fetch_active()
                .await
                .context("Failed to fetch active Base Parameters")?;

            match args.format {
                OutputFormat::Text => print_record(&active),
                format => println!("{}", format_json(&active, format)?),
            }
        }
        ParamsCommands::List(args) => {
            let source = parameters_source(config, args.parameters.as_ref())?;
            let records = source
                .list()
                .await
                .context("Failed to list Base Parameters")?;

            match args.format {
                OutputFormat::Text => {
                    if records.is_empty() {
                        println!("{}", "No Base Parameters records".dimmed());
                    }
                    for (i, record) in records.iter().enumerate() {
                        if i > 0 {
                            println!();
                        }
                        print_record(record);
                    }
                }
                format => println!("{}", format_json(&records, format)?),
            }
        }
    }

    Ok(())
}

fn print_record(record: &BaseParameters) {
    let id = record.id.as_deref().unwrap_or("<unnamed>");
    if record.active {
        println!("{} {}", id.bold(), "(active)".bright_green());
    } else {
        println!("{}", id.bold());
    }

    let show = |value: Option<rust_decimal::Decimal>| {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".dimmed().to_string())
    };
    println!("  {:<24} {}", "Consumer price index:", show(record.consumer_price_index.value));
    println!("  {:<24} {}", "USD rate:", show(record.currency_rates.usd));
}
