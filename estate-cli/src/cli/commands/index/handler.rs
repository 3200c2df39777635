//! Index command handler

use anyhow::Result;
use colored::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{BatchArgs, ComputeArgs, IndexCommands};
use crate::cli::commands::{OutputFormat, format_json, parameters_source, read_json_file};
use crate::config::Config;
use crate::indexation::{
    BatchAdjustments, Contract, IndexationKind, IndexationService, Payment, PaymentWithContract,
};

pub async fn handle_index_command(command: IndexCommands, config: &Config) -> Result<()> {
    match command {
        IndexCommands::Compute(args) => handle_compute(args, config).await,
        IndexCommands::Batch(args) => handle_batch(args, config).await,
    }
}

#[derive(Debug, Serialize)]
struct ComputeOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_id: Option<&'a str>,
    kind: IndexationKind,
    amount: Decimal,
    adjustment: Decimal,
}

async fn handle_compute(args: ComputeArgs, config: &Config) -> Result<()> {
    let contract: Contract = read_json_file(&args.contract)?;
    let payment: Payment = read_json_file(&args.payment)?;

    let kind = contract.indexation_kind();
    let service = IndexationService::new(parameters_source(config, args.parameters.as_ref())?);
    let adjustment = service
        .compute_index_adjustment(Some(&payment), Some(&contract))
        .await;

    let output = ComputeOutput {
        payment_id: payment.id.as_deref(),
        contract_id: contract.id.as_deref(),
        kind,
        amount: payment.amount,
        adjustment,
    };

    match args.format {
        OutputFormat::Text => {
            println!("{:<12} {}", "Indexation:".bold(), kind.label());
            println!("{:<12} {}", "Amount:".bold(), output.amount);
            println!(
                "{:<12} {}",
                "Adjustment:".bold(),
                format_amount(adjustment)
            );
        }
        format => println!("{}", format_json(&output, format)?),
    }

    Ok(())
}

async fn handle_batch(args: BatchArgs, config: &Config) -> Result<()> {
    let items: Vec<PaymentWithContract> = read_json_file(&args.input)?;
    log::info!("Computing index adjustments for {} payments", items.len());

    let service = IndexationService::new(parameters_source(config, args.parameters.as_ref())?);
    let batch = service.compute_batch(&items).await;

    match args.format {
        OutputFormat::Text => print_batch(&batch),
        format => println!("{}", format_json(&batch, format)?),
    }

    Ok(())
}

fn print_batch(batch: &BatchAdjustments) {
    println!(
        "{:<16} {:<16} {:<22} {:>12}",
        "Payment".bold(),
        "Contract".bold(),
        "Indexation".bold(),
        "Adjustment".bold()
    );

    for line in &batch.lines {
        println!(
            "{:<16} {:<16} {:<22} {:>12}",
            line.payment_id.as_deref().unwrap_or("-"),
            line.contract_id.as_deref().unwrap_or("-"),
            line.kind.label(),
            format_amount(line.adjustment)
        );
        if let Some(error) = &line.error {
            println!("  {} {}", "error:".red(), error.dimmed());
        }
    }

    println!();
    println!("{} {}", "Total:".bold(), format_amount(batch.total));
    let failed = batch.failed_count();
    if failed > 0 {
        println!(
            "{}",
            format!("{} adjustment(s) fell back to 0, see errors above", failed).yellow()
        );
    }
}

fn format_amount(value: Decimal) -> ColoredString {
    let text = format!("{:.2}", value);
    if value.is_sign_positive() && !value.is_zero() {
        text.bright_green()
    } else if value.is_sign_negative() && !value.is_zero() {
        text.red()
    } else {
        text.normal()
    }
}
