//! Entities command handler

use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::collections::BTreeSet;

use super::{EntitiesArgs, EntitiesCommands};
use crate::cli::commands::{OutputFormat, format_json};
use crate::config::Config;
use crate::relationships::{EdgeKind, EntityDescriptor, EntityGraph};

pub fn handle_entities_command(args: EntitiesArgs, config: &Config) -> Result<()> {
    let graph = config.entity_graph();
    log::debug!("Entity graph has {} kinds", graph.len());

    let format = args.format;
    match args.command {
        EntitiesCommands::List => match format {
            OutputFormat::Text => {
                for kind in graph.kinds() {
                    let related = graph.related_kinds(kind);
                    println!("{:<14} {}", kind.bold(), related.join(", ").dimmed());
                }
            }
            _ => println!("{}", format_json(&graph, format)?),
        },
        EntitiesCommands::Show { kind } => {
            let Some(descriptor) = graph.descriptor(&kind) else {
                anyhow::bail!(
                    "Unknown entity kind '{}'. Known kinds: {}",
                    kind,
                    graph.kinds().collect::<Vec<_>>().join(", ")
                );
            };
            match format {
                OutputFormat::Text => print_descriptor(&graph, &kind, descriptor),
                _ => println!("{}", format_json(descriptor, format)?),
            }
        }
        EntitiesCommands::Related { source, target } => {
            let output = RelatedOutput::new(&graph, &source, &target);
            match format {
                OutputFormat::Text => print_related(&output),
                _ => println!("{}", format_json(&output, format)?),
            }
        }
        EntitiesCommands::Inherited { kind } => {
            if !graph.contains(&kind) {
                log::warn!("Unknown entity kind '{}', it inherits nothing", kind);
            }
            let attributes = graph.collect_inherited_attributes(&kind);
            match format {
                OutputFormat::Text => print_attributes(&kind, &attributes),
                _ => println!("{}", format_json(&attributes, format)?),
            }
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct RelatedOutput<'a> {
    source: &'a str,
    target: &'a str,
    /// SOURCE lists TARGET in one of its edge lists
    forward: bool,
    /// TARGET lists SOURCE in one of its edge lists
    backward: bool,
    /// SOURCE inherits from TARGET, directly or through ancestors
    inherits: bool,
}

impl<'a> RelatedOutput<'a> {
    fn new(graph: &EntityGraph, source: &'a str, target: &'a str) -> Self {
        Self {
            source,
            target,
            forward: graph.are_related(source, target),
            backward: graph.are_related(target, source),
            inherits: graph.is_inheriting(source, target),
        }
    }
}

fn print_descriptor(graph: &EntityGraph, kind: &str, descriptor: &EntityDescriptor) {
    println!("{}", kind.bold());

    for edge in EdgeKind::all_variants() {
        let targets = descriptor.edges(*edge);
        if !targets.is_empty() {
            println!("  {:<15} {}", format!("{}:", edge.label()), targets.join(", "));
        }
    }

    println!("  {:<15} {}", "attributes:", descriptor.attributes.join(", "));

    let inherited = graph.collect_inherited_attributes(kind);
    if !inherited.is_empty() {
        let inherited: Vec<&str> = inherited.iter().map(String::as_str).collect();
        println!("  {:<15} {}", "inherited:", inherited.join(", ").cyan());
    }
}

fn print_related(output: &RelatedOutput<'_>) {
    let verdict = |related: bool| {
        if related {
            "yes".bright_green()
        } else {
            "no".red()
        }
    };

    println!(
        "{} -> {}: {}",
        output.source.bold(),
        output.target.bold(),
        verdict(output.forward)
    );
    println!(
        "{} -> {}: {}",
        output.target.bold(),
        output.source.bold(),
        verdict(output.backward)
    );
    println!(
        "{} inherits from {}: {}",
        output.source.bold(),
        output.target.bold(),
        verdict(output.inherits)
    );
}

fn print_attributes(kind: &str, attributes: &BTreeSet<String>) {
    if attributes.is_empty() {
        println!("{} inherits no attributes", kind.bold());
        return;
    }

    println!("{} inherits {} attributes:", kind.bold(), attributes.len());
    for attribute in attributes {
        println!("  {}", attribute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_reports_transitive_inheritance() {
        let graph = EntityGraph::property_management();

        let output = RelatedOutput::new(&graph, "payment", "building");
        assert!(!output.forward);
        assert!(!output.backward);
        assert!(output.inherits);

        let output = RelatedOutput::new(&graph, "maintenance", "supplier");
        assert!(output.forward);
        assert!(output.backward);
        assert!(!output.inherits);
    }
}
