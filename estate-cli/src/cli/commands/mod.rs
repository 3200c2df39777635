//! Command definitions and shared helpers for handlers

pub mod entities;
pub mod index;
pub mod params;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{FileParametersSource, ParametersSource};
use crate::config::Config;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    JsonCompact,
}

/// Read and deserialize a JSON file
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in: {}", path.display()))
}

/// Serialize a result as JSON in the requested flavour
pub fn format_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::JsonCompact => {
            serde_json::to_string(value).context("Failed to format JSON output")
        }
        _ => serde_json::to_string_pretty(value).context("Failed to format JSON output"),
    }
}

/// Base Parameters come from `--parameters FILE` when given, otherwise the configured API
pub fn parameters_source(
    config: &Config,
    parameters_file: Option<&PathBuf>,
) -> Result<Box<dyn ParametersSource>> {
    match parameters_file {
        Some(path) => {
            log::info!("Reading Base Parameters from {}", path.display());
            Ok(Box::new(FileParametersSource::new(path.clone())))
        }
        None => {
            let client = config.api.client()?;
            log::info!("Fetching Base Parameters from {}", client.parameters_url());
            Ok(Box::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "amount": 12.5 }}"#).unwrap();

        let value: serde_json::Value = read_json_file(file.path()).unwrap();
        assert_eq!(value["amount"], 12.5);
    }

    #[test]
    fn test_read_json_file_errors() {
        let missing: Result<serde_json::Value> = read_json_file(Path::new("/nonexistent.json"));
        assert!(missing.is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let invalid: Result<serde_json::Value> = read_json_file(file.path());
        assert!(invalid.is_err());
    }

    #[test]
    fn test_format_json_compact() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(format_json(&value, OutputFormat::JsonCompact).unwrap(), r#"{"a":1}"#);
        assert!(format_json(&value, OutputFormat::Json).unwrap().contains('\n'));
    }

    #[test]
    fn test_parameters_source_needs_file_or_url() {
        let config = Config::default();
        assert!(parameters_source(&config, None).is_err());
        assert!(parameters_source(&config, Some(&PathBuf::from("params.json"))).is_ok());
    }
}
