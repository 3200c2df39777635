//! Configuration file and environment overrides
//!
//! Loaded from `--config`, or `<config dir>/estate-cli/config.toml` when that
//! file exists. Missing files fall back to defaults. `ESTATE_API_URL` and
//! `ESTATE_API_TOKEN` (also read from a `.env` file) override the API section.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ApiClient, ResilienceConfig, RetryConfig};
use crate::relationships::{EntityGraph, EntityGraphBuilder, RelationshipExtension};

pub const ENV_API_URL: &str = "ESTATE_API_URL";
pub const ENV_API_TOKEN: &str = "ESTATE_API_TOKEN";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    /// Extra relationship registrations applied on top of the shipped graph
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipExtension>,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the property-management API; unset means no remote source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_parameters_path")]
    pub parameters_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default = "default_true")]
    pub request_logging: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            parameters_path: default_parameters_path(),
            token: None,
            timeout_secs: default_timeout_secs(),
            retry: RetrySettings::default(),
            request_logging: true,
        }
    }
}

/// Retry settings as written in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

fn default_parameters_path() -> String {
    "base_parameters".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl ApiSettings {
    /// Resilience settings for the HTTP client
    pub fn resilience(&self) -> ResilienceConfig {
        ResilienceConfig::builder()
            .retry_config(RetryConfig {
                max_attempts: self.retry.max_attempts.max(1),
                base_delay: Duration::from_millis(self.retry.base_delay_ms),
                max_delay: Duration::from_millis(self.retry.max_delay_ms),
                backoff_multiplier: self.retry.backoff_multiplier,
            })
            .timeout(Duration::from_secs(self.timeout_secs))
            .request_logging(self.request_logging)
            .build()
    }

    /// HTTP client for the configured API
    pub fn client(&self) -> Result<ApiClient> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No API base URL configured. Set api.base_url in the config file, export {}, or pass --parameters FILE.",
                ENV_API_URL
            )
        })?;

        ApiClient::new(
            base_url,
            &self.parameters_path,
            self.token.clone(),
            self.resilience(),
        )
        .context("Failed to create API client")
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("estate-cli").join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Load from `path`, or the default location; a missing default file yields defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (Some(p.to_path_buf()), true),
            None => (Self::default_path(), false),
        };

        let mut config = match path {
            Some(ref p) if p.exists() => {
                let text = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                log::debug!("Loaded configuration from {}", p.display());
                Self::from_toml(&text)
                    .with_context(|| format!("Invalid config file: {}", p.display()))?
            }
            Some(ref p) if explicit => {
                anyhow::bail!("Config file does not exist: {}", p.display());
            }
            _ => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override API settings from environment lookups
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            log::debug!("Using API base URL from {}", ENV_API_URL);
            self.api.base_url = Some(url);
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api.token = Some(token);
        }
    }

    /// Shipped entity graph with configured registrations applied
    pub fn entity_graph(&self) -> EntityGraph {
        EntityGraphBuilder::from_graph(EntityGraph::property_management())
            .apply_extensions(&self.relationships)
            .build()
    }
}
