//! Base Parameters records and the sources they are fetched from

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Consumer price index block of a Base Parameters record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
}

/// Exchange rates block of a Base Parameters record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<Decimal>,
}

/// Process-wide index values and currency rates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Exactly one record is expected to carry this marker
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub consumer_price_index: PriceIndex,
    #[serde(default)]
    pub currency_rates: CurrencyRates,
}

impl BaseParameters {
    /// Current consumer price index value
    pub fn current_index(&self) -> Result<Decimal, ParametersError> {
        self.consumer_price_index
            .value
            .ok_or(ParametersError::MissingValue {
                field: "consumer_price_index.value",
            })
    }

    /// Current USD exchange rate
    pub fn current_usd_rate(&self) -> Result<Decimal, ParametersError> {
        self.currency_rates.usd.ok_or(ParametersError::MissingValue {
            field: "currency_rates.usd",
        })
    }
}

/// Error fetching or reading Base Parameters
#[derive(Debug)]
pub enum ParametersError {
    /// No record in the listing is marked active
    NoActiveRecord,
    /// The active record lacks a value the caller needs
    MissingValue { field: &'static str },
    /// Transport-level failure talking to the API
    Http(String),
    /// API answered with a non-success status
    Status { status: u16, body: String },
    /// Response or file body was not a parameters listing
    Decode(String),
    /// Local file could not be read
    Io { path: PathBuf, message: String },
}

impl std::fmt::Display for ParametersError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParametersError::NoActiveRecord => {
                write!(f, "No active Base Parameters record found")
            }
            ParametersError::MissingValue { field } => {
                write!(f, "Active Base Parameters record has no value for '{}'", field)
            }
            ParametersError::Http(msg) => write!(f, "Base Parameters request failed: {}", msg),
            ParametersError::Status { status, body } => {
                write!(f, "Base Parameters request returned HTTP {}: {}", status, body)
            }
            ParametersError::Decode(msg) => {
                write!(f, "Failed to decode Base Parameters listing: {}", msg)
            }
            ParametersError::Io { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ParametersError {}

/// Anything that can list Base Parameters records
#[async_trait]
pub trait ParametersSource: Send + Sync {
    /// List every Base Parameters record
    async fn list(&self) -> Result<Vec<BaseParameters>, ParametersError>;

    /// Fetch the single active record
    async fn fetch_active(&self) -> Result<BaseParameters, ParametersError> {
        let records = self.list().await?;
        select_active(records)
    }
}

#[async_trait]
impl<T: ParametersSource + ?Sized> ParametersSource for Box<T> {
    async fn list(&self) -> Result<Vec<BaseParameters>, ParametersError> {
        (**self).list().await
    }

    async fn fetch_active(&self) -> Result<BaseParameters, ParametersError> {
        (**self).fetch_active().await
    }
}

/// Pick the active record out of a listing
///
/// When several records are marked active the first one wins and a warning is logged.
pub fn select_active(records: Vec<BaseParameters>) -> Result<BaseParameters, ParametersError> {
    let total = records.len();
    let mut active = records.into_iter().filter(|r| r.active);

    let first = active.next().ok_or(ParametersError::NoActiveRecord)?;
    let extra = active.count();
    if extra > 0 {
        log::warn!(
            "{} of {} Base Parameters records are marked active, using {}",
            extra + 1,
            total,
            first.id.as_deref().unwrap_or("the first")
        );
    }

    Ok(first)
}

/// Listing envelope used by the API (`{ "value": [...] }`)
#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    value: Vec<BaseParameters>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    Bare(Vec<BaseParameters>),
    Wrapped(ListingEnvelope),
}

/// Parse a listing that is either a bare array or wrapped in `{ "value": [...] }`
pub fn parse_listing(body: &str) -> Result<Vec<BaseParameters>, ParametersError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| ParametersError::Decode(e.to_string()))?;

    Ok(match listing {
        Listing::Bare(records) => records,
        Listing::Wrapped(envelope) => envelope.value,
    })
}

/// Reads the listing from a local JSON file on every call
#[derive(Debug, Clone)]
pub struct FileParametersSource {
    path: PathBuf,
}

impl FileParametersSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ParametersSource for FileParametersSource {
    async fn list(&self) -> Result<Vec<BaseParameters>, ParametersError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ParametersError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        log::debug!("Loaded Base Parameters listing from {}", self.path.display());
        parse_listing(&body)
    }
}
