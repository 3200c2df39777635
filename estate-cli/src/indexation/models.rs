//! Contract and payment records as consumed by the indexation calculator

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Indexation policy kinds a contract can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexationKind {
    /// No indexation (default)
    #[default]
    None,
    /// Linked to the consumer price index
    ConsumerPriceIndex,
    /// Linked to the USD exchange rate
    Dollar,
    /// Fixed annual rate accrued monthly from the contract start
    Custom,
    /// Any kind this tool does not recognise
    #[serde(other)]
    Unknown,
}

impl IndexationKind {
    /// Get display label for CLI output
    pub fn label(&self) -> &'static str {
        match self {
            IndexationKind::None => "None",
            IndexationKind::ConsumerPriceIndex => "Consumer price index",
            IndexationKind::Dollar => "Dollar",
            IndexationKind::Custom => "Custom rate",
            IndexationKind::Unknown => "Unknown",
        }
    }

    /// Whether computing an adjustment for this kind needs Base Parameters
    pub fn requires_parameters(&self) -> bool {
        matches!(
            self,
            IndexationKind::ConsumerPriceIndex | IndexationKind::Dollar
        )
    }
}

/// Indexation terms stored on a contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexationPolicy {
    #[serde(default)]
    pub kind: IndexationKind,
    /// Index value (or USD rate, for `dollar`) recorded when the contract was signed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_index: Option<Decimal>,
    /// Annual rate as a fraction (0.03 = 3%), used by `custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_rate: Option<Decimal>,
}

/// Rental contract (subset relevant to indexation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexation: Option<IndexationPolicy>,
}

impl Contract {
    /// Effective indexation kind, treating a missing policy as `None`
    pub fn indexation_kind(&self) -> IndexationKind {
        self.indexation
            .as_ref()
            .map(|policy| policy.kind)
            .unwrap_or_default()
    }
}

/// Settlement state of the index adjustment for a payment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDetails {
    /// The adjustment was already paid
    #[serde(default)]
    pub index_paid: bool,
}

/// Rent payment (subset relevant to indexation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_details: Option<IndexDetails>,
}

impl Payment {
    /// Whether the index adjustment for this payment has been settled
    pub fn index_paid(&self) -> bool {
        self.index_details
            .as_ref()
            .is_some_and(|details| details.index_paid)
    }
}

/// A payment paired with the contract that governs it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentWithContract {
    pub payment: Payment,
    pub contract: Contract,
}
