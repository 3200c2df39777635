//! Rent indexation
//!
//! Computes the adjustment owed on a rent payment under the indexation policy
//! of its contract:
//! - consumer price index: relative change of the current index against the
//!   contract's base index
//! - dollar: the same ratio over the USD exchange rate
//! - custom: a fixed annual rate accrued per elapsed calendar month
//!
//! The arithmetic lives in [`calculator`]; [`IndexationService`] adds the
//! Base Parameters fetch and turns failures into a logged zero adjustment.

pub mod calculator;
pub mod models;
pub mod service;

pub use calculator::{IndexationError, compute_adjustment, months_between, round_money};
pub use models::{Contract, IndexationKind, Payment, PaymentWithContract};
pub use service::{BatchAdjustments, IndexationService};
