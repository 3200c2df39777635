//! Pure indexation arithmetic
//!
//! Every function here is a function of its inputs only. Fetching Base
//! Parameters and deciding what to do when that fails is left to
//! [`super::IndexationService`].

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::models::{Contract, IndexationKind, Payment};
use crate::api::{BaseParameters, ParametersError};

/// Error computing an adjustment
#[derive(Debug)]
pub enum IndexationError {
    /// Base Parameters were unavailable or incomplete
    Parameters(ParametersError),
    /// The contract's base index (or rate) is zero, so no ratio exists
    ZeroBase { kind: IndexationKind },
    /// Intermediate result does not fit in a Decimal
    Overflow,
}

impl std::fmt::Display for IndexationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexationError::Parameters(err) => write!(f, "{}", err),
            IndexationError::ZeroBase { kind } => {
                write!(f, "Contract base value is zero for {} indexation", kind.label())
            }
            IndexationError::Overflow => write!(f, "Indexation arithmetic overflowed"),
        }
    }
}

impl std::error::Error for IndexationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexationError::Parameters(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParametersError> for IndexationError {
    fn from(err: ParametersError) -> Self {
        IndexationError::Parameters(err)
    }
}

/// Round to cents, halves away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole calendar months from `start` to `end`, ignoring the day of month
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let years = i64::from(end.year()) - i64::from(start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    years * 12 + months
}

/// Whether computing this pair would consult Base Parameters
///
/// False whenever a short-circuit (missing date, settled index, non-index
/// kind) already decides the result.
pub fn requires_parameters(payment: &Payment, contract: &Contract) -> bool {
    payment.date.is_some() && !payment.index_paid() && contract.indexation_kind().requires_parameters()
}

/// Compute the indexation adjustment for one payment
///
/// `parameters` must be the active Base Parameters record; it is only read
/// for the consumer price index and dollar policies, and its absence is an
/// error for those two.
pub fn compute_adjustment(
    payment: &Payment,
    contract: &Contract,
    parameters: Option<&BaseParameters>,
) -> Result<Decimal, IndexationError> {
    let Some(payment_date) = payment.date else {
        return Ok(Decimal::ZERO);
    };

    let Some(policy) = contract.indexation.as_ref() else {
        return Ok(Decimal::ZERO);
    };

    if policy.kind == IndexationKind::None || payment.index_paid() {
        return Ok(Decimal::ZERO);
    }

    match policy.kind {
        IndexationKind::ConsumerPriceIndex => {
            let params = parameters.ok_or(ParametersError::NoActiveRecord)?;
            let current = params.current_index()?;
            let base = policy.base_index.unwrap_or(current);
            ratio_adjustment(policy.kind, payment.amount, current, base)
        }
        IndexationKind::Dollar => {
            let params = parameters.ok_or(ParametersError::NoActiveRecord)?;
            let current = params.current_usd_rate()?;
            let base = policy.base_index.unwrap_or(current);
            ratio_adjustment(policy.kind, payment.amount, current, base)
        }
        IndexationKind::Custom => {
            let Some(start) = contract.start_date else {
                log::debug!("Custom indexation on a contract without start date, no adjustment");
                return Ok(Decimal::ZERO);
            };
            let rate = policy.custom_rate.unwrap_or(Decimal::ZERO);
            let months = Decimal::from(months_between(start, payment_date));

            let monthly_rate = rate / Decimal::from(12);
            let raw = payment
                .amount
                .checked_mul(monthly_rate)
                .and_then(|v| v.checked_mul(months))
                .ok_or(IndexationError::Overflow)?;
            Ok(round_money(raw))
        }
        IndexationKind::None | IndexationKind::Unknown => Ok(Decimal::ZERO),
    }
}

/// `amount * (current - base) / base`, rounded to cents
fn ratio_adjustment(
    kind: IndexationKind,
    amount: Decimal,
    current: Decimal,
    base: Decimal,
) -> Result<Decimal, IndexationError> {
    if base.is_zero() {
        return Err(IndexationError::ZeroBase { kind });
    }

    let raw = current
        .checked_sub(base)
        .and_then(|delta| amount.checked_mul(delta))
        .and_then(|v| v.checked_div(base))
        .ok_or(IndexationError::Overflow)?;
    Ok(round_money(raw))
}
