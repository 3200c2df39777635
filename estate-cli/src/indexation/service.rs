//! Indexation service: fetch Base Parameters on demand, never block payments

use log::{debug, error};
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculator::{IndexationError, compute_adjustment, requires_parameters};
use super::models::{Contract, IndexationKind, Payment, PaymentWithContract};
use crate::api::{BaseParameters, ParametersError, ParametersSource};

/// Adjustment computed for one payment of a batch
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    pub kind: IndexationKind,
    pub adjustment: Decimal,
    /// Why the adjustment degraded to zero, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of computing a batch of payments
#[derive(Debug, Clone, Serialize)]
pub struct BatchAdjustments {
    pub lines: Vec<AdjustmentLine>,
    pub total: Decimal,
}

impl BatchAdjustments {
    /// Number of lines that degraded to zero because of an error
    pub fn failed_count(&self) -> usize {
        self.lines.iter().filter(|l| l.error.is_some()).count()
    }
}

/// Computes adjustments against the active Base Parameters of a source
#[derive(Debug)]
pub struct IndexationService<S> {
    source: S,
}

impl<S: ParametersSource> IndexationService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Adjustment for one payment, zero when anything is missing or fails
    ///
    /// Failures fetching Base Parameters are logged and degrade to zero so
    /// payment processing is never blocked.
    pub async fn compute_index_adjustment(
        &self,
        payment: Option<&Payment>,
        contract: Option<&Contract>,
    ) -> Decimal {
        let (Some(payment), Some(contract)) = (payment, contract) else {
            return Decimal::ZERO;
        };

        self.try_compute(payment, contract)
            .await
            .unwrap_or_else(|err| {
                log_failure(payment, contract, &err);
                Decimal::ZERO
            })
    }

    /// Adjustment for one payment, surfacing the error instead of logging it
    pub async fn try_compute(
        &self,
        payment: &Payment,
        contract: &Contract,
    ) -> Result<Decimal, IndexationError> {
        if !requires_parameters(payment, contract) {
            return compute_adjustment(payment, contract, None);
        }

        let params = self.source.fetch_active().await?;
        compute_adjustment(payment, contract, Some(&params))
    }

    /// Adjustments for many payments, fetching Base Parameters at most once
    pub async fn compute_batch(&self, items: &[PaymentWithContract]) -> BatchAdjustments {
        let mut params: Option<Result<BaseParameters, String>> = None;
        let mut lines = Vec::with_capacity(items.len());
        let mut total = Decimal::ZERO;

        for item in items {
            let (payment, contract) = (&item.payment, &item.contract);

            let result = if requires_parameters(payment, contract) {
                if params.is_none() {
                    debug!("Fetching active Base Parameters for batch of {}", items.len());
                    params = Some(self.source.fetch_active().await.map_err(|e| e.to_string()));
                }
                match params.as_ref() {
                    Some(Ok(active)) => compute_adjustment(payment, contract, Some(active))
                        .map_err(|e| e.to_string()),
                    Some(Err(msg)) => Err(msg.clone()),
                    None => Err(ParametersError::NoActiveRecord.to_string()),
                }
            } else {
                compute_adjustment(payment, contract, None).map_err(|e| e.to_string())
            };

            let result = result.and_then(|value| match total.checked_add(value) {
                Some(sum) => {
                    total = sum;
                    Ok(value)
                }
                None => Err(IndexationError::Overflow.to_string()),
            });

            let (adjustment, error) = match result {
                Ok(value) => (value, None),
                Err(msg) => {
                    error!(
                        "Index adjustment for payment {} failed, using 0: {}",
                        payment.id.as_deref().unwrap_or("<unnamed>"),
                        msg
                    );
                    (Decimal::ZERO, Some(msg))
                }
            };

            lines.push(AdjustmentLine {
                payment_id: payment.id.clone(),
                contract_id: contract.id.clone(),
                kind: contract.indexation_kind(),
                adjustment,
                error,
            });
        }

        BatchAdjustments { lines, total }
    }
}

fn log_failure(payment: &Payment, contract: &Contract, err: &IndexationError) {
    error!(
        "Index adjustment for payment {} (contract {}) failed, using 0: {}",
        payment.id.as_deref().unwrap_or("<unnamed>"),
        contract.id.as_deref().unwrap_or("<unnamed>"),
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexation::models::{IndexDetails, IndexationPolicy};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory listing that counts how often it is consulted
    struct StaticSource {
        records: Vec<BaseParameters>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(records: Vec<BaseParameters>) -> Self {
            Self {
                records,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ParametersSource for StaticSource {
        async fn list(&self) -> Result<Vec<BaseParameters>, ParametersError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.clone())
        }
    }

    fn active_params() -> BaseParameters {
        let mut p = BaseParameters {
            id: Some("2023".to_string()),
            active: true,
            ..Default::default()
        };
        p.consumer_price_index.value = Some(dec!(110));
        p.currency_rates.usd = Some(dec!(3.85));
        p
    }

    fn payment(id: &str, amount: Decimal) -> Payment {
        Payment {
            id: Some(id.to_string()),
            date: NaiveDate::from_ymd_opt(2023, 4, 1),
            amount,
            index_details: None,
        }
    }

    fn contract(kind: IndexationKind, base_index: Option<Decimal>, custom_rate: Option<Decimal>) -> Contract {
        Contract {
            id: Some("c-1".to_string()),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            indexation: Some(IndexationPolicy {
                kind,
                base_index,
                custom_rate,
            }),
        }
    }

    #[tokio::test]
    async fn test_absent_inputs_are_zero() {
        let source = StaticSource::new(vec![active_params()]);
        let service = IndexationService::new(source);
        let p = payment("p1", dec!(1000));
        let c = contract(IndexationKind::ConsumerPriceIndex, Some(dec!(100)), None);

        assert_eq!(service.compute_index_adjustment(None, Some(&c)).await, Decimal::ZERO);
        assert_eq!(service.compute_index_adjustment(Some(&p), None).await, Decimal::ZERO);
        assert_eq!(service.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_cpi_uses_active_parameters() {
        let service = IndexationService::new(StaticSource::new(vec![active_params()]));
        let adjustment = service
            .compute_index_adjustment(
                Some(&payment("p1", dec!(1000))),
                Some(&contract(IndexationKind::ConsumerPriceIndex, Some(dec!(100)), None)),
            )
            .await;

        assert_eq!(adjustment, dec!(100.00));
    }

    #[tokio::test]
    async fn test_no_active_record_degrades_to_zero() {
        let mut inactive = active_params();
        inactive.active = false;
        let service = IndexationService::new(StaticSource::new(vec![inactive]));

        let p = payment("p1", dec!(2000));
        let usd = contract(IndexationKind::Dollar, Some(dec!(3.5)), None);

        assert_eq!(service.compute_index_adjustment(Some(&p), Some(&usd)).await, Decimal::ZERO);
        assert!(matches!(
            service.try_compute(&p, &usd).await,
            Err(IndexationError::Parameters(ParametersError::NoActiveRecord))
        ));
    }

    #[tokio::test]
    async fn test_zero_base_degrades_to_zero() {
        let service = IndexationService::new(StaticSource::new(vec![active_params()]));
        let p = payment("p1", dec!(1000));
        let c = contract(IndexationKind::ConsumerPriceIndex, Some(Decimal::ZERO), None);

        assert_eq!(service.compute_index_adjustment(Some(&p), Some(&c)).await, Decimal::ZERO);
        assert!(matches!(
            service.try_compute(&p, &c).await,
            Err(IndexationError::ZeroBase {
                kind: IndexationKind::ConsumerPriceIndex
            })
        ));
    }

    #[tokio::test]
    async fn test_arithmetic_overflow_degrades_to_zero() {
        let mut huge = active_params();
        huge.consumer_price_index.value = Some(Decimal::MAX);
        let service = IndexationService::new(StaticSource::new(vec![huge]));
        let p = payment("p1", dec!(1000));
        let c = contract(IndexationKind::ConsumerPriceIndex, Some(dec!(-1)), None);

        assert_eq!(service.compute_index_adjustment(Some(&p), Some(&c)).await, Decimal::ZERO);
        assert!(matches!(
            service.try_compute(&p, &c).await,
            Err(IndexationError::Overflow)
        ));
    }

    #[tokio::test]
    async fn test_custom_never_fetches_parameters() {
        let service = IndexationService::new(StaticSource::new(Vec::new()));
        let adjustment = service
            .compute_index_adjustment(
                Some(&payment("p1", dec!(1000))),
                Some(&contract(IndexationKind::Custom, None, Some(dec!(0.12)))),
            )
            .await;

        assert_eq!(adjustment, dec!(30.00));
        assert_eq!(service.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_paid_payment_skips_fetch() {
        let service = IndexationService::new(StaticSource::new(vec![active_params()]));
        let mut p = payment("p1", dec!(1000));
        p.index_details = Some(IndexDetails { index_paid: true });

        let adjustment = service
            .compute_index_adjustment(
                Some(&p),
                Some(&contract(IndexationKind::ConsumerPriceIndex, Some(dec!(50)), None)),
            )
            .await;

        assert_eq!(adjustment, Decimal::ZERO);
        assert_eq!(service.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_batch_fetches_once_and_totals() {
        let service = IndexationService::new(StaticSource::new(vec![active_params()]));
        let items = vec![
            PaymentWithContract {
                payment: payment("p1", dec!(1000)),
                contract: contract(IndexationKind::ConsumerPriceIndex, Some(dec!(100)), None),
            },
            PaymentWithContract {
                payment: payment("p2", dec!(2000)),
                contract: contract(IndexationKind::Dollar, Some(dec!(3.5)), None),
            },
            PaymentWithContract {
                payment: payment("p3", dec!(1000)),
                contract: contract(IndexationKind::Custom, None, Some(dec!(0.12))),
            },
            PaymentWithContract {
                payment: payment("p4", dec!(1000)),
                contract: contract(IndexationKind::None, None, None),
            },
        ];

        let batch = service.compute_batch(&items).await;

        assert_eq!(service.source().calls(), 1);
        assert_eq!(batch.lines.len(), 4);
        assert_eq!(batch.lines[0].adjustment, dec!(100.00));
        assert_eq!(batch.lines[1].adjustment, dec!(200.00));
        assert_eq!(batch.lines[2].adjustment, dec!(30.00));
        assert_eq!(batch.lines[3].adjustment, Decimal::ZERO);
        assert_eq!(batch.total, dec!(330.00));
        assert_eq!(batch.failed_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_records_failures_per_line() {
        let service = IndexationService::new(StaticSource::new(Vec::new()));
        let items = vec![
            PaymentWithContract {
                payment: payment("p1", dec!(1000)),
                contract: contract(IndexationKind::ConsumerPriceIndex, Some(dec!(100)), None),
            },
            PaymentWithContract {
                payment: payment("p2", dec!(1000)),
                contract: contract(IndexationKind::Custom, None, Some(dec!(0.12))),
            },
            PaymentWithContract {
                payment: payment("p3", dec!(2000)),
                contract: contract(IndexationKind::Dollar, Some(dec!(3.5)), None),
            },
        ];

        let batch = service.compute_batch(&items).await;

        assert_eq!(service.source().calls(), 1);
        assert_eq!(batch.failed_count(), 2);
        assert!(batch.lines[0].error.is_some());
        assert!(batch.lines[1].error.is_none());
        assert_eq!(batch.total, dec!(30.00));
    }

    #[tokio::test]
    async fn test_batch_total_overflow_is_recorded_on_line() {
        let service = IndexationService::new(StaticSource::new(Vec::new()));
        let mut monthly = contract(IndexationKind::Custom, None, Some(dec!(12)));
        monthly.start_date = NaiveDate::from_ymd_opt(2023, 3, 1);
        let items = vec![
            PaymentWithContract {
                payment: payment("p1", Decimal::MAX),
                contract: monthly.clone(),
            },
            PaymentWithContract {
                payment: payment("p2", Decimal::MAX),
                contract: monthly,
            },
        ];

        let batch = service.compute_batch(&items).await;

        assert_eq!(batch.lines[0].adjustment, Decimal::MAX);
        assert!(batch.lines[0].error.is_none());
        assert_eq!(batch.lines[1].adjustment, Decimal::ZERO);
        assert!(batch.lines[1].error.is_some());
        assert_eq!(batch.total, Decimal::MAX);
        assert_eq!(batch.failed_count(), 1);
    }
}
