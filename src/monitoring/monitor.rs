use crate::monitoring::domain::{AlertEvent, SpreadPair};
use crate::price_lookup::PriceSource;
use futures::future;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("both assets of a pair must be selected")]
    EmptySelection,
    #[error("the two assets of a pair must differ")]
    DuplicateAsset,
    #[error("threshold {0} is outside [-100, 100]")]
    ThresholdOutOfRange(Decimal),
}

fn in_threshold_range(threshold: Decimal) -> bool {
    threshold >= Decimal::new(-100, 0) && threshold <= Decimal::new(100, 0)
}

/// Owns the ordered collection of watched pairs and drives the check
/// cycle against a price source. Registration order is iteration order.
pub struct PairMonitor {
    source: Arc<dyn PriceSource>,
    pairs: Vec<SpreadPair>,
}

impl PairMonitor {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self {
            source,
            pairs: Vec::new(),
        }
    }

    /// Validate and append a new pair. Nothing is mutated on failure.
    pub fn register_pair(
        &mut self,
        asset_1: &str,
        asset_2: &str,
        upper_threshold: Decimal,
        lower_threshold: Decimal,
    ) -> Result<(), ValidationError> {
        if asset_1.is_empty() || asset_2.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        if asset_1 == asset_2 {
            return Err(ValidationError::DuplicateAsset);
        }
        for threshold in [upper_threshold, lower_threshold] {
            if !in_threshold_range(threshold) {
                return Err(ValidationError::ThresholdOutOfRange(threshold));
            }
        }
        self.pairs.push(SpreadPair::new(
            asset_1,
            asset_2,
            upper_threshold,
            lower_threshold,
        ));
        Ok(())
    }

    /// Current pair state, in registration order.
    pub fn pairs(&self) -> &[SpreadPair] {
        &self.pairs
    }

    /// Run one check cycle over every pair and collect the alerts it
    /// produced, in pair order. A pair whose lookups fail is skipped for
    /// this cycle with its previous state untouched; no error escapes.
    pub async fn check_all_pairs(&mut self) -> Vec<AlertEvent> {
        let mut alerts = Vec::new();
        for pair in self.pairs.iter_mut() {
            let (price_1, price_2) = future::join(
                self.source.latest_price(&pair.asset_1),
                self.source.latest_price(&pair.asset_2),
            )
            .await;
            let (price_1, price_2) = match (price_1, price_2) {
                (Ok(price_1), Ok(price_2)) => (price_1, price_2),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(asset_1 = %pair.asset_1, asset_2 = %pair.asset_2, error = %e, "Price unavailable, keeping previous state");
                    continue;
                }
            };
            let differential = price_1 - price_2;
            debug!(asset_1 = %pair.asset_1, asset_2 = %pair.asset_2, %differential, "Checked pair");
            let breach = pair.evaluate(differential);
            if let Some(kind) = breach {
                alerts.push(AlertEvent {
                    asset_1: pair.asset_1.clone(),
                    asset_2: pair.asset_2.clone(),
                    differential,
                    kind,
                    at: chrono::Utc::now(),
                });
            }
            pair.status = breach;
            pair.last_differential = Some(differential);
        }
        alerts
    }
}
