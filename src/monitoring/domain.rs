use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    Upper,
    Lower,
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThresholdKind::Upper => write!(f, "upper"),
            ThresholdKind::Lower => write!(f, "lower"),
        }
    }
}

/// A tracked comparison between two assets. The differential is always
/// `price_1 - price_2`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadPair {
    pub asset_1: String,
    pub asset_2: String,
    pub upper_threshold: Decimal,
    pub lower_threshold: Decimal,
    pub last_differential: Option<Decimal>,
    pub status: Option<ThresholdKind>,
}

impl SpreadPair {
    pub fn new(
        asset_1: impl Into<String>,
        asset_2: impl Into<String>,
        upper_threshold: Decimal,
        lower_threshold: Decimal,
    ) -> Self {
        Self {
            asset_1: asset_1.into(),
            asset_2: asset_2.into(),
            upper_threshold,
            lower_threshold,
            last_differential: None,
            status: None,
        }
    }

    /// Which threshold, if any, the differential breaches. The upper check
    /// runs first; the lower check also uses `>=`, so it matches any
    /// differential sitting between the two thresholds.
    pub fn evaluate(&self, differential: Decimal) -> Option<ThresholdKind> {
        if differential >= self.upper_threshold {
            Some(ThresholdKind::Upper)
        } else if differential >= self.lower_threshold {
            Some(ThresholdKind::Lower)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub asset_1: String,
    pub asset_2: String,
    pub differential: Decimal,
    pub kind: ThresholdKind,
    pub at: DateTime<Utc>,
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Difference between {} and {} crossed the {} limit: {:.2}",
            self.asset_1, self.asset_2, self.kind, self.differential
        )
    }
}
