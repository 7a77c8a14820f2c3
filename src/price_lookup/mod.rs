use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

mod yahoo;
pub use yahoo::YahooSource;

/// Every upstream failure mode (network, unknown symbol, empty series)
/// folds into this one error.
#[derive(Debug, Error)]
#[error("price lookup for {asset} failed: {cause}")]
pub struct LookupError {
    pub asset: String,
    pub cause: String,
}

impl LookupError {
    pub fn new(asset: &str, cause: impl ToString) -> Self {
        Self {
            asset: asset.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Latest-price boundary. Implementations are stateless and safe to call
/// concurrently for different assets.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn latest_price(&self, asset: &str) -> Result<Decimal, LookupError>;
}
