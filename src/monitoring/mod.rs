use crate::price_lookup::YahooSource;
use crate::settings::AppSettings;
use anyhow::Result;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

mod data;
mod domain;
mod monitor;
pub use domain::{AlertEvent, SpreadPair, ThresholdKind};
pub use monitor::{PairMonitor, ValidationError};

pub async fn run(settings: AppSettings) -> Result<()> {
    info!("Starting mind-the-gap");
    let client = reqwest::Client::new();
    let source = match &settings.market_suffix {
        Some(suffix) => YahooSource::new(client).with_suffix(suffix),
        None => YahooSource::new(client),
    };
    let mut monitor = PairMonitor::new(Arc::new(source));

    for row in data::read_watch_list(&settings.watch_file)? {
        match monitor.register_pair(
            &row.asset_1,
            &row.asset_2,
            row.upper_threshold,
            row.lower_threshold,
        ) {
            Ok(()) => debug!(asset_1 = %row.asset_1, asset_2 = %row.asset_2, "Watching pair"),
            Err(e) => {
                warn!(asset_1 = %row.asset_1, asset_2 = %row.asset_2, error = %e, "Rejected watch-list row")
            }
        }
    }
    info!("Watching {} pairs", monitor.pairs().len());

    let mut ticker = interval(Duration::from_secs(settings.poll_seconds));
    loop {
        ticker.tick().await;
        for alert in monitor.check_all_pairs().await {
            info!("{}", alert);
        }
        for pair in monitor.pairs() {
            debug!(
                asset_1 = %pair.asset_1,
                asset_2 = %pair.asset_2,
                differential = ?pair.last_differential,
                status = ?pair.status,
                "Pair state"
            );
        }
    }
}
