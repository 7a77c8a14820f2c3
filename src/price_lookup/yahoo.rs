use super::{LookupError, PriceSource};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Price source backed by the Yahoo Finance chart endpoint. The latest
/// non-null close of the one-day series is taken as the current price.
pub struct YahooSource {
    client: Client,
    market_suffix: Option<String>,
}

impl YahooSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            market_suffix: None,
        }
    }

    /// Append a market suffix (e.g. ".SA" for B3 listings) to every
    /// symbol before it goes out. Pair identifiers elsewhere stay bare.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.market_suffix = Some(suffix.to_string());
        self
    }

    fn normalize(&self, asset: &str) -> String {
        match &self.market_suffix {
            Some(suffix) => format!("{}{}", asset, suffix),
            None => asset.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    // Entries can be null for halted sessions.
    #[serde(default)]
    close: Vec<Option<Decimal>>,
}

fn last_close(response: &ChartResponse) -> Option<Decimal> {
    response
        .chart
        .result
        .as_ref()?
        .first()?
        .indicators
        .quote
        .first()?
        .close
        .iter()
        .rev()
        .flatten()
        .next()
        .copied()
}

#[async_trait]
impl PriceSource for YahooSource {
    async fn latest_price(&self, asset: &str) -> Result<Decimal, LookupError> {
        let symbol = self.normalize(asset);
        debug!(%asset, %symbol, "Fetching latest close");
        let url = format!("{}/{}", CHART_URL, symbol);
        let response = self
            .client
            .get(url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| LookupError::new(asset, e))?;
        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| LookupError::new(asset, e))?;
        if let Some(error) = &body.chart.error {
            return Err(LookupError::new(asset, &error.description));
        }
        last_close(&body).ok_or_else(|| LookupError::new(asset, "empty price series"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_appends_suffix() {
        let plain = YahooSource::new(Client::new());
        assert_eq!(plain.normalize("PETR4"), "PETR4");
        let suffixed = YahooSource::new(Client::new()).with_suffix(".SA");
        assert_eq!(suffixed.normalize("PETR4"), "PETR4.SA");
    }

    #[test]
    fn test_last_close_takes_latest_non_null() {
        let body: ChartResponse = serde_json::from_str(
            r#"{"chart":{"result":[{"indicators":{"quote":[
                {"close":[10.5, 11.25, null]}
            ]}}],"error":null}}"#,
        )
        .unwrap();
        assert_eq!(last_close(&body), Some(Decimal::new(1125, 2)));
    }

    #[test]
    fn test_last_close_empty_series() {
        let body: ChartResponse = serde_json::from_str(
            r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[]}]}}],"error":null}}"#,
        )
        .unwrap();
        assert_eq!(last_close(&body), None);
    }

    #[test]
    fn test_error_payload_parses() {
        let body: ChartResponse = serde_json::from_str(
            r#"{"chart":{"result":null,"error":{"description":"No data found, symbol may be delisted"}}}"#,
        )
        .unwrap();
        assert_eq!(
            body.chart.error.unwrap().description,
            "No data found, symbol may be delisted"
        );
    }
}
