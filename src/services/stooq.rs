//! Stooq daily-CSV data provider.
//!
//! Stooq serves end-of-day history as plain CSV
//! (`Date,Open,High,Low,Close,Volume`) without an API key, which is all the
//! screening engine needs. Transient failures are retried with exponential
//! backoff before the instrument is reported unavailable.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{normalize_bars, PriceBar};
use crate::services::market_data::HistoricalDataProvider;

const DEFAULT_BASE_URL: &str = "https://stooq.com";
const MAX_RETRIES: usize = 3;

pub struct StooqProvider {
    client: reqwest::Client,
    base_url: String,
}

impl StooqProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at a different host, e.g. a mock server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_once(&self, symbol: &str) -> Result<String, EngineError> {
        let url = format!(
            "{}/q/d/l/?s={}&i=d",
            self.base_url,
            symbol.to_lowercase()
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EngineError::market_data(symbol, e))?;

        if !response.status().is_success() {
            return Err(EngineError::market_data(
                symbol,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| EngineError::market_data(symbol, e))
    }
}

impl Default for StooqProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoricalDataProvider for StooqProvider {
    async fn daily_bars(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Vec<PriceBar>, EngineError> {
        let body = (|| self.fetch_once(symbol))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(250))
                    .with_max_times(MAX_RETRIES),
            )
            .notify(|err: &EngineError, delay: Duration| {
                warn!(symbol, error = %err, ?delay, "retrying market data fetch");
            })
            .await?;

        let bars = parse_daily_csv(symbol, &body)?;
        let bars = normalize_bars(bars);
        let keep = lookback_days as usize;
        let start = bars.len().saturating_sub(keep);
        debug!(symbol, bars = bars.len() - start, "fetched daily history");
        Ok(bars[start..].to_vec())
    }
}

/// Parse Stooq's daily CSV. Malformed rows are skipped; an entirely
/// unparseable body is a data error (Stooq answers unknown symbols with a
/// bare "No data" line and status 200).
fn parse_daily_csv(symbol: &str, body: &str) -> Result<Vec<PriceBar>, EngineError> {
    let mut bars = Vec::new();
    for line in body.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 6 {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d") else {
            continue;
        };
        let parsed: Option<[f64; 4]> = (|| {
            Some([
                fields[1].parse().ok()?,
                fields[2].parse().ok()?,
                fields[3].parse().ok()?,
                fields[4].parse().ok()?,
            ])
        })();
        let Some([open, high, low, close]) = parsed else {
            continue;
        };
        let volume = fields[5].parse().unwrap_or(0.0);
        bars.push(PriceBar::new(date, open, high, low, close, volume));
    }

    if bars.is_empty() {
        return Err(EngineError::market_data(symbol, "no parseable bars in response"));
    }
    Ok(bars)
}
