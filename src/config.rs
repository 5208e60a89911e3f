//! Runtime configuration.
//!
//! Defaults cover a full offline-capable run; the handful of deployment
//! knobs (environment, data host, pacing, output directories) come from the
//! environment, loaded through dotenv when a `.env` file is present.

use std::env;

use crate::models::AssetClass;
use crate::signals::PositionLimits;

/// Per-asset-class screening parameters.
#[derive(Debug, Clone)]
pub struct ClassConfig {
    pub limits: PositionLimits,
    /// Daily bars requested from the data source, sized to cover the
    /// longest indicator warm-up for the class.
    pub lookback_days: u32,
    pub default_universe: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding optional `<class>_list.txt` universe files
    /// produced by the fundamental screening stage.
    pub tickers_dir: String,
    pub reports_dir: String,
    pub data_base_url: Option<String>,
    /// Pause between instrument fetches within one asset class.
    pub request_delay_ms: u64,
    pub equities: ClassConfig,
    pub bonds: ClassConfig,
    pub commodities: ClassConfig,
    pub gold: ClassConfig,
}

fn universe(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickers_dir: "tickers".to_string(),
            reports_dir: "reports/technical".to_string(),
            data_base_url: None,
            request_delay_ms: 500,
            equities: ClassConfig {
                limits: PositionLimits::new(5, 8),
                lookback_days: 60,
                default_universe: universe(&["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"]),
            },
            bonds: ClassConfig {
                limits: PositionLimits::new(2, 3),
                lookback_days: 90,
                default_universe: universe(&[
                    "TLT", "IEF", "SHY", "LQD", "HYG", "TIP", "BND", "AGG",
                ]),
            },
            commodities: ClassConfig {
                limits: PositionLimits::new(2, 3),
                lookback_days: 120,
                default_universe: universe(&[
                    "USO", "UNG", "GLD", "SLV", "DBC", "GSG", "COMT", "PDBC",
                ]),
            },
            gold: ClassConfig {
                limits: PositionLimits::new(1, 2),
                lookback_days: 120,
                default_universe: universe(&[
                    "GLD", "IAU", "SGOL", "GLDM", "BAR", "OUNZ", "UGL", "DGL",
                ]),
            },
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(dir) = env::var("TACTIX_TICKERS_DIR") {
            config.tickers_dir = dir;
        }
        if let Ok(dir) = env::var("TACTIX_REPORTS_DIR") {
            config.reports_dir = dir;
        }
        if let Ok(url) = env::var("TACTIX_DATA_URL") {
            config.data_base_url = Some(url);
        }
        if let Ok(delay) = env::var("TACTIX_REQUEST_DELAY_MS") {
            if let Ok(delay) = delay.parse() {
                config.request_delay_ms = delay;
            }
        }
        config
    }

    pub fn class(&self, class: AssetClass) -> &ClassConfig {
        match class {
            AssetClass::Equities => &self.equities,
            AssetClass::Bonds => &self.bonds,
            AssetClass::Commodities => &self.commodities,
            AssetClass::Gold => &self.gold,
        }
    }
}

/// Deployment environment, used to pick the log format.
pub fn get_environment() -> String {
    env::var("TACTIX_ENV").unwrap_or_else(|_| "sandbox".to_string())
}
