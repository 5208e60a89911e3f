//! Instrument universe loading.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::models::AssetClass;

/// Symbols for an asset class: the newline-delimited list written by the
/// fundamental screening stage when present, the built-in default list
/// otherwise.
pub fn load_universe(class: AssetClass, config: &Config) -> Vec<String> {
    let path = Path::new(&config.tickers_dir).join(format!("{}_list.txt", class.name()));
    match fs::read_to_string(&path) {
        Ok(text) => {
            let symbols: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect();
            if symbols.is_empty() {
                warn!(class = %class, path = %path.display(), "universe file is empty, using default list");
                config.class(class).default_universe.clone()
            } else {
                info!(class = %class, count = symbols.len(), "loaded universe from file");
                symbols
            }
        }
        Err(_) => {
            info!(class = %class, "no universe file, using default list");
            config.class(class).default_universe.clone()
        }
    }
}
