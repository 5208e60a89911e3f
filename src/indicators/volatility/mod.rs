pub mod atr;
pub mod bollinger;
pub mod realized;

pub use atr::atr;
pub use bollinger::{bollinger, rolling_stddev};
pub use realized::realized_volatility;
