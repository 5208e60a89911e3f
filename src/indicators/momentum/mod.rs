pub mod macd;
pub mod roc;
pub mod rsi;

pub use macd::macd;
pub use roc::roc;
pub use rsi::rsi;
