pub mod market_data;
pub mod rate_limit;
pub mod stooq;

pub use market_data::{HistoricalDataProvider, StaticProvider};
pub use rate_limit::{IntervalLimiter, NoopLimiter, RateLimiter};
pub use stooq::StooqProvider;
