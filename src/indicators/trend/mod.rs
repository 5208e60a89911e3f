pub mod adx;
pub mod ema;
pub mod sma;

pub use adx::adx;
pub use ema::{ema, ema_of_series};
pub use sma::{rolling_max, rolling_min, sma};
