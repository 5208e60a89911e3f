pub mod fibonacci;

pub use fibonacci::{fibonacci_levels, rolling_fibonacci, swing_window};
