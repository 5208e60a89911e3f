//! Candidate reconciliation and bounded selection.

pub mod selection;

pub use selection::{fuse, select, PositionLimits, FORCED_CONFIDENCE};
