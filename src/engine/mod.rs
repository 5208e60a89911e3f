//! Orchestration: per-class pipelines and the portfolio-level manager.

pub mod manager;
pub mod orchestrator;
pub mod universe;

pub use manager::{
    ComprehensiveReport, PortfolioTechnicalManager, RankedSignal, TradingSummary, ValidationReport,
};
pub use orchestrator::{AssetClassOrchestrator, ClassReport};
pub use universe::load_universe;
