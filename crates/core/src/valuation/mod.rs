//! Valuation engine: per-source methods, the historical sales model, and the
//! compiler that merges their estimates.

pub mod compiler;
pub mod historical_model;
pub mod methods;
pub mod recency;
mod valuation_model;
mod valuation_service;

pub use compiler::ValuationCompiler;
pub use historical_model::{sell_probability, HistoricalValuation};
pub use methods::*;
pub use valuation_model::*;
pub use valuation_service::*;

#[cfg(test)]
mod valuation_service_tests;
