//! Resellbot Core - valuation engine for secondhand items.
//!
//! This crate holds the domain models, valuation methods, compiler and
//! weight normalization. It is storage-agnostic and defines traits that
//! collaborators (database, scraper, LLM client) implement.

pub mod constants;
pub mod errors;
pub mod products;
pub mod sold_ads;
pub mod traded_items;
pub mod utils;
pub mod valuation;
pub mod valuation_types;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
