//! Resellbot Market Data Crate
//!
//! This crate fetches resale price quotes from external marketplaces for the
//! valuation engine.
//!
//! # Overview
//!
//! - [`PricingProvider`] - the trait every marketplace integration implements
//! - [`TraderaProvider`] - HTTP client for a Tradera-style valuation endpoint
//! - [`PriceQuery`] / [`PriceEstimate`] - request and response models
//! - [`MarketDataError`] - provider failures, classified by [`is_transient`]
//!
//! Providers never retry. A failed or cancelled call surfaces as an error and
//! the caller decides what to do with it.
//!
//! [`is_transient`]: MarketDataError::is_transient

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{PriceEstimate, PriceQuery};
pub use provider::tradera::{TraderaConfig, TraderaProvider};
pub use provider::PricingProvider;
