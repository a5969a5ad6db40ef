//! Marketplace pricing providers.
//!
//! This module contains:
//! - The `PricingProvider` trait that all providers implement
//! - Concrete provider implementations (Tradera)

mod traits;

pub mod tradera;

pub use traits::PricingProvider;
