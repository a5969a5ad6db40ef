//! Valuation types and their per-product blend weights.
//!
//! - [`valuation_types_model`] - catalog entries and per-product configuration rows
//! - [`weight_normalizer`] - keeps active weights summing to 100
//! - [`valuation_types_service`] - applies configuration changes through the normalizer

mod valuation_types_model;
mod valuation_types_service;
mod valuation_types_traits;
mod weight_normalizer;

pub use valuation_types_model::*;
pub use valuation_types_service::*;
pub use valuation_types_traits::*;
pub use weight_normalizer::*;
