//! Sold listings from other marketplaces.

mod sold_ads_model;
mod sold_ads_traits;

pub use sold_ads_model::*;
pub use sold_ads_traits::*;
