//! Domain models for marketplace pricing.

mod price;

pub use price::{PriceEstimate, PriceQuery};
