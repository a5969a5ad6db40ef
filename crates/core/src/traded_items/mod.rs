//! The seller's own sales history.

mod traded_items_model;
mod traded_items_traits;

pub use traded_items_model::*;
pub use traded_items_traits::*;
