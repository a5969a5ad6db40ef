//! Products being valued and the new-price oracle contract.

mod products_model;
mod products_traits;

pub use products_model::*;
pub use products_traits::*;
