use async_trait::async_trait;

use super::products_model::{NewPriceEstimate, ProductInfo};
use crate::errors::Result;

/// Source of new-retail-price figures, backed by the LLM extraction client.
#[async_trait]
pub trait NewPriceOracleTrait: Send + Sync {
    /// Estimate what the product costs new. `Ok(None)` when the model had no usable figure.
    async fn estimate_new_price(&self, product: &ProductInfo) -> Result<Option<NewPriceEstimate>>;
}
