//! Repository and service traits for valuation-type configuration.

use async_trait::async_trait;

use super::valuation_types_model::{ProductValuationTypeConfig, ValuationType};
use crate::errors::Result;

/// Storage for per-product valuation-type configuration rows.
#[async_trait]
pub trait ProductValuationTypeRepositoryTrait: Send + Sync {
    /// All configuration rows of one product. Empty when the product has none yet.
    fn get_by_product(&self, product_id: i64) -> Result<Vec<ProductValuationTypeConfig>>;

    /// Replace all configuration rows of one product.
    async fn save_for_product(
        &self,
        product_id: i64,
        configs: &[ProductValuationTypeConfig],
    ) -> Result<()>;
}

/// Trait defining the contract for valuation-type configuration operations.
#[async_trait]
pub trait ValuationTypeServiceTrait: Send + Sync {
    /// The valuation type catalog.
    fn list_valuation_types(&self) -> Vec<ValuationType>;

    /// Configuration of one product, seeding defaults on first access.
    async fn get_product_configs(&self, product_id: i64) -> Result<Vec<ProductValuationTypeConfig>>;

    /// Enable or disable one valuation type for a product and renormalize.
    async fn set_active(
        &self,
        product_id: i64,
        valuation_type_id: i64,
        is_active: bool,
    ) -> Result<Vec<ProductValuationTypeConfig>>;

    /// Change the raw blend weight of one valuation type and renormalize.
    async fn set_weight(
        &self,
        product_id: i64,
        valuation_type_id: i64,
        weight: f64,
    ) -> Result<Vec<ProductValuationTypeConfig>>;
}
