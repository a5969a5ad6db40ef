use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::valuation_types_model::{
    default_valuation_types, ProductValuationTypeConfig, ValuationType,
};
use super::valuation_types_traits::{
    ProductValuationTypeRepositoryTrait, ValuationTypeServiceTrait,
};
use super::weight_normalizer::normalize_weights;
use crate::errors::{Result, ValidationError};

/// Service keeping per-product valuation-type weights consistent.
///
/// Every write goes through [`normalize_weights`] before it is persisted.
pub struct ValuationTypeService {
    repository: Arc<dyn ProductValuationTypeRepositoryTrait>,
    valuation_types: Vec<ValuationType>,
}

impl ValuationTypeService {
    pub fn new(repository: Arc<dyn ProductValuationTypeRepositoryTrait>) -> Self {
        Self::with_valuation_types(repository, default_valuation_types())
    }

    pub fn with_valuation_types(
        repository: Arc<dyn ProductValuationTypeRepositoryTrait>,
        valuation_types: Vec<ValuationType>,
    ) -> Self {
        Self {
            repository,
            valuation_types,
        }
    }

    fn ensure_known_type(&self, valuation_type_id: i64) -> Result<()> {
        if self.valuation_types.iter().any(|t| t.id == valuation_type_id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownValuationType(valuation_type_id).into())
        }
    }

    /// Stored rows completed with any catalog type the product has no row for.
    ///
    /// A product seen for the first time gets every type active; types added
    /// to the catalog later start out inactive.
    fn load_with_catalog(
        &self,
        product_id: i64,
    ) -> Result<(Vec<ProductValuationTypeConfig>, bool)> {
        let stored = self.repository.get_by_product(product_id)?;
        let first_access = stored.is_empty();

        let mut configs = stored;
        for valuation_type in &self.valuation_types {
            if !configs
                .iter()
                .any(|c| c.valuation_type_id == valuation_type.id)
            {
                configs.push(ProductValuationTypeConfig::new(
                    product_id,
                    valuation_type.id,
                    first_access,
                    0.0,
                ));
            }
        }

        Ok((configs, first_access))
    }

    async fn apply<F>(
        &self,
        product_id: i64,
        valuation_type_id: i64,
        change: F,
    ) -> Result<Vec<ProductValuationTypeConfig>>
    where
        F: FnOnce(&mut ProductValuationTypeConfig) + Send,
    {
        self.ensure_known_type(valuation_type_id)?;

        let (mut configs, _) = self.load_with_catalog(product_id)?;
        if let Some(config) = configs
            .iter_mut()
            .find(|c| c.valuation_type_id == valuation_type_id)
        {
            change(config);
        }

        let normalized = normalize_weights(&configs);
        self.repository
            .save_for_product(product_id, &normalized)
            .await?;

        debug!(
            "Saved {} valuation type configs for product {}",
            normalized.len(),
            product_id
        );
        Ok(normalized)
    }
}

#[async_trait]
impl ValuationTypeServiceTrait for ValuationTypeService {
    fn list_valuation_types(&self) -> Vec<ValuationType> {
        self.valuation_types.clone()
    }

    async fn get_product_configs(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductValuationTypeConfig>> {
        let (configs, first_access) = self.load_with_catalog(product_id)?;
        let normalized = normalize_weights(&configs);

        if first_access || normalized != configs {
            info!(
                "Seeding valuation type configuration for product {}",
                product_id
            );
            self.repository
                .save_for_product(product_id, &normalized)
                .await?;
        }

        Ok(normalized)
    }

    async fn set_active(
        &self,
        product_id: i64,
        valuation_type_id: i64,
        is_active: bool,
    ) -> Result<Vec<ProductValuationTypeConfig>> {
        info!(
            "Setting valuation type {} {} for product {}",
            valuation_type_id,
            if is_active { "active" } else { "inactive" },
            product_id
        );
        self.apply(product_id, valuation_type_id, |config| {
            config.is_active = is_active;
        })
        .await
    }

    async fn set_weight(
        &self,
        product_id: i64,
        valuation_type_id: i64,
        weight: f64,
    ) -> Result<Vec<ProductValuationTypeConfig>> {
        self.apply(product_id, valuation_type_id, |config| {
            config.weight = weight;
        })
        .await
    }
}
