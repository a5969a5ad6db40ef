use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info, warn};

use super::compiler::ValuationCompiler;
use super::methods::ValuationMethod;
use super::valuation_model::{ValuationInput, ValuationOutput};
use crate::constants::DEFAULT_METHOD_TIMEOUT_SECS;
use crate::errors::{Error, Result};
use crate::products::ProductInfo;
use crate::valuation_types::{
    default_valuation_types, ProductValuationTypeConfig, ValuationMethodKind, ValuationType,
};

/// Runtime settings for [`ValuationService`].
#[derive(Debug, Clone)]
pub struct ValuationServiceConfig {
    /// Upper bound for a single method's `valuate` call
    pub method_timeout: Duration,
}

impl Default for ValuationServiceConfig {
    fn default() -> Self {
        Self {
            method_timeout: Duration::from_secs(DEFAULT_METHOD_TIMEOUT_SECS),
        }
    }
}

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Run every selected method concurrently and return the inputs that succeeded.
    async fn collect_inputs(
        &self,
        product: &ProductInfo,
        configs: &[ProductValuationTypeConfig],
    ) -> Result<Vec<ValuationInput>>;

    /// Collect inputs and compile them into one recommendation.
    async fn valuate_product(
        &self,
        product: &ProductInfo,
        configs: &[ProductValuationTypeConfig],
    ) -> Result<ValuationOutput>;
}

/// Fans a product out to the registered valuation methods and compiles the result.
///
/// A method that errors or exceeds `method_timeout` is logged and left out;
/// it is never retried here.
pub struct ValuationService {
    methods: Vec<Arc<dyn ValuationMethod>>,
    valuation_types: Vec<ValuationType>,
    compiler: ValuationCompiler,
    config: ValuationServiceConfig,
}

impl ValuationService {
    pub fn new(methods: Vec<Arc<dyn ValuationMethod>>) -> Self {
        let mut methods = methods;
        methods.sort_by_key(|m| m.priority());
        Self {
            methods,
            valuation_types: default_valuation_types(),
            compiler: ValuationCompiler::new(),
            config: ValuationServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValuationServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Methods to query for a product, in priority order, with their blend weight.
    ///
    /// Without any configuration rows every available method runs. Otherwise
    /// only methods whose valuation type is active do.
    fn select_methods(
        &self,
        configs: &[ProductValuationTypeConfig],
    ) -> Vec<(Arc<dyn ValuationMethod>, Option<f64>)> {
        let weights: Option<HashMap<ValuationMethodKind, f64>> = if configs.is_empty() {
            None
        } else {
            Some(
                configs
                    .iter()
                    .filter(|c| c.is_active)
                    .filter_map(|c| {
                        let kind = self
                            .valuation_types
                            .iter()
                            .find(|t| t.id == c.valuation_type_id)
                            .map(|t| t.method);
                        if kind.is_none() {
                            warn!(
                                "Product {} references unknown valuation type {}",
                                c.product_id, c.valuation_type_id
                            );
                        }
                        kind.map(|k| (k, c.weight))
                    })
                    .collect(),
            )
        };

        self.methods
            .iter()
            .filter(|m| {
                if m.is_available() {
                    true
                } else {
                    debug!("Skipping unavailable valuation method {}", m.name());
                    false
                }
            })
            .filter_map(|m| match &weights {
                None => Some((m.clone(), None)),
                Some(w) => w.get(&m.kind()).map(|weight| (m.clone(), Some(*weight))),
            })
            .collect()
    }
}

/// New price reported by a method that looked one up (the oracle-backed one).
fn estimated_new_price(inputs: &[ValuationInput]) -> Option<f64> {
    inputs
        .iter()
        .filter_map(|i| i.metadata.get("newPrice").and_then(|v| v.as_f64()))
        .find(|p| p.is_finite() && *p > 0.0)
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn collect_inputs(
        &self,
        product: &ProductInfo,
        configs: &[ProductValuationTypeConfig],
    ) -> Result<Vec<ValuationInput>> {
        product.validate()?;

        let selected = self.select_methods(configs);
        let timeout = self.config.method_timeout;

        let futures = selected.iter().map(|(method, weight)| async move {
            let result = match tokio::time::timeout(timeout, method.valuate(product)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout {
                    method: method.name().to_string(),
                }),
            };
            (method.name(), *weight, result)
        });

        let results = join_all(futures).await;

        let mut inputs = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (name, weight, result) in results {
            match result {
                Ok(input) => {
                    let input = match weight {
                        Some(w) => input.with_metadata("blendWeight", w),
                        None => input,
                    };
                    inputs.push(input);
                }
                Err(e) => failures.push((name, e.to_string())),
            }
        }

        if !failures.is_empty() {
            warn!(
                "{} of {} valuation methods failed for product {}: {:?}",
                failures.len(),
                selected.len(),
                product.product_id,
                failures
            );
        }

        Ok(inputs)
    }

    async fn valuate_product(
        &self,
        product: &ProductInfo,
        configs: &[ProductValuationTypeConfig],
    ) -> Result<ValuationOutput> {
        let inputs = self.collect_inputs(product, configs).await?;
        let new_price = product
            .reference_new_price()
            .or_else(|| estimated_new_price(&inputs));
        let output = self.compiler.compile(&inputs, new_price);

        info!(
            "Valued product {} at {:.0} ({:.0}% confidence, {} sources)",
            product.product_id,
            output.recommended_price,
            output.confidence * 100.0,
            output.individual_vals.len()
        );

        Ok(output)
    }
}
