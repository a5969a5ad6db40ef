//! Valuation as a condition-dependent share of the new retail price.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::method_traits::ValuationMethod;
use crate::errors::Result;
use crate::products::{NewPriceOracleTrait, ProductInfo};
use crate::valuation::ValuationInput;
use crate::valuation_types::ValuationMethodKind;

/// Confidence used when the oracle does not report its own.
pub const DEFAULT_NEW_PRICE_CONFIDENCE: f64 = 0.4;

pub struct LlmNewPriceMethod {
    oracle: Arc<dyn NewPriceOracleTrait>,
    default_confidence: f64,
}

impl LlmNewPriceMethod {
    pub fn new(oracle: Arc<dyn NewPriceOracleTrait>) -> Self {
        Self {
            oracle,
            default_confidence: DEFAULT_NEW_PRICE_CONFIDENCE,
        }
    }
}

#[async_trait]
impl ValuationMethod for LlmNewPriceMethod {
    fn kind(&self) -> ValuationMethodKind {
        ValuationMethodKind::LlmNewPrice
    }

    async fn valuate(&self, product: &ProductInfo) -> Result<ValuationInput> {
        let estimate = self.oracle.estimate_new_price(product).await?;

        let (new_price, confidence, source) = match estimate {
            Some(e) if e.new_price.is_finite() && e.new_price > 0.0 => {
                let confidence = e
                    .confidence
                    .filter(|c| c.is_finite())
                    .map(|c| c.clamp(0.0, 1.0))
                    .unwrap_or(self.default_confidence);
                (e.new_price, confidence, e.source)
            }
            _ => match product.reference_new_price() {
                Some(price) => (price, self.default_confidence, None),
                None => {
                    debug!("No new price known for '{}'", product.title);
                    return Ok(ValuationInput::empty(self.name()));
                }
            },
        };

        let factor = product.condition_factor();
        let value = (new_price * factor).round() as i64;

        let mut input = ValuationInput::new(self.name(), value, confidence)
            .with_metadata("newPrice", new_price)
            .with_metadata("conditionFactor", factor);
        if let Some(source) = source {
            input = input.with_metadata("source", source);
        }
        Ok(input)
    }
}
