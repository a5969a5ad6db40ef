//! Valuation from a marketplace pricing endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use resellbot_market_data::PricingProvider;

use super::method_traits::ValuationMethod;
use crate::errors::Result;
use crate::products::ProductInfo;
use crate::valuation::ValuationInput;
use crate::valuation_types::ValuationMethodKind;

pub struct TraderaValuationMethod {
    provider: Arc<dyn PricingProvider>,
}

impl TraderaValuationMethod {
    pub fn new(provider: Arc<dyn PricingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ValuationMethod for TraderaValuationMethod {
    fn kind(&self) -> ValuationMethodKind {
        ValuationMethodKind::Tradera
    }

    fn is_available(&self) -> bool {
        self.provider.is_enabled()
    }

    async fn valuate(&self, product: &ProductInfo) -> Result<ValuationInput> {
        let estimate = self
            .provider
            .get_price_estimate(&product.price_query())
            .await?;

        debug!(
            "{} quoted {:.0} for '{}' ({:.0}% confidence)",
            estimate.provider,
            estimate.price,
            product.title,
            estimate.confidence * 100.0
        );

        Ok(
            ValuationInput::new(self.name(), estimate.price.round() as i64, estimate.confidence)
                .with_source_url(estimate.source_url)
                .with_metadata("provider", estimate.provider),
        )
    }
}
