//! Valuation from comparable listings that sold on other marketplaces.
//!
//! Uses the same recency weighting and sample-size confidence as the
//! database method. Ad prices are already in whole SEK.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use super::method_traits::ValuationMethod;
use crate::errors::Result;
use crate::products::ProductInfo;
use crate::sold_ads::{SoldAd, SoldAdsSourceTrait};
use crate::utils::time_utils::valuation_date_today;
use crate::valuation::recency::{confidence_for_sample_size, sale_weight, weighted_mean};
use crate::valuation::ValuationInput;
use crate::valuation_types::ValuationMethodKind;

pub struct SoldAdsValuationMethod {
    source: Arc<dyn SoldAdsSourceTrait>,
}

impl SoldAdsValuationMethod {
    pub fn new(source: Arc<dyn SoldAdsSourceTrait>) -> Self {
        Self { source }
    }

    pub fn build_input(&self, ads: &[SoldAd], today: NaiveDate) -> ValuationInput {
        let priced: Vec<&SoldAd> = ads.iter().filter(|ad| ad.price > 0).collect();

        let Some(mean) = weighted_mean(
            priced
                .iter()
                .map(|ad| (ad.price as f64, sale_weight(ad.sold_on, today))),
        ) else {
            return ValuationInput::empty(self.name());
        };

        let marketplaces: BTreeSet<&str> = priced
            .iter()
            .map(|ad| ad.marketplace.as_str())
            .filter(|m| !m.is_empty())
            .collect();

        // Undated ads sort before any dated one
        let newest_url = priced
            .iter()
            .filter(|ad| ad.url.is_some())
            .max_by_key(|ad| ad.sold_on)
            .and_then(|ad| ad.url.clone());

        let mut input = ValuationInput::new(
            self.name(),
            mean.round() as i64,
            confidence_for_sample_size(priced.len()),
        )
        .with_source_url(newest_url)
        .with_metadata("sampleSize", priced.len())
        .with_metadata("marketplaces", marketplaces.into_iter().collect::<Vec<_>>());
        input.sold_count = Some(priced.len() as u32);
        input
    }
}

#[async_trait]
impl ValuationMethod for SoldAdsValuationMethod {
    fn kind(&self) -> ValuationMethodKind {
        ValuationMethodKind::SoldAds
    }

    async fn valuate(&self, product: &ProductInfo) -> Result<ValuationInput> {
        let ads = self.source.get_comparable_sold_ads(product).await?;
        debug!("{} comparable sold ads for '{}'", ads.len(), product.title);
        Ok(self.build_input(&ads, valuation_date_today()))
    }
}
