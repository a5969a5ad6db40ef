use async_trait::async_trait;

use super::sold_ads_model::SoldAd;
use crate::errors::Result;
use crate::products::ProductInfo;

/// Sold listings on other marketplaces, as collected by the scraper.
#[async_trait]
pub trait SoldAdsSourceTrait: Send + Sync {
    /// Sold listings comparable to `product`.
    async fn get_comparable_sold_ads(&self, product: &ProductInfo) -> Result<Vec<SoldAd>>;
}
