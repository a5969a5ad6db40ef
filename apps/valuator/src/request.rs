//! Valuation request files and the in-memory collaborators they populate.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use resellbot_core::products::{NewPriceEstimate, NewPriceOracleTrait, ProductInfo};
use resellbot_core::sold_ads::{SoldAd, SoldAdsSourceTrait};
use resellbot_core::traded_items::{TradedItem, TradedItemRepositoryTrait};
use resellbot_core::valuation_types::{
    ProductValuationTypeConfig, ProductValuationTypeRepositoryTrait,
};
use resellbot_core::{Error, Result};

/// Everything needed to value one product without a database or scraper.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    pub product: ProductInfo,
    #[serde(default)]
    pub traded_items: Vec<TradedItem>,
    #[serde(default)]
    pub sold_ads: Vec<SoldAd>,
    #[serde(default)]
    pub new_price_estimate: Option<NewPriceEstimate>,
    /// Stored valuation-type configuration for the product, if any
    #[serde(default)]
    pub configs: Vec<ProductValuationTypeConfig>,
}

pub fn load_request(path: &Path) -> anyhow::Result<ValuationRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    let request: ValuationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid valuation request in {}", path.display()))?;
    Ok(request)
}

/// Closed sales held in memory, newest sale first.
pub struct InMemoryTradedItemRepository {
    items: Vec<TradedItem>,
}

impl InMemoryTradedItemRepository {
    pub fn new(mut items: Vec<TradedItem>) -> Self {
        items.sort_by(|a, b| b.sell_date.cmp(&a.sell_date));
        Self { items }
    }
}

impl TradedItemRepositoryTrait for InMemoryTradedItemRepository {
    fn get_sold_traded_items(&self, limit: usize) -> Result<Vec<TradedItem>> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.sell_date.is_some())
            .take(limit)
            .cloned()
            .collect())
    }
}

pub struct StaticSoldAdsSource {
    ads: Vec<SoldAd>,
}

impl StaticSoldAdsSource {
    pub fn new(ads: Vec<SoldAd>) -> Self {
        Self { ads }
    }
}

#[async_trait]
impl SoldAdsSourceTrait for StaticSoldAdsSource {
    async fn get_comparable_sold_ads(&self, _product: &ProductInfo) -> Result<Vec<SoldAd>> {
        Ok(self.ads.clone())
    }
}

/// New-price oracle answering with a figure extracted ahead of time.
pub struct StaticNewPriceOracle {
    estimate: Option<NewPriceEstimate>,
}

impl StaticNewPriceOracle {
    pub fn new(estimate: Option<NewPriceEstimate>) -> Self {
        Self { estimate }
    }
}

#[async_trait]
impl NewPriceOracleTrait for StaticNewPriceOracle {
    async fn estimate_new_price(&self, _product: &ProductInfo) -> Result<Option<NewPriceEstimate>> {
        Ok(self.estimate.clone())
    }
}

#[derive(Default)]
pub struct InMemoryValuationTypeRepository {
    rows: RwLock<HashMap<i64, Vec<ProductValuationTypeConfig>>>,
}

impl InMemoryValuationTypeRepository {
    pub fn with_rows(configs: Vec<ProductValuationTypeConfig>) -> Self {
        let mut rows: HashMap<i64, Vec<ProductValuationTypeConfig>> = HashMap::new();
        for config in configs {
            rows.entry(config.product_id).or_default().push(config);
        }
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ProductValuationTypeRepositoryTrait for InMemoryValuationTypeRepository {
    fn get_by_product(&self, product_id: i64) -> Result<Vec<ProductValuationTypeConfig>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| Error::Repository("valuation type store poisoned".to_string()))?;
        Ok(rows.get(&product_id).cloned().unwrap_or_default())
    }

    async fn save_for_product(
        &self,
        product_id: i64,
        configs: &[ProductValuationTypeConfig],
    ) -> Result<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| Error::Repository("valuation type store poisoned".to_string()))?;
        rows.insert(product_id, configs.to_vec());
        Ok(())
    }
}
