//! Valuation from the seller's own closed sales.
//!
//! The estimate is a recency-weighted mean of sale prices. Prices are stored
//! in öre and converted to whole SEK before they leave this module. The same
//! sales also feed a [`HistoricalValuation`] whose trend is reported in the
//! input's metadata.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use super::method_traits::ValuationMethod;
use crate::constants::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_TARGET_DAYS, RECENCY_HALF_LIFE_DAYS, SUB_UNITS_PER_UNIT,
};
use crate::errors::Result;
use crate::products::ProductInfo;
use crate::traded_items::{TradedItem, TradedItemRepositoryTrait};
use crate::utils::time_utils::valuation_date_today;
use crate::valuation::historical_model::{sell_probability, HistoricalValuation};
use crate::valuation::recency::{confidence_for_sample_size, sale_weight, weighted_mean};
use crate::valuation::ValuationInput;
use crate::valuation_types::ValuationMethodKind;

pub struct DatabaseValuationMethod {
    repository: Arc<dyn TradedItemRepositoryTrait>,
    history_limit: usize,
    target_days: i64,
}

impl DatabaseValuationMethod {
    pub fn new(repository: Arc<dyn TradedItemRepositoryTrait>) -> Self {
        Self {
            repository,
            history_limit: DEFAULT_HISTORY_LIMIT,
            target_days: DEFAULT_TARGET_DAYS,
        }
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn with_target_days(mut self, target_days: i64) -> Self {
        self.target_days = target_days;
        self
    }

    /// Recency weight of one sale: 1.0 if sold today, strictly less the older it is.
    pub fn calculate_weight(&self, item: &TradedItem, today: NaiveDate) -> f64 {
        sale_weight(item.sell_date, today)
    }

    /// Confidence from the number of sales used. Dispersion is not considered.
    pub fn calculate_confidence(&self, item_count: usize) -> f64 {
        confidence_for_sample_size(item_count)
    }

    /// Recency-weighted mean sale price in whole SEK, or `None` without priced sales.
    pub fn calculate_weighted_price(&self, items: &[TradedItem], today: NaiveDate) -> Option<i64> {
        let mean = weighted_mean(items.iter().filter_map(|item| {
            let price = item.sell_price_units().filter(|p| *p > 0.0)?;
            Some((price, self.calculate_weight(item, today)))
        }))?;

        Some(mean.round() as i64)
    }

    /// Build the input from already fetched sales.
    pub fn build_input(&self, items: &[TradedItem], today: NaiveDate) -> ValuationInput {
        let priced: Vec<&TradedItem> = items
            .iter()
            .filter(|item| item.sell_price.map(|p| p > 0).unwrap_or(false))
            .collect();

        let Some(value) = self.calculate_weighted_price(items, today) else {
            debug!("No priced sales in history, database method has no estimate");
            return ValuationInput::empty(self.name());
        };

        let confidence = self.calculate_confidence(priced.len());

        let holding_periods: Vec<i64> = priced
            .iter()
            .filter_map(|item| item.days_on_market())
            .collect();
        let average_days = if holding_periods.is_empty() {
            None
        } else {
            Some(holding_periods.iter().sum::<i64>() as f64 / holding_periods.len() as f64)
        };

        let mut input = ValuationInput::new(self.name(), value, confidence)
            .with_metadata("sampleSize", priced.len())
            .with_metadata("halfLifeDays", RECENCY_HALF_LIFE_DAYS)
            .with_metadata("targetDays", self.target_days);
        input.sold_count = Some(priced.len() as u32);
        input.days_to_sell = average_days;

        let trend = HistoricalValuation::fit(items);
        if trend.has_data {
            input = input
                .with_metadata("kValue", trend.k_value / SUB_UNITS_PER_UNIT)
                .with_metadata("intercept", trend.intercept / SUB_UNITS_PER_UNIT);

            let predicted = trend.price_for_days(self.target_days) / SUB_UNITS_PER_UNIT;
            if predicted > 0.0 {
                input = input.with_metadata("predictedPrice", predicted.round() as i64);
            }

            if let Some(days) = average_days {
                let probability =
                    sell_probability(days.round() as i64, self.target_days, trend.k_value);
                input = input.with_metadata("sellProbability", probability);
            }
        }

        input
    }
}

#[async_trait]
impl ValuationMethod for DatabaseValuationMethod {
    fn kind(&self) -> ValuationMethodKind {
        ValuationMethodKind::Database
    }

    async fn valuate(&self, product: &ProductInfo) -> Result<ValuationInput> {
        let items = self.repository.get_sold_traded_items(self.history_limit)?;
        debug!(
            "Database valuation of '{}' over {} closed sales",
            product.title,
            items.len()
        );
        Ok(self.build_input(&items, valuation_date_today()))
    }
}
