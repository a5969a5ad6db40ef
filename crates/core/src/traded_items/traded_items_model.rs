//! Traded item domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::SUB_UNITS_PER_UNIT;
use crate::utils::time_utils::days_between;

/// An item the seller bought and (possibly) resold.
///
/// Prices are stored in sub-units (öre), the way the sales ledger keeps them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradedItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub buy_date: Option<NaiveDate>,
    #[serde(default)]
    pub sell_date: Option<NaiveDate>,
    /// Purchase price in öre
    #[serde(default)]
    pub buy_price: Option<i64>,
    /// Sale price in öre
    #[serde(default)]
    pub sell_price: Option<i64>,
}

impl TradedItem {
    /// Whole days between purchase and sale, when both dates are known.
    pub fn days_on_market(&self) -> Option<i64> {
        match (self.buy_date, self.sell_date) {
            (Some(buy), Some(sell)) => Some(days_between(buy, sell)),
            _ => None,
        }
    }

    /// Sale price converted to whole SEK.
    pub fn sell_price_units(&self) -> Option<f64> {
        self.sell_price.map(|p| p as f64 / SUB_UNITS_PER_UNIT)
    }
}
