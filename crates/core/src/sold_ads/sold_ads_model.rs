use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A listing that sold on another tracked marketplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoldAd {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub marketplace: String,
    /// Final price in whole SEK
    pub price: i64,
    #[serde(default)]
    pub sold_on: Option<NaiveDate>,
    #[serde(default)]
    pub url: Option<String>,
}
