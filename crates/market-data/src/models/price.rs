use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What to price on a marketplace.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    /// Free-text item title, used as the search phrase
    pub title: String,

    /// Optional marketplace category hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Optional condition label (e.g., "good", "like_new")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl PriceQuery {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A price quote returned by a marketplace provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    /// Estimated price in whole currency units (SEK)
    pub price: f64,

    /// Provider confidence normalized to `[0, 1]`
    pub confidence: f64,

    /// Where the estimate came from, if the provider exposes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Provider that produced the estimate
    pub provider: String,

    pub fetched_at: DateTime<Utc>,
}
