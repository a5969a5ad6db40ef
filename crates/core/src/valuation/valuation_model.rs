//! Valuation domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One source's opinion of what an item is worth.
///
/// `value == 0` means "no usable estimate" and `confidence == 0` means
/// "discard this input"; the compiler skips both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    /// Source label, e.g. "Egen databas"
    pub valuation_type: String,
    /// Estimate in whole SEK
    pub value: i64,
    /// Reliability in `[0, 1]`
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub collected_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_to_sell: Option<f64>,
}

impl ValuationInput {
    pub fn new(valuation_type: impl Into<String>, value: i64, confidence: f64) -> Self {
        Self {
            valuation_type: valuation_type.into(),
            value,
            confidence,
            source_url: None,
            metadata: Map::new(),
            collected_at: Utc::now(),
            sold_count: None,
            days_to_sell: None,
        }
    }

    /// An input that carries no estimate.
    pub fn empty(valuation_type: impl Into<String>) -> Self {
        Self::new(valuation_type, 0, 0.0)
    }

    /// Whether the compiler should use this input.
    pub fn is_valid(&self) -> bool {
        self.value > 0 && self.confidence.is_finite() && self.confidence > 0.0
    }

    pub fn with_source_url(mut self, source_url: Option<String>) -> Self {
        self.source_url = source_url;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// The compiled recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationOutput {
    /// Recommended price in SEK
    pub recommended_price: f64,
    /// Aggregate reliability in `[0, 1]`
    pub confidence: f64,
    pub reasoning: String,
    /// The inputs that contributed
    pub individual_vals: Vec<ValuationInput>,
    /// False when the price exceeds the sanity bound against the new price
    pub is_reasonable: bool,
    /// `recommended_price / new_price`, when a new price was known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_price_ratio: Option<f64>,
    pub compiled_at: DateTime<Utc>,
}

impl ValuationOutput {
    /// The result when no source produced a usable estimate.
    pub fn zero() -> Self {
        Self {
            recommended_price: 0.0,
            confidence: 0.0,
            reasoning: "No valuation source produced a usable estimate".to_string(),
            individual_vals: Vec::new(),
            is_reasonable: true,
            new_price_ratio: None,
            compiled_at: Utc::now(),
        }
    }

    pub fn has_recommendation(&self) -> bool {
        self.recommended_price > 0.0 && self.confidence > 0.0
    }
}
