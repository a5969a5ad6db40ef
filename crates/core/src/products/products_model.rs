//! Product domain models.

use resellbot_market_data::PriceQuery;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Resale factor applied to the new price when the condition is unknown.
pub const UNKNOWN_CONDITION_FACTOR: f64 = 0.5;

/// Physical condition of a secondhand item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemCondition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

impl ItemCondition {
    /// Share of the new retail price an item in this condition typically fetches.
    pub fn resale_factor(&self) -> f64 {
        match self {
            Self::New => 0.85,
            Self::LikeNew => 0.70,
            Self::Good => 0.55,
            Self::Fair => 0.40,
            Self::Poor => 0.25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// The item being valued, as described by the listing collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub product_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub condition: Option<ItemCondition>,
    /// Known new retail price in whole SEK, when the extraction step found one
    #[serde(default)]
    pub new_price: Option<f64>,
}

impl ProductInfo {
    pub fn new(product_id: i64, title: impl Into<String>) -> Self {
        Self {
            product_id,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if let Some(new_price) = self.new_price {
            if !new_price.is_finite() || new_price < 0.0 {
                return Err(ValidationError::InvalidInput(format!(
                    "new price must be a non-negative number, got {}",
                    new_price
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Usable reference new price for sanity checks, if any.
    pub fn reference_new_price(&self) -> Option<f64> {
        self.new_price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Resale factor for this product's condition.
    pub fn condition_factor(&self) -> f64 {
        self.condition
            .map(|c| c.resale_factor())
            .unwrap_or(UNKNOWN_CONDITION_FACTOR)
    }

    /// Marketplace query describing this product.
    pub fn price_query(&self) -> PriceQuery {
        PriceQuery {
            title: self.title.clone(),
            category: self.category.clone(),
            condition: self.condition.map(|c| c.as_str().to_string()),
        }
    }
}

/// A new-retail-price figure supplied by the language-model extraction step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceEstimate {
    /// New retail price in whole SEK
    pub new_price: f64,
    /// Self-reported reliability in `[0, 1]`, if the model gave one
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_title() {
        let product = ProductInfo::new(1, "   ");
        assert!(product.validate().is_err());

        let product = ProductInfo::new(1, "Sony WH-1000XM4");
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_new_price() {
        let product = ProductInfo {
            new_price: Some(-1.0),
            ..ProductInfo::new(1, "Sony WH-1000XM4")
        };
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_reference_new_price_ignores_zero() {
        let product = ProductInfo {
            new_price: Some(0.0),
            ..ProductInfo::new(1, "Sony WH-1000XM4")
        };
        assert_eq!(product.reference_new_price(), None);
    }

    #[test]
    fn test_condition_factor_defaults_when_unknown() {
        let product = ProductInfo::new(1, "Sony WH-1000XM4");
        assert_eq!(product.condition_factor(), UNKNOWN_CONDITION_FACTOR);

        let product = ProductInfo {
            condition: Some(ItemCondition::Good),
            ..product
        };
        assert_eq!(product.condition_factor(), 0.55);
    }

    #[test]
    fn test_price_query_carries_condition() {
        let product = ProductInfo {
            category: Some("Hörlurar".to_string()),
            condition: Some(ItemCondition::LikeNew),
            ..ProductInfo::new(1, "Sony WH-1000XM4")
        };
        let query = product.price_query();
        assert_eq!(query.title, "Sony WH-1000XM4");
        assert_eq!(query.category.as_deref(), Some("Hörlurar"));
        assert_eq!(query.condition.as_deref(), Some("like_new"));
    }
}
