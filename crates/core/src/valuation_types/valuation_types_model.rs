//! Valuation type catalog and per-product configuration models.

use serde::{Deserialize, Serialize};

/// The built-in valuation strategies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValuationMethodKind {
    Database,
    LlmNewPrice,
    Tradera,
    SoldAds,
}

impl ValuationMethodKind {
    /// Lower values are evaluated and trusted first.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Database => 1,
            Self::LlmNewPrice => 2,
            Self::Tradera => 3,
            Self::SoldAds => 4,
        }
    }

    /// Display label, also used as `ValuationInput::valuation_type`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Database => "Egen databas",
            Self::LlmNewPrice => "Nypris (AI)",
            Self::Tradera => "Tradera",
            Self::SoldAds => "Sålda annonser",
        }
    }

    pub fn all() -> [ValuationMethodKind; 4] {
        [Self::Database, Self::LlmNewPrice, Self::Tradera, Self::SoldAds]
    }
}

/// A valuation type as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationType {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub method: ValuationMethodKind,
}

/// The catalog shipped with the application. Ids follow method priority.
pub fn default_valuation_types() -> Vec<ValuationType> {
    ValuationMethodKind::all()
        .into_iter()
        .map(|kind| ValuationType {
            id: kind.priority() as i64,
            name: kind.label().to_string(),
            description: match kind {
                ValuationMethodKind::Database => {
                    "Recency-weighted average of your own closed sales".to_string()
                }
                ValuationMethodKind::LlmNewPrice => {
                    "New retail price from the language model, depreciated by condition"
                        .to_string()
                }
                ValuationMethodKind::Tradera => "Price quote from the Tradera endpoint".to_string(),
                ValuationMethodKind::SoldAds => {
                    "Comparable sold listings on other marketplaces".to_string()
                }
            },
            method: kind,
        })
        .collect()
}

/// Whether one valuation type is used for one product, and its blend weight.
///
/// Across one product, active weights sum to 100 and inactive weights are 0
/// once the configuration has been through `normalize_weights`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductValuationTypeConfig {
    pub product_id: i64,
    pub valuation_type_id: i64,
    pub is_active: bool,
    pub weight: f64,
}

impl ProductValuationTypeConfig {
    pub fn new(product_id: i64, valuation_type_id: i64, is_active: bool, weight: f64) -> Self {
        Self {
            product_id,
            valuation_type_id,
            is_active,
            weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_are_fixed() {
        assert_eq!(ValuationMethodKind::Database.priority(), 1);
        assert_eq!(ValuationMethodKind::LlmNewPrice.priority(), 2);
        assert_eq!(ValuationMethodKind::Tradera.priority(), 3);
        assert_eq!(ValuationMethodKind::SoldAds.priority(), 4);
    }

    #[test]
    fn test_default_catalog_ids_follow_priority() {
        let types = default_valuation_types();
        assert_eq!(types.len(), 4);
        for t in &types {
            assert_eq!(t.id, t.method.priority() as i64);
            assert_eq!(t.name, t.method.label());
        }
        assert_eq!(types[0].name, "Egen databas");
    }
}
