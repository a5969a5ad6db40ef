//! Tradera pricing endpoint response models.
//!
//! The endpoint answers in one of two shapes:
//!
//! ```text
//! {"price": 1250, "confidence": 80}                          (flat)
//! {"data": {"valuation": "1250", "confidence": "80"}}        (nested)
//! ```
//!
//! Both shapes carry confidence on a 0-100 scale. The nested shape
//! encodes numbers as strings. Parsing tries the flat shape first and falls
//! back to the nested one; there is no schema negotiation.

use serde::Deserialize;

/// Confidence assumed when the endpoint omits one (0-100 scale).
const DEFAULT_CONFIDENCE_PERCENT: f64 = 50.0;

/// A number that may arrive either as a JSON number or as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatPriceResponse {
    price: f64,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default, alias = "url")]
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NestedPriceResponse {
    data: NestedPriceData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NestedPriceData {
    valuation: LooseNumber,
    #[serde(default)]
    confidence: Option<LooseNumber>,
    #[serde(default, alias = "url")]
    source_url: Option<String>,
}

/// Price and confidence extracted from a response body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedPrice {
    pub price: f64,
    /// Normalized to `[0, 1]`
    pub confidence: f64,
    pub source_url: Option<String>,
}

/// Parse a pricing response, accepting either the flat or the nested shape.
pub(crate) fn parse_price_response(body: &str) -> Result<ParsedPrice, String> {
    if let Ok(flat) = serde_json::from_str::<FlatPriceResponse>(body) {
        let confidence = flat.confidence.unwrap_or(DEFAULT_CONFIDENCE_PERCENT) / 100.0;
        return finish(flat.price, confidence, flat.source_url);
    }

    let nested: NestedPriceResponse = serde_json::from_str(body)
        .map_err(|e| format!("body matches neither flat nor nested shape: {}", e))?;

    let price = nested
        .data
        .valuation
        .as_f64()
        .ok_or_else(|| "valuation is not a number".to_string())?;

    let confidence_percent = match nested.data.confidence {
        Some(raw) => raw
            .as_f64()
            .ok_or_else(|| "confidence is not a number".to_string())?,
        None => DEFAULT_CONFIDENCE_PERCENT,
    };

    finish(price, confidence_percent / 100.0, nested.data.source_url)
}

fn finish(price: f64, confidence: f64, source_url: Option<String>) -> Result<ParsedPrice, String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("price out of range: {}", price));
    }
    if !confidence.is_finite() {
        return Err("confidence is not finite".to_string());
    }
    Ok(ParsedPrice {
        price,
        confidence: confidence.clamp(0.0, 1.0),
        source_url,
    })
}
