//! Merges the estimates of several valuation methods into one recommendation.
//!
//! # Algorithm
//! 1. Keep inputs with `value > 0` and `confidence > 0`.
//! 2. None left: the zero output.
//! 3. One left: its value and confidence pass through unchanged.
//! 4. Otherwise a confidence-weighted average of both price and confidence:
//!    `price = Σ(v·c) / Σc`, `confidence = Σ(c·c) / Σc`.
//! 5. With a known new price, a result above `MAX_VALUATION_RATIO` times it
//!    is flagged (and logged) but still returned.

use chrono::Utc;
use log::{debug, warn};

use super::valuation_model::{ValuationInput, ValuationOutput};
use crate::constants::{CURRENCY, MAX_VALUATION_RATIO};

/// Confidence-weighted valuation compiler. Stateless and commutative over its inputs.
#[derive(Debug, Clone)]
pub struct ValuationCompiler {
    max_valuation_ratio: f64,
}

impl Default for ValuationCompiler {
    fn default() -> Self {
        Self {
            max_valuation_ratio: MAX_VALUATION_RATIO,
        }
    }
}

impl ValuationCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_valuation_ratio(max_valuation_ratio: f64) -> Self {
        Self {
            max_valuation_ratio,
        }
    }

    /// Compile `inputs` into one recommendation.
    ///
    /// `new_price` is the known new retail price in SEK; without it no sanity
    /// bound is applied.
    pub fn compile(&self, inputs: &[ValuationInput], new_price: Option<f64>) -> ValuationOutput {
        let valid: Vec<ValuationInput> = inputs.iter().filter(|i| i.is_valid()).cloned().collect();

        if valid.len() < inputs.len() {
            debug!(
                "Ignoring {} of {} valuation inputs without a usable estimate",
                inputs.len() - valid.len(),
                inputs.len()
            );
        }

        if valid.is_empty() {
            return ValuationOutput::zero();
        }

        let (recommended_price, confidence) = if valid.len() == 1 {
            (valid[0].value as f64, valid[0].confidence)
        } else {
            let total_confidence: f64 = valid.iter().map(|i| i.confidence).sum();
            let weighted_price: f64 = valid.iter().map(|i| i.value as f64 * i.confidence).sum();
            let weighted_confidence: f64 = valid.iter().map(|i| i.confidence * i.confidence).sum();
            (
                weighted_price / total_confidence,
                weighted_confidence / total_confidence,
            )
        };

        let new_price_ratio = new_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .map(|p| recommended_price / p);
        let is_reasonable = new_price_ratio
            .map(|ratio| ratio <= self.max_valuation_ratio)
            .unwrap_or(true);

        let mut reasoning = describe_sources(&valid, recommended_price);
        if let (false, Some(ratio), Some(reference)) = (is_reasonable, new_price_ratio, new_price) {
            warn!(
                "Valuation of {:.0} {} is {:.1}x the new price {:.0} {} (limit {:.0}x)",
                recommended_price, CURRENCY, ratio, reference, CURRENCY, self.max_valuation_ratio
            );
            reasoning.push_str(&format!(
                " Warning: the recommendation is {:.1}x the new price of {:.0} {} and is likely wrong.",
                ratio, reference, CURRENCY
            ));
        }

        ValuationOutput {
            recommended_price,
            confidence,
            reasoning,
            individual_vals: valid,
            is_reasonable,
            new_price_ratio,
            compiled_at: Utc::now(),
        }
    }
}

/// Human-readable summary of which sources contributed and how much.
fn describe_sources(valid: &[ValuationInput], recommended_price: f64) -> String {
    if let [single] = valid {
        return format!(
            "Based on a single source: {} ({} {}, {:.0}% confidence).",
            single.valuation_type,
            single.value,
            CURRENCY,
            single.confidence * 100.0
        );
    }

    let total_confidence: f64 = valid.iter().map(|i| i.confidence).sum();
    let parts: Vec<String> = valid
        .iter()
        .map(|i| {
            format!(
                "{} {} {} ({:.0}% influence)",
                i.valuation_type,
                i.value,
                CURRENCY,
                i.confidence / total_confidence * 100.0
            )
        })
        .collect();

    format!(
        "Confidence-weighted average of {} sources giving {:.0} {}: {}.",
        valid.len(),
        recommended_price,
        CURRENCY,
        parts.join(", ")
    )
}
