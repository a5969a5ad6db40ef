//! Blend-weight normalization for per-product valuation types.
//!
//! # Algorithm
//! 1. Inactive configs get weight 0.
//! 2. With no active config, everything stays at 0.
//! 3. If no active config carries a positive weight, the active ones share 100 equally.
//! 4. Otherwise an active config with weight <= 0 (freshly reactivated) first
//!    receives the average of the currently positive weights, then all active
//!    weights are rescaled proportionally to sum to 100.
//!
//! Malformed input (negative or NaN weights) is corrected rather than rejected.

use super::valuation_types_model::ProductValuationTypeConfig;
use crate::constants::TOTAL_WEIGHT;

fn has_positive_weight(config: &ProductValuationTypeConfig) -> bool {
    config.weight.is_finite() && config.weight > 0.0
}

/// Return a normalized copy of `configs`. The argument is never mutated.
pub fn normalize_weights(
    configs: &[ProductValuationTypeConfig],
) -> Vec<ProductValuationTypeConfig> {
    let mut normalized: Vec<ProductValuationTypeConfig> = configs.to_vec();

    for config in normalized.iter_mut().filter(|c| !c.is_active) {
        config.weight = 0.0;
    }

    let active_count = normalized.iter().filter(|c| c.is_active).count();
    if active_count == 0 {
        return normalized;
    }

    let (total_positive, positive_count) = normalized
        .iter()
        .filter(|c| c.is_active && has_positive_weight(c))
        .fold((0.0, 0usize), |(sum, n), c| (sum + c.weight, n + 1));

    if positive_count == 0 || total_positive <= 0.0 {
        let share = TOTAL_WEIGHT / active_count as f64;
        for config in normalized.iter_mut().filter(|c| c.is_active) {
            config.weight = share;
        }
        return normalized;
    }

    let baseline = total_positive / positive_count as f64;
    for config in normalized.iter_mut().filter(|c| c.is_active) {
        if !has_positive_weight(config) {
            config.weight = baseline;
        }
    }

    let active_total: f64 = normalized
        .iter()
        .filter(|c| c.is_active)
        .map(|c| c.weight)
        .sum();

    for config in normalized.iter_mut().filter(|c| c.is_active) {
        config.weight = config.weight / active_total * TOTAL_WEIGHT;
    }

    normalized
}

/// Sum of the weights of active configs.
pub fn active_weight_sum(configs: &[ProductValuationTypeConfig]) -> f64 {
    configs
        .iter()
        .filter(|c| c.is_active)
        .map(|c| c.weight)
        .sum()
}
