//! Recency weighting and sample-size confidence shared by the
//! comparable-sales valuation methods.

use chrono::NaiveDate;

use crate::constants::RECENCY_HALF_LIFE_DAYS;
use crate::utils::time_utils::days_between;

/// Weight of a sale `age_days` old: 1.0 today, halving every
/// [`RECENCY_HALF_LIFE_DAYS`]. Future-dated sales count as today.
pub fn recency_weight(age_days: i64) -> f64 {
    let age = age_days.max(0) as f64;
    0.5_f64.powf(age / RECENCY_HALF_LIFE_DAYS)
}

/// Weight of a sale on `sold_on` as seen from `today`.
///
/// A sale without a date is weighted as if it were one half-life old.
pub fn sale_weight(sold_on: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match sold_on {
        Some(date) => recency_weight(days_between(date, today)),
        None => 0.5,
    }
}

/// Confidence derived from how many comparable sales were found.
///
/// A staircase over powers of two: 2 sales give 0.3, 4 give 0.5, 8 give 0.7.
/// Dispersion is deliberately ignored.
pub fn confidence_for_sample_size(count: usize) -> f64 {
    match count {
        0 => 0.0,
        1 => 0.2,
        2..=3 => 0.3,
        4..=7 => 0.5,
        8..=15 => 0.7,
        _ => 0.8,
    }
}

/// Weighted arithmetic mean of `(value, weight)` pairs. `None` when the weights sum to 0.
pub fn weighted_mean<I>(samples: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted_sum, total_weight) = samples
        .into_iter()
        .fold((0.0, 0.0), |(ws, tw), (value, weight)| {
            (ws + value * weight, tw + weight)
        });

    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        None
    }
}
