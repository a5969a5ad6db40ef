//! Linear regression of sale price against days on market.
//!
//! The model is fitted over the seller's closed sales and answers "what does
//! an item like this fetch if it sells after N days". Predictions are plain
//! linear extrapolations and are not clamped; a negative prediction means
//! there is no reasonable price for that holding period.

use serde::{Deserialize, Serialize};

use crate::traded_items::TradedItem;

const MIN_SELL_PROBABILITY: f64 = 0.1;
const MAX_SELL_PROBABILITY: f64 = 0.95;
const NEUTRAL_SELL_PROBABILITY: f64 = 0.5;
const SELL_PROBABILITY_STEP_PER_DAY: f64 = 0.05;

/// Regression result over one seller's closed sales.
///
/// Prices are in whatever unit the fitted items use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalValuation {
    pub has_data: bool,
    /// Price change per day on market
    pub k_value: f64,
    /// Price at day 0
    pub intercept: f64,
    pub average_price: f64,
}

impl HistoricalValuation {
    /// Ordinary least squares over `(days_on_market, sell_price)`.
    ///
    /// Items missing a buy date, sell date or sell price are skipped. Fewer
    /// than two usable points, or all points on the same day count, yield a
    /// model without data.
    pub fn fit(items: &[TradedItem]) -> Self {
        let points: Vec<(f64, f64)> = items
            .iter()
            .filter_map(|item| {
                let days = item.days_on_market()?;
                let price = item.sell_price?;
                Some((days as f64, price as f64))
            })
            .collect();

        if points.is_empty() {
            return Self::default();
        }

        let n = points.len() as f64;
        let (sum_x, sum_y, sum_xy, sum_x2) = points.iter().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(sx, sy, sxy, sx2), (x, y)| (sx + x, sy + y, sxy + x * y, sx2 + x * x),
        );

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator == 0.0 {
            return Self::default();
        }

        let k_value = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - k_value * sum_x) / n;

        Self {
            has_data: true,
            k_value,
            intercept,
            average_price: sum_y / n,
        }
    }

    /// Predicted price for an item that sells after `target_days`. 0 without data.
    pub fn price_for_days(&self, target_days: i64) -> f64 {
        if !self.has_data {
            return 0.0;
        }
        self.intercept + self.k_value * target_days as f64
    }
}

/// Heuristic probability that an item sells by `target_days`.
///
/// With a flat or rising price trend (`k_value >= 0`) the probability drops
/// as the target approaches beyond the current days on market; with a falling
/// trend it rises. Always within `[0.1, 0.95]`.
pub fn sell_probability(days_on_market: i64, target_days: i64, k_value: f64) -> f64 {
    let remaining = (target_days - days_on_market) as f64;

    let probability = if k_value >= 0.0 {
        (NEUTRAL_SELL_PROBABILITY - SELL_PROBABILITY_STEP_PER_DAY * remaining)
            .max(MIN_SELL_PROBABILITY)
    } else {
        (NEUTRAL_SELL_PROBABILITY + SELL_PROBABILITY_STEP_PER_DAY * remaining)
            .min(MAX_SELL_PROBABILITY)
    };

    probability.clamp(MIN_SELL_PROBABILITY, MAX_SELL_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn sale(days_on_market: i64, sell_price: i64) -> TradedItem {
        let buy = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TradedItem {
            id: format!("{}-{}", days_on_market, sell_price),
            buy_date: Some(buy),
            sell_date: Some(buy + Duration::days(days_on_market)),
            sell_price: Some(sell_price),
            ..Default::default()
        }
    }

    fn model(k_value: f64, intercept: f64) -> HistoricalValuation {
        HistoricalValuation {
            has_data: true,
            k_value,
            intercept,
            average_price: intercept,
        }
    }

    #[test]
    fn test_fit_exact_line() {
        // price = 1500 - 10 * days
        let items = vec![sale(0, 1500), sale(10, 1400), sale(20, 1300), sale(30, 1200)];
        let fitted = HistoricalValuation::fit(&items);

        assert!(fitted.has_data);
        assert!((fitted.k_value + 10.0).abs() < 1e-9);
        assert!((fitted.intercept - 1500.0).abs() < 1e-9);
        assert!((fitted.average_price - 1350.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_for_zero_days_is_intercept() {
        let items = vec![sale(3, 900), sale(12, 700), sale(40, 650)];
        let fitted = HistoricalValuation::fit(&items);

        assert!(fitted.has_data);
        assert_eq!(fitted.price_for_days(0), fitted.intercept);
    }

    #[test]
    fn test_price_for_days() {
        let m = model(-10.0, 1500.0);
        assert_eq!(m.price_for_days(7), 1430.0);
        assert_eq!(m.price_for_days(30), 1200.0);
    }

    #[test]
    fn test_price_for_days_is_not_clamped() {
        let m = model(-10.0, 1500.0);
        assert_eq!(m.price_for_days(200), -500.0);
    }

    #[test]
    fn test_no_data_predicts_zero() {
        let m = HistoricalValuation::default();
        assert!(!m.has_data);
        assert_eq!(m.price_for_days(0), 0.0);
        assert_eq!(m.price_for_days(30), 0.0);
    }

    #[test]
    fn test_fit_without_items_has_no_data() {
        assert!(!HistoricalValuation::fit(&[]).has_data);
    }

    #[test]
    fn test_fit_single_item_has_no_data() {
        assert!(!HistoricalValuation::fit(&[sale(5, 1000)]).has_data);
    }

    #[test]
    fn test_fit_zero_variance_has_no_data() {
        let items = vec![sale(7, 1000), sale(7, 1200), sale(7, 900)];
        assert!(!HistoricalValuation::fit(&items).has_data);
    }

    #[test]
    fn test_fit_skips_incomplete_items() {
        let mut missing_price = sale(50, 0);
        missing_price.sell_price = None;
        let mut missing_buy = sale(60, 100);
        missing_buy.buy_date = None;
        let mut unsold = sale(70, 100);
        unsold.sell_date = None;

        let items = vec![sale(0, 1000), sale(10, 900), missing_price, missing_buy, unsold];
        let fitted = HistoricalValuation::fit(&items);

        assert!(fitted.has_data);
        assert!((fitted.k_value + 10.0).abs() < 1e-9);
        assert!((fitted.intercept - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_sell_probability_falling_trend() {
        assert_eq!(sell_probability(7, 30, -10.0), 0.95);
        assert_eq!(sell_probability(14, 30, -10.0), 0.95);
        assert_eq!(sell_probability(30, 30, -10.0), 0.5);
    }

    #[test]
    fn test_sell_probability_rising_trend() {
        assert_eq!(sell_probability(7, 30, 10.0), 0.1);
        assert_eq!(sell_probability(14, 30, 10.0), 0.1);
        assert_eq!(sell_probability(30, 30, 10.0), 0.5);
    }

    #[test]
    fn test_sell_probability_past_target() {
        // Rising trend, past the target: 0.5 + 0.05 * 20 = 1.5, clamped
        assert_eq!(sell_probability(50, 30, 0.0), 0.95);
        // Falling trend, past the target: 0.5 - 0.05 * 20 = -0.5, clamped
        assert_eq!(sell_probability(50, 30, -1.0), 0.1);
    }

    #[test]
    fn test_sell_probability_intermediate() {
        let p = sell_probability(26, 30, -5.0);
        assert!((p - 0.7).abs() < 1e-9);
    }
}
