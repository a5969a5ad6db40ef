/// A compiled price above this multiple of the known new price is flagged as unreasonable
pub const MAX_VALUATION_RATIO: f64 = 10.0;

/// Sub-units (öre) per whole currency unit (SEK)
pub const SUB_UNITS_PER_UNIT: f64 = 100.0;

/// Active valuation-type weights of one product always sum to this
pub const TOTAL_WEIGHT: f64 = 100.0;

/// Tolerance for floating-point weight and ratio comparisons
pub const WEIGHT_EPSILON: f64 = 1e-3;

/// Age in days at which a comparable sale counts half as much as one sold today
pub const RECENCY_HALF_LIFE_DAYS: f64 = 90.0;

/// Default holding period used for regression predictions
pub const DEFAULT_TARGET_DAYS: i64 = 30;

/// Default number of closed sales fetched for the database method
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Default per-method timeout in seconds
pub const DEFAULT_METHOD_TIMEOUT_SECS: u64 = 10;

/// Reporting currency
pub const CURRENCY: &str = "SEK";
