use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone used to turn timestamps into sale dates.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::Europe::Stockholm;

/// Converts a UTC instant to a calendar date in the given timezone.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the default valuation timezone.
pub fn valuation_date_today() -> NaiveDate {
    valuation_date_from_utc(Utc::now(), DEFAULT_VALUATION_TZ)
}

/// Whole days from `start` to `end`. Negative when `end` precedes `start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
