//! Time helpers

use chrono::Utc;

/// Current unix timestamp in microseconds.
///
/// Persisted timestamps are integers so the store orders them natively;
/// microsecond precision keeps consecutive writes distinct.
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}
