//! Wall-clock and identifier helpers.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Current time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// UTC calendar day of an epoch-millisecond timestamp.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn epoch_ms_to_day(epoch_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map(|at| at.date_naive())
}

/// Generates a fresh `<prefix>-<uuid v4>` identifier.
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::{epoch_ms_to_day, new_id};
    use chrono::NaiveDate;

    #[test]
    fn ids_carry_prefix_and_are_unique() {
        let first = new_id("node");
        let second = new_id("node");
        assert!(first.starts_with("node-"));
        assert_ne!(first, second);
    }

    #[test]
    fn epoch_day_uses_utc() {
        // 2024-03-01T23:30:00Z
        let day = epoch_ms_to_day(1_709_335_800_000).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
