use chrono::{NaiveDate, Utc};

/// Millisecond-timestamp id for measurement entries. Monotonic enough for a
/// single-user tool and sortable as a string of equal length.
pub fn time_based_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
