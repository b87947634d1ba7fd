use chrono::{DateTime, NaiveDate, Utc};

/// UTC calendar date of an epoch-seconds timestamp.
pub fn utc_date(timestamp: u64) -> Option<NaiveDate> {
    utc_datetime(timestamp).map(|dt| dt.date_naive())
}

/// `None` when the timestamp is outside chrono's range.
pub fn utc_datetime(timestamp: u64) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(timestamp).ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn utc_datetime_label(timestamp: u64) -> Option<String> {
    utc_datetime(timestamp).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// `YYYY-MM-DD` key for the UTC day containing `timestamp`.
pub fn utc_date_key(timestamp: u64) -> Option<String> {
    utc_date(timestamp).map(|d| d.format("%Y-%m-%d").to_string())
}
