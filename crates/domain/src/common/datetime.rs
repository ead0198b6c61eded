//! Epoch-millisecond conversions.
//!
//! Drafts are persisted with JavaScript-style `Date.now()` timestamps so the
//! same record can be read by the browser build and the desktop build.

use chrono::{DateTime, Utc};

/// Converts a UTC timestamp to milliseconds since the Unix epoch.
pub fn to_epoch_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Converts milliseconds since the Unix epoch back to a UTC timestamp.
///
/// Returns `None` if the value is outside chrono's representable range.
///
/// # Examples
///
/// ```
/// use magnetiq_domain::common::from_epoch_millis;
/// use chrono::Datelike;
///
/// let dt = from_epoch_millis(1_700_000_000_000).unwrap();
/// assert_eq!(dt.year(), 2023);
/// assert!(from_epoch_millis(i64::MAX).is_none());
/// ```
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
