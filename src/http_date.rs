// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! HTTP-date parsing and clock comparison.

use chrono::{DateTime, Utc};

/// Largest difference between a `Date` field and the reference clock that is
/// still considered correct.
pub const MAX_CLOCK_SKEW_SECS: i64 = 30;

/// Parse an HTTP-date (IMF-fixdate, or the obsolete RFC 850 / asctime forms)
/// into a UTC timestamp. Returns `None` when the value is not a date.
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    httpdate::parse_http_date(s).ok().map(DateTime::<Utc>::from)
}

/// Signed difference in seconds between `date` and `now` (positive when the
/// date is in the future).
pub fn skew_seconds(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    date.signed_duration_since(now).num_seconds()
}
