//! Timestamp formatting.
//!
//! The API reports creation times as RFC 3339 UTC timestamps with
//! milliseconds, e.g. `2017-11-04T18:48:46.250Z`.

use chrono::{DateTime, Utc};
use log::*;

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            debug!("Failed to parse timestamp '{}': {}", raw, e);
            None
        }
    }
}

/// Format as `2017-11-04 18:48:46`.
///
pub fn format_timestamp(raw: &str) -> Option<String> {
    parse(raw).map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Format as `November 04, 2017`.
///
pub fn readable_date(raw: &str) -> Option<String> {
    parse(raw).map(|t| t.format("%B %d, %Y").to_string())
}
