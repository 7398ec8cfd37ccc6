//! Timestamp version tags.
//!
//! Formats the current wall-clock time with a configurable chrono
//! format string and timezone offset. Unlike hash tags these are not
//! content-derived: two runs at different times produce different tags
//! at the configured resolution.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::config::RevOptions;
use crate::rev::RevError;

/// Format the current time as a version tag.
pub fn timestamp_tag(options: &RevOptions) -> Result<String, RevError> {
    format_at(Utc::now(), options)
}

/// Format a pinned instant (separated out so tests can hold time still).
fn format_at(instant: DateTime<Utc>, options: &RevOptions) -> Result<String, RevError> {
    // Reject bad format strings up front; chrono only surfaces them
    // when the formatted value is displayed.
    if StrftimeItems::new(&options.date_format).any(|item| matches!(item, Item::Error)) {
        return Err(RevError::InvalidDateFormat(options.date_format.clone()));
    }

    let offset = FixedOffset::east_opt(options.timezone_offset * 3600).unwrap_or_else(|| Utc.fix());
    Ok(instant
        .with_timezone(&offset)
        .format(&options.date_format)
        .to_string())
}
