//! Every timestamp staff see is shown in UK civil time, whatever the submitter's locale.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Europe::London;

const LOCAL_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// `10 March 2025 at 14:30`, used in the rendered document.
pub fn long_form(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&London)
        .format("%-d %B %Y at %H:%M")
        .to_string()
}

/// `10/03/2025, 14:30:00`, used in the plain-text email body.
pub fn short_form(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&London)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

/// Interpret a client-supplied date/time.
///
/// RFC 3339 values carry their own offset. Zone-less values (an HTML `datetime-local`
/// input) are read as UK civil time; a wall-clock time skipped by the spring change
/// yields `None`.
pub fn parse_client_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    LOCAL_INPUT_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(raw, format).ok()?;
        London
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}
