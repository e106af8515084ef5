use chrono::{DateTime, SecondsFormat, Utc};

/// Current wall-clock instant used for create, update and read times.
#[inline]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// RFC 3339 rendering with `Z` suffix, as used in resource payloads and logs.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an RFC 3339 timestamp into a UTC instant.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}
