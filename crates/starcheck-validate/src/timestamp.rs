use chrono::NaiveDateTime;

/// Accepted timestamp layout: ISO-8601 without timezone or fractional
/// seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a timestamp string in the `YYYY-MM-DDTHH:MM:SS` subset.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}
