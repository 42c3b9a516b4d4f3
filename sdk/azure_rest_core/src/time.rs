//! Timestamp parsing and formatting for the wire formats Azure services use.

use crate::error::{AzureError, AzureResult};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parse an ISO-8601 timestamp.
///
/// Service management responses mix offset-qualified values
/// (`2014-05-01T10:00:00Z`) with bare local ones (`2013-11-26T19:30:07.4371412`);
/// the latter are taken as UTC.
pub fn parse_iso8601(value: &str) -> AzureResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| AzureError::Deserialization(format!("invalid timestamp '{value}': {e}")))
}

/// Parse an RFC-1123 HTTP date such as `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn parse_http_date(value: &str) -> AzureResult<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AzureError::Deserialization(format!("invalid HTTP date '{value}': {e}")))
}

/// Format a timestamp as an RFC-1123 HTTP date.
pub fn format_http_date(value: &DateTime<Utc>) -> String {
    value.format(HTTP_DATE_FORMAT).to_string()
}

/// Format a timestamp as ISO-8601 in UTC with a `Z` suffix.
pub fn format_iso8601(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}
