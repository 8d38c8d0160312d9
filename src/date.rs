//! Ledger-epoch date codec.
//!
//! Ledger timestamps are seconds since 2000-01-01T00:00:00Z. This module
//! converts between that epoch, Unix milliseconds and RFC-3339 strings.

use crate::error::DateError;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Seconds between the ledger epoch reference instant and the Unix epoch.
pub const LEDGER_EPOCH_OFFSET: i64 = 0x386D_4380;

/// Convert a ledger epoch into Unix milliseconds.
pub fn ledger_epoch_to_unix_millis(epoch: i64) -> i64 {
    (epoch + LEDGER_EPOCH_OFFSET) * 1000
}

/// Convert Unix milliseconds into a ledger epoch, rounding half away from
/// zero to the nearest second.
pub fn unix_millis_to_ledger_epoch(millis: i64) -> i64 {
    let seconds = if millis >= 0 {
        (millis + 500) / 1000
    } else {
        (millis - 500) / 1000
    };
    seconds - LEDGER_EPOCH_OFFSET
}

/// Interpret a ledger epoch as a wall-clock instant.
pub fn to_datetime(epoch: i64) -> Result<DateTime<Utc>, DateError> {
    DateTime::from_timestamp(epoch + LEDGER_EPOCH_OFFSET, 0)
        .ok_or(DateError::OutOfRange { value: epoch })
}

/// Format a ledger epoch as an RFC-3339 string with millisecond precision.
pub fn to_iso8601(epoch: i64) -> Result<String, DateError> {
    let instant = to_datetime(epoch)?;
    Ok(instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Format a ledger epoch taken straight off the wire. Anything but an
/// integer JSON value is a type error.
pub fn to_iso8601_wire(raw: &Value) -> Result<String, DateError> {
    let epoch = epoch_from_wire(raw)?;
    to_iso8601(epoch)
}

/// Parse an RFC-3339 string into a ledger epoch.
pub fn to_ledger_epoch(iso: &str) -> Result<i64, DateError> {
    let instant = DateTime::parse_from_rfc3339(iso).map_err(|_| DateError::InvalidDate {
        value: iso.to_string(),
    })?;
    Ok(instant.with_timezone(&Utc).timestamp() - LEDGER_EPOCH_OFFSET)
}

/// Parse a wire value holding an RFC-3339 string. Anything but a string is
/// a type error.
pub fn to_ledger_epoch_wire(raw: &Value) -> Result<i64, DateError> {
    match raw {
        Value::String(s) => to_ledger_epoch(s),
        other => Err(DateError::InvalidDateType {
            reason: format!("expected a string, got {}", json_kind(other)),
        }),
    }
}

/// Extract an integer ledger epoch from a wire value.
pub fn epoch_from_wire(raw: &Value) -> Result<i64, DateError> {
    match raw {
        Value::Number(n) => n.as_i64().ok_or_else(|| DateError::InvalidDateType {
            reason: format!("expected an integer, got {}", n),
        }),
        other => Err(DateError::InvalidDateType {
            reason: format!("expected an integer, got {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_epoch_zero_is_reference_instant() {
        assert_eq!(to_iso8601(0).unwrap(), "2000-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_round_trip() {
        let epoch = 717_964_800;
        let iso = to_iso8601(epoch).unwrap();
        assert_eq!(to_ledger_epoch(&iso).unwrap(), epoch);
    }

    #[test]
    fn test_unix_millis_conversion() {
        assert_eq!(ledger_epoch_to_unix_millis(0), 946_684_800_000);
        assert_eq!(unix_millis_to_ledger_epoch(946_684_800_000), 0);
        // sub-second values round to the nearest second
        assert_eq!(unix_millis_to_ledger_epoch(946_684_800_501), 1);
        assert_eq!(unix_millis_to_ledger_epoch(946_684_800_499), 0);
    }

    #[test]
    fn test_non_integer_wire_value_rejected() {
        assert!(matches!(
            to_iso8601_wire(&json!("2000-01-01")),
            Err(DateError::InvalidDateType { .. })
        ));
        assert!(matches!(
            to_iso8601_wire(&json!(1.5)),
            Err(DateError::InvalidDateType { .. })
        ));
    }

    #[test]
    fn test_non_string_wire_value_rejected() {
        assert!(matches!(
            to_ledger_epoch_wire(&json!(42)),
            Err(DateError::InvalidDateType { .. })
        ));
    }
}
