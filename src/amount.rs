//! Exact-precision amount codec.
//!
//! Bridges the two wire representations of value — integer drop strings for
//! the native asset and decimal strings for issued currencies — and the
//! canonical `Decimal` used everywhere else in the crate. All arithmetic is
//! exact; nothing here touches floating point.

use crate::error::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Smallest-unit factor of the native asset.
pub const DROPS_PER_NATIVE: i64 = 1_000_000;

/// Maximum decimal places any value produced by the interpreter may carry.
pub const INTERPRETER_DECIMAL_PLACES: u32 = 8;

/// Parse a numeric string into an exact decimal.
///
/// The accepted grammar is: optional sign, digits, optional fractional
/// part, optional exponent. A bare `.` or a second `.` is rejected. With
/// `drops` set, the value must be a whole number of smallest units.
pub fn parse_str(raw: &str, drops: bool) -> Result<Decimal, AmountError> {
    if !is_valid_numeric(raw) {
        return Err(AmountError::InvalidAmount {
            value: raw.to_string(),
        });
    }
    let trimmed = raw.strip_prefix('+').unwrap_or(raw).replace('E', "e");
    let value = Decimal::from_str(&trimmed)
        .or_else(|_| Decimal::from_scientific(&trimmed))
        .map_err(|_| AmountError::InvalidAmount {
            value: raw.to_string(),
        })?;
    if drops && !value.fract().is_zero() {
        return Err(AmountError::TooManyDecimalPlaces {
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Parse a JSON wire value (string or number) into an exact decimal.
pub fn parse_value(raw: &Value, drops: bool) -> Result<Decimal, AmountError> {
    match raw {
        Value::String(s) => parse_str(s, drops),
        Value::Number(n) => parse_str(&n.to_string(), drops),
        other => Err(AmountError::InvalidAmount {
            value: other.to_string(),
        }),
    }
}

/// Convert a drop count into native decimal units.
pub fn drops_to_native(drops: Decimal) -> Decimal {
    (drops / Decimal::from(DROPS_PER_NATIVE)).normalize()
}

/// Convert native decimal units into drops, rounding ties up. Fee and
/// reserve computations always round toward a whole drop.
pub fn native_to_drops(native: Decimal) -> Decimal {
    (native * Decimal::from(DROPS_PER_NATIVE))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Grow a value by an issuer transfer rate given in percent: the amount a
/// sender must part with so the destination nets `value`.
pub fn with_transfer_rate(value: Decimal, rate_percent: Decimal) -> Decimal {
    value + value * rate_percent / Decimal::from(100)
}

/// Round an interpreter-derived value to the canonical precision.
pub fn round_derived(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(INTERPRETER_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Canonical string form: plain decimal, trailing zeros stripped, never
/// exponential notation.
pub fn format(value: Decimal) -> String {
    value.normalize().to_string()
}

fn is_valid_numeric(raw: &str) -> bool {
    let rest = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (rest, None),
    };
    let mut parts = mantissa.splitn(3, '.');
    let integral = parts.next().unwrap_or("");
    let fractional = parts.next();
    if parts.next().is_some() {
        return false;
    }
    if integral.is_empty() || !integral.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if let Some(f) = fractional {
        if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    match exponent {
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => true,
    }
}
