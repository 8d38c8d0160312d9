use proptest::prelude::*;
use rust_decimal::Decimal;
use txlens::amount::{
    drops_to_native, format, native_to_drops, parse_str, parse_value, with_transfer_rate,
};
use txlens::AmountError;

#[test]
fn test_drops_to_native_unit() {
    let drops = parse_str("1000000", true).unwrap();
    assert_eq!(format(drops_to_native(drops)), "1");
}

#[test]
fn test_native_to_drops_unit() {
    let native = parse_str("1", false).unwrap();
    assert_eq!(format(native_to_drops(native)), "1000000");
}

#[test]
fn test_decimal_normalization() {
    assert_eq!(format(parse_str("1.00", false).unwrap()), "1");
    assert_eq!(format(parse_str("0.100", false).unwrap()), "0.1");
}

#[test]
fn test_bare_dot_rejected() {
    assert!(matches!(
        parse_str(".", false),
        Err(AmountError::InvalidAmount { .. })
    ));
}

#[test]
fn test_double_dot_rejected() {
    assert!(matches!(
        parse_str("12.34.56", false),
        Err(AmountError::InvalidAmount { .. })
    ));
}

#[test]
fn test_garbage_rejected() {
    for bad in ["", "abc", "1.2.3", "1..2", "--1", "1e", "1e+", "NaN", "1,5"] {
        assert!(parse_str(bad, false).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_signed_and_exponent_forms_accepted() {
    assert_eq!(format(parse_str("-2.5", false).unwrap()), "-2.5");
    assert_eq!(format(parse_str("+2.5", false).unwrap()), "2.5");
    assert_eq!(format(parse_str("25e-1", false).unwrap()), "2.5");
    assert_eq!(format(parse_str("2.5E1", false).unwrap()), "25");
}

#[test]
fn test_fractional_drops_rejected() {
    assert!(matches!(
        parse_str("100.5", true),
        Err(AmountError::TooManyDecimalPlaces { .. })
    ));
}

#[test]
fn test_wire_value_parsing() {
    assert_eq!(
        format(parse_value(&serde_json::json!("12"), true).unwrap()),
        "12"
    );
    assert_eq!(
        format(parse_value(&serde_json::json!(12), true).unwrap()),
        "12"
    );
    assert!(parse_value(&serde_json::json!({ "no": "amount" }), false).is_err());
    assert!(parse_value(&serde_json::json!(null), false).is_err());
}

#[test]
fn test_transfer_rate_growth() {
    let value = parse_str("200", false).unwrap();
    let rate = parse_str("2", false).unwrap();
    assert_eq!(format(with_transfer_rate(value, rate)), "204");
}

#[test]
fn test_formatting_never_exponential() {
    let tiny = parse_str("0.00000001", false).unwrap();
    assert_eq!(format(tiny), "0.00000001");
    let large = parse_str("123456789012345", false).unwrap();
    assert_eq!(format(large), "123456789012345");
}

proptest! {
    /// Whole drop counts survive the native round trip exactly.
    #[test]
    fn property_drops_round_trip(drops in 0u64..10_000_000_000_000u64) {
        let parsed = parse_str(&drops.to_string(), true).unwrap();
        let back = native_to_drops(drops_to_native(parsed));
        prop_assert_eq!(format(back), drops.to_string());
    }

    /// Parsing a formatted value is the identity.
    #[test]
    fn property_format_parse_identity(units in 0i64..1_000_000_000i64, cents in 0u32..100u32) {
        let value = Decimal::from(units) + Decimal::new(cents as i64, 2);
        let rendered = format(value);
        let reparsed = parse_str(&rendered, false).unwrap();
        prop_assert_eq!(format(reparsed), rendered);
    }

    /// The validated grammar never panics on arbitrary input.
    #[test]
    fn property_parse_total(input in "\\PC*") {
        let _ = parse_str(&input, false);
        let _ = parse_str(&input, true);
    }
}
