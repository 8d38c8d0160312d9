//! Lenient wire shapes.
//!
//! The ledger wire format is loosely typed: an amount field is either an
//! integer drop string (native asset) or a `{currency, issuer, value}`
//! object (issued currency), and metadata field maps are open per entry
//! type. These shapes decode structurally here; semantic validation happens
//! in the accessor that reads them, so one malformed field never poisons
//! its siblings.

use crate::amount;
use crate::error::AmountError;
use crate::types::Amount;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An amount exactly as found on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAmount {
    /// Integer drop string; also catches sentinel strings, validated on decode.
    Drops(String),
    /// Issued-currency object.
    Issued(IssuedWireAmount),
    /// Structurally unexpected shape, rejected on decode.
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedWireAmount {
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    pub value: String,
}

impl WireAmount {
    /// Decode into the canonical currency-aware representation. Native drop
    /// strings become decimal native units tagged with `native_asset`.
    pub fn decode(&self, native_asset: &str) -> Result<Amount, AmountError> {
        match self {
            WireAmount::Drops(raw) => {
                let drops = amount::parse_str(raw, true)?;
                Ok(Amount::native(native_asset, amount::drops_to_native(drops)))
            }
            WireAmount::Issued(issued) => {
                let value = amount::parse_str(&issued.value, false)?;
                Ok(Amount {
                    currency: issued.currency.clone(),
                    issuer: issued.issuer.clone(),
                    value,
                })
            }
            WireAmount::Other(raw) => Err(AmountError::InvalidAmount {
                value: raw.to_string(),
            }),
        }
    }

    /// Re-encode a canonical amount into its wire form.
    pub fn from_amount(amount_value: &Amount, native_asset: &str) -> Self {
        if amount_value.issuer.is_none() && amount_value.currency == native_asset {
            let drops = amount::native_to_drops(amount_value.value);
            WireAmount::Drops(amount::format(drops))
        } else {
            WireAmount::Issued(IssuedWireAmount {
                currency: amount_value.currency.clone(),
                issuer: amount_value.issuer.clone(),
                value: amount::format(amount_value.value),
            })
        }
    }
}

/// Read a string field out of an open metadata map.
pub fn get_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Read an unsigned integer field out of an open metadata map.
pub fn get_u64(map: &Map<String, Value>, key: &str) -> Option<u64> {
    map.get(key).and_then(Value::as_u64)
}

/// Read a nested object field out of an open metadata map.
pub fn get_object<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Read the `issuer` of a nested limit object (`LowLimit`/`HighLimit`).
pub fn get_limit_issuer<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    get_object(map, key).and_then(|limit| get_str(limit, "issuer"))
}
