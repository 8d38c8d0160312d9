//! Memo decoding.
//!
//! Memo fields are hex-encoded on the wire. The xApp marker memo is the
//! one memo this crate interprets: a recognized memo type whose data is a
//! well-formed xApp identifier.

use serde::{Deserialize, Serialize};

/// Memo type marking an xApp identifier payload.
pub const XAPP_MEMO_TYPE: &str = "xumm/xapp";

/// Wire wrapper: each entry of the `Memos` array is `{"Memo": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoWrapper {
    #[serde(rename = "Memo")]
    pub memo: Memo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Memo {
    #[serde(rename = "MemoType", skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    #[serde(rename = "MemoData", skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    #[serde(rename = "MemoFormat", skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

impl Memo {
    /// Build a memo from plain text parts, hex-encoding them for the wire.
    pub fn from_text(memo_type: &str, data: &str, format: Option<&str>) -> Self {
        Self {
            memo_type: Some(hex::encode_upper(memo_type)),
            memo_data: Some(hex::encode_upper(data)),
            memo_format: format.map(hex::encode_upper),
        }
    }

    /// The memo type, hex-decoded to text when possible.
    pub fn decoded_type(&self) -> Option<String> {
        self.memo_type.as_deref().and_then(decode_hex_text)
    }

    /// The memo data, hex-decoded to text when possible.
    pub fn decoded_data(&self) -> Option<String> {
        self.memo_data.as_deref().and_then(decode_hex_text)
    }

    /// The memo format, hex-decoded to text when possible.
    pub fn decoded_format(&self) -> Option<String> {
        self.memo_format.as_deref().and_then(decode_hex_text)
    }

    /// The xApp identifier carried by this memo, if it is a marker memo
    /// with a valid identifier payload.
    pub fn xapp_identifier(&self) -> Option<String> {
        if self.decoded_type().as_deref() != Some(XAPP_MEMO_TYPE) {
            return None;
        }
        self.decoded_data().filter(|data| is_valid_identifier(data))
    }
}

fn decode_hex_text(raw: &str) -> Option<String> {
    let bytes = hex::decode(raw).ok()?;
    String::from_utf8(bytes).ok()
}

/// xApp identifiers are lowercase alphanumeric segments joined by `.`,
/// `-` or `_`, starting with an alphanumeric character.
fn is_valid_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .unwrap_or(false);
    first_ok
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_'))
}
