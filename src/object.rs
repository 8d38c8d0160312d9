//! The ledger-object entity.
//!
//! A `LedgerObject` is the persistent counterpart of a transaction: an
//! Offer, Escrow, Check, Ticket, PayChannel or NFTokenOffer entry read out
//! of the ledger. It shares the raw-record storage and flag decoding of
//! the transaction entity but has no fee, sequence or signing surface.

use crate::error::DecodeError;
use crate::flags;
use crate::objects::ObjectPayload;
use crate::types::LedgerEntryType;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCommonFields {
    #[serde(rename = "LedgerEntryType")]
    pub ledger_entry_type: LedgerEntryType,
    #[serde(rename = "Account")]
    pub account: Option<String>,
    #[serde(rename = "Owner")]
    pub owner: Option<String>,
    #[serde(rename = "Flags")]
    pub flags: Option<u32>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Option<String>,
    #[serde(rename = "index", alias = "LedgerIndex")]
    pub index: Option<String>,
}

#[derive(Debug)]
pub struct LedgerObject {
    raw: Map<String, Value>,
    common: ObjectCommonFields,
    payload: ObjectPayload,
}

impl LedgerObject {
    pub fn from_wire(entry: Value) -> Result<Self, DecodeError> {
        let raw = match entry {
            Value::Object(map) => map,
            _ => return Err(DecodeError::NotAnObject),
        };
        let common: ObjectCommonFields = serde_json::from_value(Value::Object(raw.clone()))?;
        let payload = ObjectPayload::decode(&common.ledger_entry_type, &raw)?;
        Ok(Self {
            raw,
            common,
            payload,
        })
    }

    pub fn entry_type(&self) -> &LedgerEntryType {
        &self.common.ledger_entry_type
    }

    /// The owning account: offers and channels use `Account`, escrows and
    /// token offers use `Owner`.
    pub fn owner(&self) -> Option<&str> {
        self.common
            .account
            .as_deref()
            .or(self.common.owner.as_deref())
    }

    pub fn flags_bits(&self) -> Option<u32> {
        self.common.flags
    }

    /// Named view of the flag bitmask for this entry's type.
    pub fn flags(&self) -> BTreeMap<&'static str, bool> {
        flags::parse_ledger_entry_flags(&self.common.ledger_entry_type, self.common.flags)
    }

    pub fn previous_txn_id(&self) -> Option<&str> {
        self.common.previous_txn_id.as_deref()
    }

    pub fn index(&self) -> Option<&str> {
        self.common.index.as_deref()
    }

    pub fn payload(&self) -> &ObjectPayload {
        &self.payload
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}
