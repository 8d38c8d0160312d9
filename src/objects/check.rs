//! Check ledger-object view.

use crate::date;
use crate::error::AmountError;
use crate::transactions::decode_optional_amount;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Check {
    #[serde(rename = "SendMax")]
    pub send_max: Option<WireAmount>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
    #[serde(rename = "InvoiceID")]
    pub invoice_id: Option<String>,
    #[serde(rename = "SourceTag")]
    pub source_tag: Option<u32>,
}

impl Check {
    pub fn send_max(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.send_max, native_asset)
    }

    pub fn destination(&self) -> Option<Destination> {
        self.destination.as_ref().map(|address| Destination {
            address: address.clone(),
            tag: self.destination_tag,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiration.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(expiration) => now >= expiration,
            None => false,
        }
    }
}
