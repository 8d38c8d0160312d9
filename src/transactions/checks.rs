//! Check transaction views.

use super::{decode_optional_amount, make_destination};
use crate::date;
use crate::error::AmountError;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckCreate {
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "SendMax")]
    pub send_max: Option<WireAmount>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
    #[serde(rename = "InvoiceID")]
    pub invoice_id: Option<String>,
}

impl CheckCreate {
    pub fn send_max(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.send_max, native_asset)
    }

    pub fn destination(&self) -> Option<Destination> {
        make_destination(&self.destination, self.destination_tag)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiration.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(expiration) => now >= expiration,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckCash {
    #[serde(rename = "CheckID")]
    pub check_id: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "DeliverMin")]
    pub deliver_min: Option<WireAmount>,
}

impl CheckCash {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    pub fn deliver_min(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.deliver_min, native_asset)
    }

    /// Exactly one of Amount and DeliverMin must be present on a valid
    /// check cash; flexible cashing uses DeliverMin.
    pub fn is_flexible(&self) -> bool {
        self.amount.is_none() && self.deliver_min.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckCancel {
    #[serde(rename = "CheckID")]
    pub check_id: Option<String>,
}
