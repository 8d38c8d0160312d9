//! Escrow transaction views.

use super::{decode_optional_amount, make_destination};
use crate::date;
use crate::error::AmountError;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscrowCreate {
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "CancelAfter")]
    pub cancel_after: Option<i64>,
    #[serde(rename = "FinishAfter")]
    pub finish_after: Option<i64>,
    #[serde(rename = "Condition")]
    pub condition: Option<String>,
}

impl EscrowCreate {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    pub fn destination(&self) -> Option<Destination> {
        make_destination(&self.destination, self.destination_tag)
    }

    /// Expired once the cancel-after instant has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.cancel_after.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(cancel_after) => now >= cancel_after,
            None => false,
        }
    }

    /// The escrow can be finished when it is not expired and either no
    /// finish-after constraint exists or it has passed.
    pub fn can_finish(&self, now: DateTime<Utc>) -> bool {
        if self.is_expired(now) {
            return false;
        }
        match self.finish_after.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(finish_after) => now >= finish_after,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscrowFinish {
    #[serde(rename = "Owner")]
    pub owner: Option<String>,
    #[serde(rename = "OfferSequence")]
    pub offer_sequence: Option<u32>,
    #[serde(rename = "Condition")]
    pub condition: Option<String>,
    #[serde(rename = "Fulfillment")]
    pub fulfillment: Option<String>,
}

impl EscrowFinish {
    /// Byte length of the hex-encoded fulfillment, the input to the
    /// type-specific fee rule.
    pub fn fulfillment_byte_length(&self) -> Option<u64> {
        self.fulfillment
            .as_deref()
            .map(|fulfillment| (fulfillment.len() / 2) as u64)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EscrowCancel {
    #[serde(rename = "Owner")]
    pub owner: Option<String>,
    #[serde(rename = "OfferSequence")]
    pub offer_sequence: Option<u32>,
}
