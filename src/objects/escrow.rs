//! Escrow ledger-object view.

use crate::date;
use crate::error::AmountError;
use crate::transactions::decode_optional_amount;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Escrow {
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

impl Escrow {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    pub fn destination(&self) -> Option<Destination> {
        self.destination.as_ref().map(|address| Destination {
            address: address.clone(),
            tag: self.destination_tag,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.cancel_after.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(cancel_after) => now >= cancel_after,
            None => false,
        }
    }

    /// Releasable when not expired and past any finish-after constraint.
    pub fn can_finish(&self, now: DateTime<Utc>) -> bool {
        if self.is_expired(now) {
            return false;
        }
        match self.finish_after.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(finish_after) => now >= finish_after,
            None => true,
        }
    }

    /// Conditional escrows additionally need a fulfillment to finish.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}
