//! Payment channel ledger-object view.

use crate::date;
use crate::error::AmountError;
use crate::transactions::decode_optional_amount;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayChannel {
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Balance")]
    pub balance: Option<WireAmount>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "SettleDelay")]
    pub settle_delay: Option<u32>,
    #[serde(rename = "PublicKey")]
    pub public_key: Option<String>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
    #[serde(rename = "CancelAfter")]
    pub cancel_after: Option<i64>,
}

impl PayChannel {
    /// Total escrowed into the channel.
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    /// Already claimed by the destination.
    pub fn balance(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.balance, native_asset)
    }

    /// What the channel can still pay out.
    pub fn remaining(&self, native_asset: &str) -> Result<Option<Decimal>, AmountError> {
        let amount = self.amount(native_asset)?;
        let balance = self.balance(native_asset)?;
        Ok(match (amount, balance) {
            (Some(amount), Some(balance)) => Some(amount.value - balance.value),
            (Some(amount), None) => Some(amount.value),
            _ => None,
        })
    }

    pub fn destination(&self) -> Option<Destination> {
        self.destination.as_ref().map(|address| Destination {
            address: address.clone(),
            tag: self.destination_tag,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let soonest = [self.expiration, self.cancel_after]
            .into_iter()
            .flatten()
            .min();
        match soonest.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}
