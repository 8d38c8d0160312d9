//! Offer ledger-object view.

use crate::date;
use crate::error::AmountError;
use crate::transactions::offers::rate_of;
use crate::transactions::decode_optional_amount;
use crate::types::Amount;
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "TakerGets")]
    pub taker_gets: Option<WireAmount>,
    #[serde(rename = "TakerPays")]
    pub taker_pays: Option<WireAmount>,
    #[serde(rename = "Sequence")]
    pub sequence: Option<u32>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
}

impl Offer {
    pub fn taker_gets(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.taker_gets, native_asset)
    }

    pub fn taker_pays(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.taker_pays, native_asset)
    }

    /// Display price of the resting order. A plain ratio, not a monetary
    /// amount.
    pub fn rate(&self, native_asset: &str) -> Option<f64> {
        let gets = self.taker_gets(native_asset).ok().flatten()?;
        let pays = self.taker_pays(native_asset).ok().flatten()?;
        rate_of(&gets, &pays, native_asset)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiration.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(expiration) => now >= expiration,
            None => false,
        }
    }
}
