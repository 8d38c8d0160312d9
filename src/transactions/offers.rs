//! Offer transaction views.

use super::decode_optional_amount;
use crate::date;
use crate::error::AmountError;
use crate::types::Amount;
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferCreate {
    #[serde(rename = "TakerGets")]
    pub taker_gets: Option<WireAmount>,
    #[serde(rename = "TakerPays")]
    pub taker_pays: Option<WireAmount>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
    #[serde(rename = "OfferSequence")]
    pub offer_sequence: Option<u32>,
}

impl OfferCreate {
    /// What the offer creator gives up when the order executes.
    pub fn taker_gets(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.taker_gets, native_asset)
    }

    /// What the offer creator receives when the order executes.
    pub fn taker_pays(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.taker_pays, native_asset)
    }

    /// Display price of the order, oriented as issued units per native
    /// unit when one side is the native asset. A plain ratio, not a
    /// monetary amount.
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

/// Price ratio of an order book entry: `pays / gets`, flipped when the
/// pays side is the native asset so the ratio always reads as issued
/// units per native unit.
pub(crate) fn rate_of(gets: &Amount, pays: &Amount, native_asset: &str) -> Option<f64> {
    let gets_value = gets.value.to_f64()?;
    let pays_value = pays.value.to_f64()?;
    if gets_value == 0.0 || pays_value == 0.0 {
        return None;
    }
    let pays_is_native = pays.issuer.is_none() && pays.currency == native_asset;
    if pays_is_native {
        Some(gets_value / pays_value)
    } else {
        Some(pays_value / gets_value)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferCancel {
    #[serde(rename = "OfferSequence")]
    pub offer_sequence: Option<u32>,
}
