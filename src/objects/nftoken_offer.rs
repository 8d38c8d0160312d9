//! NFToken offer ledger-object view.

use crate::date;
use crate::error::AmountError;
use crate::flags;
use crate::transactions::decode_optional_amount;
use crate::types::{Amount, LedgerEntryType};
use crate::wire::WireAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NFTokenOffer {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
    #[serde(rename = "Flags")]
    pub flags: Option<u32>,
}

impl NFTokenOffer {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    /// Sell offers carry the sell flag; everything else is a buy offer.
    pub fn is_sell_offer(&self) -> bool {
        flags::parse_ledger_entry_flags(&LedgerEntryType::NFTokenOffer, self.flags)
            .get("lsfSellNFToken")
            .copied()
            .unwrap_or(false)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiration.and_then(|epoch| date::to_datetime(epoch).ok()) {
            Some(expiration) => now >= expiration,
            None => false,
        }
    }
}
