//! Payment channel transaction views.

use super::{decode_optional_amount, make_destination};
use crate::error::AmountError;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentChannelCreate {
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "SettleDelay")]
    pub settle_delay: Option<u32>,
    #[serde(rename = "PublicKey")]
    pub public_key: Option<String>,
    #[serde(rename = "CancelAfter")]
    pub cancel_after: Option<i64>,
}

impl PaymentChannelCreate {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    pub fn destination(&self) -> Option<Destination> {
        make_destination(&self.destination, self.destination_tag)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentChannelFund {
    #[serde(rename = "Channel")]
    pub channel: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
}

impl PaymentChannelFund {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentChannelClaim {
    #[serde(rename = "Channel")]
    pub channel: Option<String>,
    #[serde(rename = "Balance")]
    pub balance: Option<WireAmount>,
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Signature")]
    pub signature: Option<String>,
    #[serde(rename = "PublicKey")]
    pub public_key: Option<String>,
}

impl PaymentChannelClaim {
    /// Total delivered through the channel after this claim.
    pub fn balance(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.balance, native_asset)
    }

    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }
}
