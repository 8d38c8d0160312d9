//! Payment transaction view.

use super::{decode_optional_amount, make_destination};
use crate::error::AmountError;
use crate::types::{Amount, Destination};
use crate::wire::WireAmount;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "SendMax")]
    pub send_max: Option<WireAmount>,
    #[serde(rename = "DeliverMin")]
    pub deliver_min: Option<WireAmount>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
    #[serde(rename = "InvoiceID")]
    pub invoice_id: Option<String>,
    #[serde(rename = "Paths")]
    pub paths: Option<Value>,
}

impl Payment {
    /// The amount the sender asked to deliver. The amount that actually
    /// arrived lives on the owning entity's `delivered_amount`.
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    /// Upper bound on what the sender is willing to part with.
    pub fn send_max(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.send_max, native_asset)
    }

    /// Lower bound the destination must receive for a partial payment.
    pub fn deliver_min(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.deliver_min, native_asset)
    }

    pub fn destination(&self) -> Option<Destination> {
        make_destination(&self.destination, self.destination_tag)
    }

    pub fn invoice_id(&self) -> Option<&str> {
        self.invoice_id.as_deref()
    }

    /// Whether the payment rippled through explicit paths.
    pub fn has_paths(&self) -> bool {
        self.paths
            .as_ref()
            .and_then(Value::as_array)
            .map(|paths| !paths.is_empty())
            .unwrap_or(false)
    }
}
