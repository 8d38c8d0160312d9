//! Per-type ledger-object payload views.

pub mod check;
pub mod escrow;
pub mod nftoken_offer;
pub mod offer;
pub mod pay_channel;
pub mod ticket;

pub use check::Check;
pub use escrow::Escrow;
pub use nftoken_offer::NFTokenOffer;
pub use offer::Offer;
pub use pay_channel::PayChannel;
pub use ticket::Ticket;

use crate::error::DecodeError;
use crate::types::LedgerEntryType;
use serde_json::{Map, Value};

/// The typed body of a ledger object, one variant per modeled entry type.
#[derive(Debug, Clone)]
pub enum ObjectPayload {
    Offer(Offer),
    Escrow(Escrow),
    Check(Check),
    Ticket(Ticket),
    PayChannel(PayChannel),
    NFTokenOffer(NFTokenOffer),
    /// Entry types without a dedicated view; the raw map on the owning
    /// entity still carries every field.
    Other,
}

impl ObjectPayload {
    pub fn decode(kind: &LedgerEntryType, raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        let value = Value::Object(raw.clone());
        Ok(match kind {
            LedgerEntryType::Offer => Self::Offer(serde_json::from_value(value)?),
            LedgerEntryType::Escrow => Self::Escrow(serde_json::from_value(value)?),
            LedgerEntryType::Check => Self::Check(serde_json::from_value(value)?),
            LedgerEntryType::Ticket => Self::Ticket(serde_json::from_value(value)?),
            LedgerEntryType::PayChannel => Self::PayChannel(serde_json::from_value(value)?),
            LedgerEntryType::NFTokenOffer => Self::NFTokenOffer(serde_json::from_value(value)?),
            _ => Self::Other,
        })
    }
}
