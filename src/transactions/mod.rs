//! Per-type transaction payload views.
//!
//! Each concrete transaction type is a typed view over its own optional
//! wire fields. The closed `TxPayload` sum keeps field access a
//! pattern-matched projection instead of a stringly path lookup.

pub mod account;
pub mod channels;
pub mod checks;
pub mod escrow;
pub mod nftoken;
pub mod offers;
pub mod payment;
pub mod pseudo;
pub mod tickets;
pub mod trust;

pub use account::{AccountDelete, AccountSet, DepositPreauth, SetRegularKey, SignerListSet};
pub use channels::{PaymentChannelClaim, PaymentChannelCreate, PaymentChannelFund};
pub use checks::{CheckCancel, CheckCash, CheckCreate};
pub use escrow::{EscrowCancel, EscrowCreate, EscrowFinish};
pub use nftoken::{
    NFTokenAcceptOffer, NFTokenBurn, NFTokenCancelOffer, NFTokenCreateOffer, NFTokenMint,
};
pub use offers::{OfferCancel, OfferCreate};
pub use payment::Payment;
pub use pseudo::{EnableAmendment, SetFee, UNLModify};
pub use tickets::TicketCreate;
pub use trust::{Clawback, TrustSet};

use crate::error::{AmountError, DecodeError};
use crate::types::{Amount, Destination, TransactionType};
use crate::wire::WireAmount;
use serde_json::{Map, Value};

/// The typed body of a transaction, one variant per concrete type.
#[derive(Debug, Clone)]
pub enum TxPayload {
    Payment(Payment),
    OfferCreate(OfferCreate),
    OfferCancel(OfferCancel),
    TrustSet(TrustSet),
    AccountSet(AccountSet),
    AccountDelete(AccountDelete),
    SetRegularKey(SetRegularKey),
    SignerListSet(SignerListSet),
    EscrowCreate(EscrowCreate),
    EscrowFinish(EscrowFinish),
    EscrowCancel(EscrowCancel),
    CheckCreate(CheckCreate),
    CheckCash(CheckCash),
    CheckCancel(CheckCancel),
    DepositPreauth(DepositPreauth),
    TicketCreate(TicketCreate),
    PaymentChannelCreate(PaymentChannelCreate),
    PaymentChannelFund(PaymentChannelFund),
    PaymentChannelClaim(PaymentChannelClaim),
    NFTokenMint(NFTokenMint),
    NFTokenBurn(NFTokenBurn),
    NFTokenCreateOffer(NFTokenCreateOffer),
    NFTokenAcceptOffer(NFTokenAcceptOffer),
    NFTokenCancelOffer(NFTokenCancelOffer),
    Clawback(Clawback),
    EnableAmendment(EnableAmendment),
    SetFee(SetFee),
    UNLModify(UNLModify),
    /// Unrecognized transaction type; the raw map on the owning entity
    /// still carries every field.
    Other,
}

impl TxPayload {
    /// Decode the typed body for `kind` out of the raw field map.
    pub fn decode(kind: &TransactionType, raw: &Map<String, Value>) -> Result<Self, DecodeError> {
        let value = Value::Object(raw.clone());
        Ok(match kind {
            TransactionType::Payment => Self::Payment(serde_json::from_value(value)?),
            TransactionType::OfferCreate => Self::OfferCreate(serde_json::from_value(value)?),
            TransactionType::OfferCancel => Self::OfferCancel(serde_json::from_value(value)?),
            TransactionType::TrustSet => Self::TrustSet(serde_json::from_value(value)?),
            TransactionType::AccountSet => Self::AccountSet(serde_json::from_value(value)?),
            TransactionType::AccountDelete => Self::AccountDelete(serde_json::from_value(value)?),
            TransactionType::SetRegularKey => Self::SetRegularKey(serde_json::from_value(value)?),
            TransactionType::SignerListSet => Self::SignerListSet(serde_json::from_value(value)?),
            TransactionType::EscrowCreate => Self::EscrowCreate(serde_json::from_value(value)?),
            TransactionType::EscrowFinish => Self::EscrowFinish(serde_json::from_value(value)?),
            TransactionType::EscrowCancel => Self::EscrowCancel(serde_json::from_value(value)?),
            TransactionType::CheckCreate => Self::CheckCreate(serde_json::from_value(value)?),
            TransactionType::CheckCash => Self::CheckCash(serde_json::from_value(value)?),
            TransactionType::CheckCancel => Self::CheckCancel(serde_json::from_value(value)?),
            TransactionType::DepositPreauth => Self::DepositPreauth(serde_json::from_value(value)?),
            TransactionType::TicketCreate => Self::TicketCreate(serde_json::from_value(value)?),
            TransactionType::PaymentChannelCreate => {
                Self::PaymentChannelCreate(serde_json::from_value(value)?)
            }
            TransactionType::PaymentChannelFund => {
                Self::PaymentChannelFund(serde_json::from_value(value)?)
            }
            TransactionType::PaymentChannelClaim => {
                Self::PaymentChannelClaim(serde_json::from_value(value)?)
            }
            TransactionType::NFTokenMint => Self::NFTokenMint(serde_json::from_value(value)?),
            TransactionType::NFTokenBurn => Self::NFTokenBurn(serde_json::from_value(value)?),
            TransactionType::NFTokenCreateOffer => {
                Self::NFTokenCreateOffer(serde_json::from_value(value)?)
            }
            TransactionType::NFTokenAcceptOffer => {
                Self::NFTokenAcceptOffer(serde_json::from_value(value)?)
            }
            TransactionType::NFTokenCancelOffer => {
                Self::NFTokenCancelOffer(serde_json::from_value(value)?)
            }
            TransactionType::Clawback => Self::Clawback(serde_json::from_value(value)?),
            TransactionType::EnableAmendment => {
                Self::EnableAmendment(serde_json::from_value(value)?)
            }
            TransactionType::SetFee => Self::SetFee(serde_json::from_value(value)?),
            TransactionType::UNLModify => Self::UNLModify(serde_json::from_value(value)?),
            TransactionType::Unknown(_) => Self::Other,
        })
    }

    /// The amount the transaction asked to move, for types that carry one.
    /// Used as the delivered-amount fallback when metadata recorded none.
    pub fn requested_amount(&self) -> Option<&WireAmount> {
        match self {
            Self::Payment(payment) => payment.amount.as_ref(),
            Self::CheckCash(check_cash) => check_cash.amount.as_ref(),
            _ => None,
        }
    }
}

pub(crate) fn decode_optional_amount(
    field: &Option<WireAmount>,
    native_asset: &str,
) -> Result<Option<Amount>, AmountError> {
    field.as_ref().map(|wire| wire.decode(native_asset)).transpose()
}

pub(crate) fn make_destination(
    address: &Option<String>,
    tag: Option<u32>,
) -> Option<Destination> {
    address.as_ref().map(|address| Destination {
        address: address.clone(),
        tag,
    })
}
