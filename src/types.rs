//! Core data types shared across the codecs, the metadata interpreter and
//! the entity model layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine result code reported for a successfully applied transaction.
pub const TES_SUCCESS: &str = "tesSUCCESS";

/// Every transaction type this crate models. Unrecognized wire values are
/// preserved in `Unknown` so validated history always loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Payment,
    OfferCreate,
    OfferCancel,
    TrustSet,
    AccountSet,
    AccountDelete,
    SetRegularKey,
    SignerListSet,
    EscrowCreate,
    EscrowFinish,
    EscrowCancel,
    CheckCreate,
    CheckCash,
    CheckCancel,
    DepositPreauth,
    TicketCreate,
    PaymentChannelCreate,
    PaymentChannelFund,
    PaymentChannelClaim,
    NFTokenMint,
    NFTokenBurn,
    NFTokenCreateOffer,
    NFTokenAcceptOffer,
    NFTokenCancelOffer,
    Clawback,
    EnableAmendment,
    SetFee,
    UNLModify,
    Unknown(String),
}

impl TransactionType {
    /// Resolve a wire `TransactionType` string.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Payment" => Self::Payment,
            "OfferCreate" => Self::OfferCreate,
            "OfferCancel" => Self::OfferCancel,
            "TrustSet" => Self::TrustSet,
            "AccountSet" => Self::AccountSet,
            "AccountDelete" => Self::AccountDelete,
            "SetRegularKey" => Self::SetRegularKey,
            "SignerListSet" => Self::SignerListSet,
            "EscrowCreate" => Self::EscrowCreate,
            "EscrowFinish" => Self::EscrowFinish,
            "EscrowCancel" => Self::EscrowCancel,
            "CheckCreate" => Self::CheckCreate,
            "CheckCash" => Self::CheckCash,
            "CheckCancel" => Self::CheckCancel,
            "DepositPreauth" => Self::DepositPreauth,
            "TicketCreate" => Self::TicketCreate,
            "PaymentChannelCreate" => Self::PaymentChannelCreate,
            "PaymentChannelFund" => Self::PaymentChannelFund,
            "PaymentChannelClaim" => Self::PaymentChannelClaim,
            "NFTokenMint" => Self::NFTokenMint,
            "NFTokenBurn" => Self::NFTokenBurn,
            "NFTokenCreateOffer" => Self::NFTokenCreateOffer,
            "NFTokenAcceptOffer" => Self::NFTokenAcceptOffer,
            "NFTokenCancelOffer" => Self::NFTokenCancelOffer,
            "Clawback" => Self::Clawback,
            "EnableAmendment" => Self::EnableAmendment,
            "SetFee" => Self::SetFee,
            "UNLModify" => Self::UNLModify,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire name of this transaction type.
    pub fn name(&self) -> &str {
        match self {
            Self::Payment => "Payment",
            Self::OfferCreate => "OfferCreate",
            Self::OfferCancel => "OfferCancel",
            Self::TrustSet => "TrustSet",
            Self::AccountSet => "AccountSet",
            Self::AccountDelete => "AccountDelete",
            Self::SetRegularKey => "SetRegularKey",
            Self::SignerListSet => "SignerListSet",
            Self::EscrowCreate => "EscrowCreate",
            Self::EscrowFinish => "EscrowFinish",
            Self::EscrowCancel => "EscrowCancel",
            Self::CheckCreate => "CheckCreate",
            Self::CheckCash => "CheckCash",
            Self::CheckCancel => "CheckCancel",
            Self::DepositPreauth => "DepositPreauth",
            Self::TicketCreate => "TicketCreate",
            Self::PaymentChannelCreate => "PaymentChannelCreate",
            Self::PaymentChannelFund => "PaymentChannelFund",
            Self::PaymentChannelClaim => "PaymentChannelClaim",
            Self::NFTokenMint => "NFTokenMint",
            Self::NFTokenBurn => "NFTokenBurn",
            Self::NFTokenCreateOffer => "NFTokenCreateOffer",
            Self::NFTokenAcceptOffer => "NFTokenAcceptOffer",
            Self::NFTokenCancelOffer => "NFTokenCancelOffer",
            Self::Clawback => "Clawback",
            Self::EnableAmendment => "EnableAmendment",
            Self::SetFee => "SetFee",
            Self::UNLModify => "UNLModify",
            Self::Unknown(name) => name,
        }
    }

    /// Pseudo transactions are injected by validators; they carry no fee,
    /// sequence or signer and skip the prepare/populate steps.
    pub fn is_pseudo(&self) -> bool {
        matches!(self, Self::EnableAmendment | Self::SetFee | Self::UNLModify)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for TransactionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Every persistent ledger entry type the metadata interpreter and the
/// object views know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedgerEntryType {
    AccountRoot,
    RippleState,
    Offer,
    Escrow,
    Check,
    Ticket,
    PayChannel,
    NFTokenOffer,
    NFTokenPage,
    DirectoryNode,
    SignerList,
    DepositPreauth,
    FeeSettings,
    Amendments,
    Unknown(String),
}

impl LedgerEntryType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "AccountRoot" => Self::AccountRoot,
            "RippleState" => Self::RippleState,
            "Offer" => Self::Offer,
            "Escrow" => Self::Escrow,
            "Check" => Self::Check,
            "Ticket" => Self::Ticket,
            "PayChannel" => Self::PayChannel,
            "NFTokenOffer" => Self::NFTokenOffer,
            "NFTokenPage" => Self::NFTokenPage,
            "DirectoryNode" => Self::DirectoryNode,
            "SignerList" => Self::SignerList,
            "DepositPreauth" => Self::DepositPreauth,
            "FeeSettings" => Self::FeeSettings,
            "Amendments" => Self::Amendments,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::AccountRoot => "AccountRoot",
            Self::RippleState => "RippleState",
            Self::Offer => "Offer",
            Self::Escrow => "Escrow",
            Self::Check => "Check",
            Self::Ticket => "Ticket",
            Self::PayChannel => "PayChannel",
            Self::NFTokenOffer => "NFTokenOffer",
            Self::NFTokenPage => "NFTokenPage",
            Self::DirectoryNode => "DirectoryNode",
            Self::SignerList => "SignerList",
            Self::DepositPreauth => "DepositPreauth",
            Self::FeeSettings => "FeeSettings",
            Self::Amendments => "Amendments",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for LedgerEntryType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LedgerEntryType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// A currency-aware amount in its canonical decimal representation.
///
/// Native amounts carry the network's asset symbol and no issuer; issued
/// amounts carry the currency code and the issuing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: String,
    pub issuer: Option<String>,
    pub value: Decimal,
}

impl Amount {
    pub fn native(symbol: &str, value: Decimal) -> Self {
        Self {
            currency: symbol.to_string(),
            issuer: None,
            value,
        }
    }

    pub fn issued(currency: &str, issuer: &str, value: Decimal) -> Self {
        Self {
            currency: currency.to_string(),
            issuer: Some(issuer.to_string()),
            value,
        }
    }

    /// Canonical decimal string for this amount, trailing zeros stripped.
    pub fn value_string(&self) -> String {
        crate::amount::format(self.value)
    }
}

/// Destination of a funds-moving transaction: address plus optional tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub address: String,
    pub tag: Option<u32>,
}

/// Direction of a balance or owner-count change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeAction {
    Inc,
    Dec,
}

impl ChangeAction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Inc => Self::Dec,
            Self::Dec => Self::Inc,
        }
    }
}

/// One balance delta derived from metadata, owned by `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChangeRecord {
    pub address: String,
    pub currency: String,
    pub issuer: Option<String>,
    pub value: Decimal,
    pub action: ChangeAction,
}

/// One owner-count delta derived from metadata. `value` is the absolute
/// magnitude; `action` carries the sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCountChangeRecord {
    pub address: String,
    pub value: u32,
    pub action: ChangeAction,
}

/// A smart-contract hook execution record lifted verbatim from metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HookExecution {
    #[serde(rename = "HookAccount")]
    pub hook_account: Option<String>,
    #[serde(rename = "HookEmitCount")]
    pub hook_emit_count: Option<u32>,
    #[serde(rename = "HookExecutionIndex")]
    pub hook_execution_index: Option<u32>,
    #[serde(rename = "HookHash")]
    pub hook_hash: Option<String>,
    #[serde(rename = "HookInstructionCount")]
    pub hook_instruction_count: Option<String>,
    #[serde(rename = "HookResult")]
    pub hook_result: Option<u32>,
    #[serde(rename = "HookReturnCode")]
    pub hook_return_code: Option<String>,
    #[serde(rename = "HookReturnString")]
    pub hook_return_string: Option<String>,
    #[serde(rename = "HookStateChangeCount")]
    pub hook_state_change_count: Option<u32>,
}

/// Lifecycle of an order as read from one transaction's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Created,
    PartiallyFilled,
    Filled,
    Cancelled,
    Killed,
    Unknown,
}

/// Outcome of handing a signed blob to the ledger gateway. Submission
/// failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub success: bool,
    pub engine_result: Option<String>,
    pub message: Option<String>,
    pub transaction_id: Option<String>,
}

/// Outcome of waiting for a transaction to be validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub success: bool,
    pub transaction: Option<serde_json::Value>,
}

/// Unified view over the metadata-reported, submit and verify results.
/// The metadata-reported result always takes precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub success: bool,
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Snapshot of the connected ledger's head state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStatus {
    pub last_ledger_sequence: u32,
    pub base_fee_drops: u64,
}

/// Reserve requirements of the connected network, in native units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkReserve {
    pub base_reserve: Decimal,
    pub owner_reserve: Decimal,
}
