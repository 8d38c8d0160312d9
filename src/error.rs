//! Error types for txlens

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxLensError {
    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("Date error: {0}")]
    Date(#[from] DateError),

    #[error("Flag error: {0}")]
    Flag(#[from] FlagError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),
}

/// Errors produced by the amount/decimal codec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount: {value}")]
    InvalidAmount { value: String },

    #[error("Too many decimal places: {value}")]
    TooManyDecimalPlaces { value: String },
}

/// Errors produced by the date codec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date type: {reason}")]
    InvalidDateType { reason: String },

    #[error("Invalid date: {value}")]
    InvalidDate { value: String },

    #[error("Date out of range: {value}")]
    OutOfRange { value: i64 },
}

/// Errors produced by the flag codec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("No flag table for type: {entity}")]
    UnsupportedType { entity: String },

    #[error("Unknown flag: {name}")]
    UnknownFlag { name: String },
}

/// Errors produced while decoding a raw wire record
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Missing required field: {name}")]
    MissingField { name: String },

    #[error("Invalid field {name}: {reason}")]
    InvalidField { name: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the sign/submit/verify state machine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Fee is not set")]
    FeeNotSet,

    #[error("Unable to set transaction sequence: {reason}")]
    UnableToSetSequence { reason: String },

    #[error("Unable to get last closed ledger: {reason}")]
    UnableToGetLastClosedLedger { reason: String },

    #[error("Transaction is already signed")]
    AlreadySigned,

    #[error("Transaction is already submitted")]
    AlreadySubmitted,

    #[error("Transaction is not signed")]
    NotSigned,

    #[error("Transaction was aborted")]
    Aborted,

    #[error("Transaction type {transaction_type} is not supported on the connected network")]
    UnsupportedTransactionType { transaction_type: String },

    #[error("Signer returned an incomplete result")]
    IncompleteSignResult,

    #[error("Signer returned no transaction id")]
    MissingTransactionId,

    #[error("Transaction has no hash to verify")]
    MissingTransactionHash,

    #[error("Signing failed: {reason}")]
    SigningFailed { reason: String },
}

/// Errors raised by the external ledger gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Ledger gateway unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Ledger gateway request failed: {reason}")]
    RequestFailed { reason: String },
}

/// Errors raised by the external signer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignerError {
    #[error("Signing was dismissed by the user")]
    Dismissed,

    #[error("Signing failed: {reason}")]
    Failed { reason: String },
}

/// Errors raised by the network-status collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Ledger status unavailable: {reason}")]
    LedgerStatusUnavailable { reason: String },
}
