//! txlens
//!
//! Typed decoding and balance-effect interpretation for ledger
//! transactions: exact-decimal amount/date/flag codecs, a metadata diff
//! interpreter deriving what actually changed, per-type entity views and a
//! sign/submit/verify lifecycle over external collaborators.

pub mod amount;
pub mod ctid;
pub mod date;
pub mod error;
pub mod flags;
pub mod lifecycle;
pub mod memo;
pub mod meta;
pub mod mutations;
pub mod object;
pub mod objects;
pub mod traits;
pub mod transaction;
pub mod transactions;
pub mod types;
pub mod wire;

// Re-export core types and traits
pub use error::{
    AmountError, ContextError, DateError, DecodeError, FlagError, GatewayError, LifecycleError,
    SignerError, TxLensError,
};
pub use lifecycle::{LifecycleConfig, SignFlow, TEL_FAILED};
pub use meta::{AffectedNode, DiffType, TransactionMeta};
pub use mutations::BalanceChangeView;
pub use object::{LedgerObject, ObjectCommonFields};
pub use objects::ObjectPayload;
pub use traits::{LedgerGateway, NetworkContext, SignResult, SigningAccount, TransactionSigner};
pub use transaction::{
    CommonFields, LedgerTransaction, SubmissionPhase, DEFAULT_BASE_FEE_DROPS,
};
pub use transactions::TxPayload;
pub use types::{
    Amount, BalanceChangeRecord, ChangeAction, Destination, HookExecution, LedgerEntryType,
    LedgerStatus, NetworkReserve, OfferStatus, OwnerCountChangeRecord, SubmitResult,
    TransactionResult, TransactionType, VerifyResult, TES_SUCCESS,
};
pub use wire::WireAmount;
