//! Collaborator traits at the crate boundary.
//!
//! The interpreter itself is pure; everything that touches the outside
//! world — network status, ledger RPC, the signing device — comes in
//! through these seams and is queried at call time, never cached here.

use crate::error::{ContextError, GatewayError, SignerError};
use crate::types::{LedgerStatus, NetworkReserve, SubmitResult, VerifyResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Synchronized network-status facts.
pub trait NetworkContext: Send + Sync {
    /// Symbol of the network's native asset, e.g. `"XRP"`.
    fn native_asset(&self) -> String;

    /// Numeric network id. Ids above the legacy cutoff must be stamped
    /// into transactions; legacy networks omit the field.
    fn network_id(&self) -> u32;

    /// Sequence and fee of the last closed ledger.
    fn ledger_status(&self) -> Result<LedgerStatus, ContextError>;

    /// Current reserve requirements, in native units.
    fn network_reserve(&self) -> NetworkReserve;

    /// Transaction types the connected network accepts.
    fn supported_transaction_types(&self) -> Vec<String>;
}

/// Asynchronous ledger RPC boundary.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Next sequence number for an account.
    async fn account_sequence(&self, address: &str) -> Result<u32, GatewayError>;

    /// Submit a signed blob. `fail_hard` asks the network not to relay a
    /// transaction that fails locally.
    async fn submit(
        &self,
        blob: &str,
        hash: Option<&str>,
        fail_hard: bool,
    ) -> Result<SubmitResult, GatewayError>;

    /// Poll until the transaction is validated or the collaborator's own
    /// deadline passes.
    async fn await_validation(&self, hash: &str) -> Result<VerifyResult, GatewayError>;
}

/// Asynchronous signing boundary (typically a UI round-trip to a key
/// store or hardware device).
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign(
        &self,
        payload: &serde_json::Value,
        multi_sign: bool,
    ) -> Result<SignResult, SignerError>;
}

/// What the external signer hands back. All-`Option` on purpose: the sign
/// flow validates completeness and rejects partial results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignResult {
    pub id: Option<String>,
    pub signed_blob: Option<String>,
    pub signer_pub_key: Option<String>,
    pub sign_method: Option<String>,
    pub signers: Option<Vec<String>>,
}

/// The account driving a signing flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningAccount {
    pub address: String,
    pub public_key: Option<String>,
}

impl SigningAccount {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            public_key: None,
        }
    }

    pub fn with_public_key(address: &str, public_key: &str) -> Self {
        Self {
            address: address.to_string(),
            public_key: Some(public_key.to_string()),
        }
    }
}
