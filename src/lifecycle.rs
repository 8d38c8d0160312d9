//! Sign/submit/verify lifecycle.
//!
//! A strictly sequential state machine per transaction instance:
//! `Unsigned -> Signed -> Submitted -> {VerifiedSuccess, VerifiedFailed}`,
//! with a cooperative abort flag checked at each step boundary. Suspension
//! points are exactly the collaborator awaits; nothing here retries.

use crate::error::{LifecycleError, SignerError};
use crate::traits::{LedgerGateway, NetworkContext, SigningAccount, TransactionSigner};
use crate::transaction::{LedgerTransaction, SubmissionPhase};
use crate::transactions::TxPayload;
use crate::types::{SubmitResult, VerifyResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Engine code synthesized when submission fails locally instead of on
/// the ledger.
pub const TEL_FAILED: &str = "telFAILED";

/// `LastLedgerSequence` values below this cannot be absolute ledger
/// sequences and are interpreted as relative offsets.
const RELATIVE_LAST_LEDGER_THRESHOLD: u32 = 32_570;

/// Networks with ids above this cutoff must stamp `NetworkID` into every
/// transaction; legacy networks omit the field for wire compatibility.
const LEGACY_NETWORK_ID_CUTOFF: u32 = 1_024;

/// Tuning knobs of the lifecycle.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Ledgers of headroom granted beyond the current ledger; sized above
    /// the close cadence so slow external signing devices still make it.
    pub last_ledger_offset: u32,
    /// Upper bound on waiting for validation.
    pub verify_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            last_ledger_offset: 20,
            verify_timeout: Duration::from_secs(25),
        }
    }
}

/// Drives transactions through signing, submission and verification
/// against the external collaborators.
#[derive(Debug)]
pub struct SignFlow<N, G, S> {
    network: N,
    gateway: G,
    signer: S,
    config: LifecycleConfig,
}

impl<N, G, S> SignFlow<N, G, S>
where
    N: NetworkContext,
    G: LedgerGateway,
    S: TransactionSigner,
{
    pub fn new(network: N, gateway: G, signer: S) -> Self {
        Self {
            network,
            gateway,
            signer,
            config: LifecycleConfig::default(),
        }
    }

    pub fn with_config(network: N, gateway: G, signer: S, config: LifecycleConfig) -> Self {
        Self {
            network,
            gateway,
            signer,
            config,
        }
    }

    /// Fill in what signing requires: a fee must already be set, a
    /// missing sequence is fetched from the ledger, and a payment channel
    /// create gets its public key from the signer. No-op for pseudo
    /// transactions.
    pub async fn prepare(
        &self,
        tx: &mut LedgerTransaction,
        account: &SigningAccount,
    ) -> Result<(), LifecycleError> {
        if tx.is_pseudo() {
            return Ok(());
        }
        match tx.fee_drops() {
            Ok(Some(_)) => {}
            _ => return Err(LifecycleError::FeeNotSet),
        }
        if tx.sequence().is_none() {
            if tx.ticket_sequence().is_some() {
                // ticketed transactions pin their sequence to zero
                tx.set_sequence(0)?;
            } else {
                let address = tx
                    .account()
                    .ok_or_else(|| LifecycleError::UnableToSetSequence {
                        reason: "transaction has no account".to_string(),
                    })?
                    .to_string();
                let sequence = self
                    .gateway
                    .account_sequence(&address)
                    .await
                    .map_err(|error| LifecycleError::UnableToSetSequence {
                        reason: error.to_string(),
                    })?;
                tx.set_sequence(sequence)?;
            }
        }
        if let TxPayload::PaymentChannelCreate(create) = tx.payload() {
            if create.public_key.is_none() {
                if let Some(public_key) = account.public_key.clone() {
                    tx.set_channel_public_key(&public_key)?;
                }
            }
        }
        Ok(())
    }

    /// Compute an effective `LastLedgerSequence` and stamp the network id
    /// where the connected network requires one. No-op for pseudo
    /// transactions.
    pub async fn populate_fields(&self, tx: &mut LedgerTransaction) -> Result<(), LifecycleError> {
        if tx.is_pseudo() {
            return Ok(());
        }
        let status = self
            .network
            .ledger_status()
            .map_err(|error| LifecycleError::UnableToGetLastClosedLedger {
                reason: error.to_string(),
            })?;
        let expected = status.last_ledger_sequence + self.config.last_ledger_offset;
        match tx.last_ledger_sequence() {
            None => tx.set_last_ledger_sequence(expected)?,
            Some(value) if value < RELATIVE_LAST_LEDGER_THRESHOLD => {
                // small values are relative offsets, not ledger sequences
                tx.set_last_ledger_sequence(status.last_ledger_sequence + value)?;
            }
            Some(value) if value < expected => {
                warn!(value, expected, "stale LastLedgerSequence bumped");
                tx.set_last_ledger_sequence(expected)?;
            }
            Some(_) => {}
        }

        let network_id = self.network.network_id();
        if network_id > LEGACY_NETWORK_ID_CUTOFF && tx.network_id().is_none() {
            tx.set_network_id(network_id)?;
        }
        Ok(())
    }

    /// Run the external signer and record its result on the entity.
    pub async fn sign(
        &self,
        tx: &mut LedgerTransaction,
        account: &SigningAccount,
        multi_sign: bool,
    ) -> Result<(), LifecycleError> {
        if tx.is_aborted() {
            return Err(LifecycleError::Aborted);
        }
        if tx.signed_blob().is_some() {
            return Err(LifecycleError::AlreadySigned);
        }
        if !tx.is_pseudo() {
            let name = tx.transaction_type().name().to_string();
            let supported = self.network.supported_transaction_types();
            if !supported.iter().any(|supported_type| supported_type == &name) {
                return Err(LifecycleError::UnsupportedTransactionType {
                    transaction_type: name,
                });
            }
        }
        if !multi_sign {
            self.prepare(tx, account).await?;
        }

        let result = self
            .signer
            .sign(&tx.signing_payload(), multi_sign)
            .await
            .map_err(|error| match error {
                SignerError::Dismissed => LifecycleError::Aborted,
                SignerError::Failed { reason } => LifecycleError::SigningFailed { reason },
            })?;

        let (signed_blob, signer_pub_key, sign_method) = match (
            result.signed_blob,
            result.signer_pub_key,
            result.sign_method,
        ) {
            (Some(blob), Some(public_key), Some(method)) => (blob, public_key, method),
            _ => return Err(LifecycleError::IncompleteSignResult),
        };
        if result.id.is_none() && !tx.is_pseudo() {
            return Err(LifecycleError::MissingTransactionId);
        }

        debug!(method = %sign_method, "transaction signed");
        tx.record_sign_result(result.id, signed_blob, signer_pub_key, sign_method, result.signers);
        Ok(())
    }

    /// Hand the signed blob to the ledger gateway. Transport failures
    /// become a local `telFAILED` result value; only lifecycle violations
    /// reject.
    pub async fn submit(
        &self,
        tx: &mut LedgerTransaction,
    ) -> Result<SubmitResult, LifecycleError> {
        if tx.is_aborted() {
            return Err(LifecycleError::Aborted);
        }
        let blob = tx.signed_blob().ok_or(LifecycleError::NotSigned)?.to_string();
        if tx.phase() != SubmissionPhase::Signed {
            return Err(LifecycleError::AlreadySubmitted);
        }
        // a failed account delete must not be relayed: it would still burn
        // the owner reserve as its fee
        let fail_hard = matches!(tx.payload(), TxPayload::AccountDelete(_));
        let hash = tx.hash().map(str::to_string);

        let result = match self.gateway.submit(&blob, hash.as_deref(), fail_hard).await {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, "submission failed locally");
                SubmitResult {
                    success: false,
                    engine_result: Some(TEL_FAILED.to_string()),
                    message: Some(error.to_string()),
                    transaction_id: None,
                }
            }
        };
        tx.signing.submit_result = Some(result.clone());
        tx.signing.phase = SubmissionPhase::Submitted;
        Ok(result)
    }

    /// Wait for the submitted transaction to be validated. Resolves with
    /// a not-verified result on gateway failure or timeout, never hangs.
    pub async fn verify(
        &self,
        tx: &mut LedgerTransaction,
    ) -> Result<VerifyResult, LifecycleError> {
        let hash = tx
            .hash()
            .ok_or(LifecycleError::MissingTransactionHash)?
            .to_string();

        let outcome = match tokio::time::timeout(
            self.config.verify_timeout,
            self.gateway.await_validation(&hash),
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => {
                warn!(%error, "verification errored");
                VerifyResult {
                    success: false,
                    transaction: None,
                }
            }
            Err(_) => {
                warn!(%hash, "verification timed out");
                VerifyResult {
                    success: false,
                    transaction: None,
                }
            }
        };
        tx.signing.verify_result = Some(outcome.clone());
        tx.signing.phase = if outcome.success {
            SubmissionPhase::VerifiedSuccess
        } else {
            SubmissionPhase::VerifiedFailed
        };
        Ok(outcome)
    }
}
