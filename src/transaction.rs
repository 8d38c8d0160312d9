//! The transaction entity.
//!
//! A `LedgerTransaction` wraps the pristine raw wire record, a typed view
//! of its common and type-specific fields, and the normalized execution
//! metadata when the transaction has been applied. Entities are read-mostly
//! value objects: mutation only happens while building a transaction for
//! signing, and is rejected once a signed blob exists.

use crate::amount;
use crate::ctid;
use crate::error::{AmountError, DecodeError, LifecycleError, TxLensError};
use crate::flags;
use crate::memo::{Memo, MemoWrapper};
use crate::meta::TransactionMeta;
use crate::mutations::DerivedCaches;
use crate::traits::NetworkContext;
use crate::transactions::{nftoken, TxPayload};
use crate::types::{
    Amount, LedgerEntryType, SubmitResult, TransactionResult, TransactionType, VerifyResult,
    TES_SUCCESS,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Conventional network base fee, in drops.
pub const DEFAULT_BASE_FEE_DROPS: u64 = 12;

/// Fee multiplier applied per 16 fulfillment bytes on an escrow finish,
/// plus the fixed 33x floor charged for any fulfillment.
const ESCROW_FULFILLMENT_FEE_FLOOR: u64 = 33;

/// Fields shared by every transaction type.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonFields {
    #[serde(rename = "TransactionType")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Account")]
    pub account: Option<String>,
    #[serde(rename = "Fee")]
    pub fee: Option<String>,
    #[serde(rename = "Sequence")]
    pub sequence: Option<u32>,
    #[serde(rename = "Flags")]
    pub flags: Option<u32>,
    #[serde(rename = "LastLedgerSequence")]
    pub last_ledger_sequence: Option<u32>,
    #[serde(rename = "TicketSequence")]
    pub ticket_sequence: Option<u32>,
    #[serde(rename = "SourceTag")]
    pub source_tag: Option<u32>,
    #[serde(rename = "NetworkID")]
    pub network_id: Option<u32>,
    #[serde(rename = "SigningPubKey")]
    pub signing_pub_key: Option<String>,
    #[serde(rename = "TxnSignature")]
    pub txn_signature: Option<String>,
    #[serde(rename = "AccountTxnID")]
    pub account_txn_id: Option<String>,
    #[serde(rename = "Memos", default)]
    pub memos: Vec<MemoWrapper>,
    #[serde(rename = "Signers", default)]
    pub signers: Vec<SignerWrapper>,
    #[serde(rename = "hash")]
    pub hash: Option<String>,
    #[serde(rename = "ctid")]
    pub ctid: Option<String>,
    #[serde(rename = "ledger_index", alias = "inLedger")]
    pub ledger_index: Option<u32>,
}

/// Wire wrapper: each entry of the `Signers` array is `{"Signer": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerWrapper {
    #[serde(rename = "Signer")]
    pub signer: MultiSigner,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiSigner {
    #[serde(rename = "Account")]
    pub account: Option<String>,
    #[serde(rename = "TxnSignature")]
    pub txn_signature: Option<String>,
    #[serde(rename = "SigningPubKey")]
    pub signing_pub_key: Option<String>,
}

/// Where a transaction instance sits in the sign/submit/verify lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Unsigned,
    Signed,
    Submitted,
    VerifiedSuccess,
    VerifiedFailed,
}

/// Mutable signing-flow state carried alongside the entity.
#[derive(Debug)]
pub struct SigningState {
    pub(crate) phase: SubmissionPhase,
    pub(crate) signed_blob: Option<String>,
    pub(crate) signer_pub_key: Option<String>,
    pub(crate) sign_method: Option<String>,
    pub(crate) submit_result: Option<SubmitResult>,
    pub(crate) verify_result: Option<VerifyResult>,
    pub(crate) aborted: bool,
}

impl Default for SigningState {
    fn default() -> Self {
        Self {
            phase: SubmissionPhase::Unsigned,
            signed_blob: None,
            signer_pub_key: None,
            sign_method: None,
            submit_result: None,
            verify_result: None,
            aborted: false,
        }
    }
}

#[derive(Debug)]
pub struct LedgerTransaction {
    raw: Map<String, Value>,
    common: CommonFields,
    payload: TxPayload,
    meta: Option<TransactionMeta>,
    pub(crate) signing: SigningState,
    pub(crate) caches: DerivedCaches,
}

impl LedgerTransaction {
    /// Construct an entity from a raw transaction record and, when the
    /// transaction has been applied, its execution metadata. A metadata
    /// blob embedded in the record itself (`meta`/`metaData`) is picked up
    /// when no explicit one is given.
    pub fn from_wire(tx: Value, meta: Option<Value>) -> Result<Self, DecodeError> {
        let raw = match tx {
            Value::Object(map) => map,
            _ => return Err(DecodeError::NotAnObject),
        };
        let common: CommonFields = serde_json::from_value(Value::Object(raw.clone()))?;
        let payload = TxPayload::decode(&common.transaction_type, &raw)?;
        let meta_value = meta.or_else(|| {
            raw.get("meta")
                .or_else(|| raw.get("metaData"))
                .cloned()
        });
        let meta = meta_value.map(TransactionMeta::from_value).transpose()?;
        Ok(Self {
            raw,
            common,
            payload,
            meta,
            signing: SigningState::default(),
            caches: DerivedCaches::default(),
        })
    }

    /// Start a fresh unsigned transaction for the signing flow.
    pub fn new_unsigned(kind: TransactionType, account: &str) -> Self {
        let mut raw = Map::new();
        raw.insert("TransactionType".to_string(), json!(kind.name()));
        raw.insert("Account".to_string(), json!(account));
        // the raw map above always decodes
        Self::from_wire(Value::Object(raw), None).expect("minimal transaction decodes")
    }

    pub fn transaction_type(&self) -> &TransactionType {
        &self.common.transaction_type
    }

    pub fn is_pseudo(&self) -> bool {
        self.common.transaction_type.is_pseudo()
    }

    pub fn account(&self) -> Option<&str> {
        self.common.account.as_deref()
    }

    /// The network fee in drops, exactly as carried on the wire.
    pub fn fee_drops(&self) -> Result<Option<Decimal>, AmountError> {
        self.common
            .fee
            .as_deref()
            .map(|fee| amount::parse_str(fee, true))
            .transpose()
    }

    /// The network fee in native decimal units.
    pub fn fee_native(&self) -> Result<Option<Decimal>, AmountError> {
        Ok(self.fee_drops()?.map(amount::drops_to_native))
    }

    pub fn sequence(&self) -> Option<u32> {
        self.common.sequence
    }

    pub fn flags_bits(&self) -> Option<u32> {
        self.common.flags
    }

    /// Named view of the flag bitmask for this transaction's type.
    pub fn flags(&self) -> BTreeMap<&'static str, bool> {
        flags::parse_transaction_flags(&self.common.transaction_type, self.common.flags)
    }

    pub fn last_ledger_sequence(&self) -> Option<u32> {
        self.common.last_ledger_sequence
    }

    pub fn ticket_sequence(&self) -> Option<u32> {
        self.common.ticket_sequence
    }

    pub fn source_tag(&self) -> Option<u32> {
        self.common.source_tag
    }

    pub fn network_id(&self) -> Option<u32> {
        self.common.network_id
    }

    pub fn signing_pub_key(&self) -> Option<&str> {
        self.common.signing_pub_key.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.common.hash.as_deref()
    }

    pub fn ledger_index(&self) -> Option<u32> {
        self.common.ledger_index
    }

    pub fn memos(&self) -> impl Iterator<Item = &Memo> {
        self.common.memos.iter().map(|wrapper| &wrapper.memo)
    }

    pub fn multi_signers(&self) -> impl Iterator<Item = &MultiSigner> {
        self.common.signers.iter().map(|wrapper| &wrapper.signer)
    }

    pub fn payload(&self) -> &TxPayload {
        &self.payload
    }

    pub fn meta(&self) -> Option<&TransactionMeta> {
        self.meta.as_ref()
    }

    /// The compact transaction identifier: taken verbatim from the wire
    /// when present, otherwise computed from the validated ledger position
    /// and the connected network id.
    pub fn ctid(&self, network_id: u32) -> Option<String> {
        if let Some(wire_ctid) = self.common.ctid.as_deref() {
            return Some(wire_ctid.to_string());
        }
        let ledger_index = self.common.ledger_index?;
        let transaction_index = self.meta.as_ref()?.transaction_index?;
        Some(ctid::encode(
            ledger_index,
            transaction_index as u16,
            network_id as u16,
        ))
    }

    /// The amount that actually arrived, which can differ from the
    /// requested amount under partial-payment semantics. The metadata's
    /// delivered amount is the source of truth; the requested amount is
    /// only a fallback when none was recorded at all.
    pub fn delivered_amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        let recorded = self.meta.as_ref().and_then(|meta| meta.delivered_amount());
        match recorded.or_else(|| self.payload.requested_amount()) {
            Some(wire) => Ok(Some(wire.decode(native_asset)?)),
            None => Ok(None),
        }
    }

    /// The id of the token minted by this transaction. Prefers the id the
    /// server already computed; otherwise reconstructs it from the
    /// minter's pre-mint token counter found in metadata.
    pub fn computed_nftoken_id(&self) -> Option<String> {
        let mint = match &self.payload {
            TxPayload::NFTokenMint(mint) => mint,
            _ => return None,
        };
        let meta = self.meta.as_ref()?;
        if let Some(id) = meta.nftoken_id.as_deref() {
            return Some(id.to_string());
        }
        let issuer = mint
            .issuer
            .as_deref()
            .or(self.common.account.as_deref())?;
        let node = meta.find_account_root(issuer)?;
        // the counter before this mint; absent on a first-ever mint
        let sequence = crate::wire::get_u64(&node.previous_fields, "MintedNFTokens")
            .unwrap_or(0) as u32;
        nftoken::compute_nftoken_id(
            (self.common.flags.unwrap_or(0) & 0xFFFF) as u16,
            mint.transfer_fee.unwrap_or(0) as u16,
            issuer,
            mint.nftoken_taxon.unwrap_or(0),
            sequence,
        )
    }

    /// Ledger index of the payment channel created by this transaction.
    pub fn created_channel_id(&self) -> Option<&str> {
        if !matches!(self.payload, TxPayload::PaymentChannelCreate(_)) {
            return None;
        }
        self.meta
            .as_ref()?
            .created_node_index(&LedgerEntryType::PayChannel)
    }

    /// Sequences of the tickets this transaction created.
    pub fn created_ticket_sequences(&self) -> Vec<u32> {
        self.meta
            .as_ref()
            .map(|meta| meta.parse_ticket_sequences())
            .unwrap_or_default()
    }

    /// Whether this offer matched against the order book when it was
    /// applied: metadata shows an existing offer modified or consumed.
    pub fn offer_executed(&self) -> bool {
        matches!(self.payload, TxPayload::OfferCreate(_))
            && self
                .meta
                .as_ref()
                .map(|meta| meta.touched_order_book())
                .unwrap_or(false)
    }

    /// Compute the fee this transaction should carry, starting from the
    /// network base fee in drops. Returns a whole-drop decimal string.
    pub fn calculate_fee(&self, base_fee_drops: u64, network: &dyn NetworkContext) -> String {
        match &self.payload {
            TxPayload::EscrowFinish(finish) => match finish.fulfillment_byte_length() {
                Some(bytes) => {
                    let units = bytes / 16 + ESCROW_FULFILLMENT_FEE_FLOOR;
                    (base_fee_drops * units).to_string()
                }
                None => base_fee_drops.to_string(),
            },
            // deleting an account burns the full owner reserve instead of a fee
            TxPayload::AccountDelete(_) => {
                let reserve = network.network_reserve().owner_reserve;
                amount::format(amount::native_to_drops(reserve))
            }
            _ => base_fee_drops.to_string(),
        }
    }

    /// The payload handed to the external signer: the pristine raw record
    /// plus any fields populated while preparing.
    pub fn signing_payload(&self) -> Value {
        Value::Object(self.raw.clone())
    }

    /// Unified outcome. The metadata-reported engine result always wins
    /// over what submit or verify observed.
    pub fn result(&self) -> TransactionResult {
        if let Some(code) = self
            .meta
            .as_ref()
            .and_then(|meta| meta.transaction_result.as_deref())
        {
            return TransactionResult {
                success: code == TES_SUCCESS,
                code: Some(code.to_string()),
                message: None,
            };
        }
        if let Some(submit) = &self.signing.submit_result {
            return TransactionResult {
                success: submit.success,
                code: submit.engine_result.clone(),
                message: submit.message.clone(),
            };
        }
        if let Some(verify) = &self.signing.verify_result {
            return TransactionResult {
                success: verify.success,
                code: None,
                message: None,
            };
        }
        TransactionResult {
            success: false,
            code: None,
            message: Some("no result recorded".to_string()),
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.signing.phase
    }

    pub fn signed_blob(&self) -> Option<&str> {
        self.signing.signed_blob.as_deref()
    }

    pub fn sign_method(&self) -> Option<&str> {
        self.signing.sign_method.as_deref()
    }

    pub fn signer_pub_key(&self) -> Option<&str> {
        self.signing.signer_pub_key.as_deref()
    }

    pub fn submit_result(&self) -> Option<&SubmitResult> {
        self.signing.submit_result.as_ref()
    }

    pub fn verify_result(&self) -> Option<&VerifyResult> {
        self.signing.verify_result.as_ref()
    }

    pub fn is_aborted(&self) -> bool {
        self.signing.aborted
    }

    /// Cooperative cancellation: flags the instance so the next lifecycle
    /// step refuses to start. Does not interrupt an in-flight call.
    pub fn abort(&mut self) -> Result<(), LifecycleError> {
        match self.signing.phase {
            SubmissionPhase::Unsigned | SubmissionPhase::Signed => {
                self.signing.aborted = true;
                Ok(())
            }
            _ => Err(LifecycleError::AlreadySubmitted),
        }
    }

    fn ensure_mutable(&self) -> Result<(), LifecycleError> {
        if self.signing.signed_blob.is_some() {
            return Err(LifecycleError::AlreadySigned);
        }
        Ok(())
    }

    pub fn set_fee(&mut self, fee_drops: &str) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        self.common.fee = Some(fee_drops.to_string());
        self.raw.insert("Fee".to_string(), json!(fee_drops));
        Ok(())
    }

    pub fn set_sequence(&mut self, sequence: u32) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        self.common.sequence = Some(sequence);
        self.raw.insert("Sequence".to_string(), json!(sequence));
        Ok(())
    }

    pub fn set_last_ledger_sequence(&mut self, sequence: u32) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        self.common.last_ledger_sequence = Some(sequence);
        self.raw
            .insert("LastLedgerSequence".to_string(), json!(sequence));
        Ok(())
    }

    pub fn set_network_id(&mut self, network_id: u32) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        self.common.network_id = Some(network_id);
        self.raw.insert("NetworkID".to_string(), json!(network_id));
        Ok(())
    }

    pub fn set_signing_pub_key(&mut self, public_key: &str) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        self.common.signing_pub_key = Some(public_key.to_string());
        self.raw
            .insert("SigningPubKey".to_string(), json!(public_key));
        Ok(())
    }

    /// Populate the channel public key of a payment channel create. A
    /// no-op for every other type.
    pub fn set_channel_public_key(&mut self, public_key: &str) -> Result<(), LifecycleError> {
        self.ensure_mutable()?;
        if let TxPayload::PaymentChannelCreate(create) = &mut self.payload {
            create.public_key = Some(public_key.to_string());
            self.raw.insert("PublicKey".to_string(), json!(public_key));
        }
        Ok(())
    }

    /// OR a named flag into the bitmask through the flag codec.
    pub fn set_flag(&mut self, name: &str) -> Result<(), TxLensError> {
        self.ensure_mutable().map_err(TxLensError::from)?;
        let bits = flags::set_transaction_flag(
            &self.common.transaction_type,
            name,
            self.common.flags.unwrap_or(0),
        )?;
        self.common.flags = Some(bits);
        self.raw.insert("Flags".to_string(), json!(bits));
        Ok(())
    }

    pub(crate) fn record_sign_result(
        &mut self,
        id: Option<String>,
        signed_blob: String,
        signer_pub_key: String,
        sign_method: String,
        signers: Option<Vec<String>>,
    ) {
        if let Some(hash) = &id {
            self.common.hash = Some(hash.clone());
        }
        if let Some(signers) = signers {
            let wrapped: Vec<SignerWrapper> = signers
                .iter()
                .map(|account| SignerWrapper {
                    signer: MultiSigner {
                        account: Some(account.clone()),
                        txn_signature: None,
                        signing_pub_key: None,
                    },
                })
                .collect();
            self.common.signers = wrapped;
        }
        self.signing.signed_blob = Some(signed_blob);
        self.signing.signer_pub_key = Some(signer_pub_key);
        self.signing.sign_method = Some(sign_method);
        self.signing.phase = SubmissionPhase::Signed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payment_tx() -> LedgerTransaction {
        LedgerTransaction::from_wire(
            json!({
                "TransactionType": "Payment",
                "Account": "rAlice",
                "Destination": "rBob",
                "Amount": "85532100",
                "Fee": "12",
                "Sequence": 7
            }),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_common_field_decode() {
        let tx = payment_tx();
        assert_eq!(tx.transaction_type(), &TransactionType::Payment);
        assert_eq!(tx.account(), Some("rAlice"));
        assert_eq!(tx.sequence(), Some(7));
        assert_eq!(crate::amount::format(tx.fee_drops().unwrap().unwrap()), "12");
    }

    #[test]
    fn test_setters_rejected_after_signing() {
        let mut tx = payment_tx();
        tx.record_sign_result(
            Some("HASH".to_string()),
            "BLOB".to_string(),
            "PUBKEY".to_string(),
            "tangem".to_string(),
            None,
        );
        assert_eq!(tx.set_fee("24"), Err(LifecycleError::AlreadySigned));
        assert_eq!(tx.set_sequence(8), Err(LifecycleError::AlreadySigned));
    }

    #[test]
    fn test_wire_ctid_returned_verbatim() {
        let tx = LedgerTransaction::from_wire(
            json!({
                "TransactionType": "Payment",
                "Account": "rAlice",
                "ctid": "CDEADBEEF0010001",
                "ledger_index": 57913674,
                "meta": { "AffectedNodes": [], "TransactionIndex": 4 }
            }),
            None,
        )
        .unwrap();
        assert_eq!(tx.ctid(0).as_deref(), Some("CDEADBEEF0010001"));
    }

    #[test]
    fn test_ctid_computed_from_ledger_position() {
        let tx = LedgerTransaction::from_wire(
            json!({
                "TransactionType": "Payment",
                "Account": "rAlice",
                "ledger_index": 57913674,
                "meta": { "AffectedNodes": [], "TransactionIndex": 4 }
            }),
            None,
        )
        .unwrap();
        assert_eq!(tx.ctid(0).as_deref(), Some("C373B14A00040000"));
    }

    #[test]
    fn test_abort_blocked_after_submission() {
        let mut tx = payment_tx();
        tx.signing.phase = SubmissionPhase::Submitted;
        assert_eq!(tx.abort(), Err(LifecycleError::AlreadySubmitted));
    }
}
