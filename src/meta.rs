//! Metadata diff interpreter.
//!
//! Execution metadata is a list of created/modified/deleted ledger-node
//! snapshots. This module normalizes those nodes and derives the facts the
//! transaction body alone cannot tell: per-address balance deltas (with the
//! trustline perspective flip), owner-count deltas, offer lifecycle status,
//! ticket sequences and hook executions.

use crate::amount;
use crate::error::DecodeError;
use crate::types::{
    BalanceChangeRecord, ChangeAction, HookExecution, LedgerEntryType, OfferStatus,
    OwnerCountChangeRecord,
};
use crate::wire::{self, WireAmount};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// Kind of diff a node went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffType {
    Created,
    Modified,
    Deleted,
}

/// One affected ledger node with its single-key wire wrapper flattened.
/// Field maps stay open JSON maps; metadata is heterogeneous per entry type.
#[derive(Debug, Clone)]
pub struct AffectedNode {
    pub diff_type: DiffType,
    pub entry_type: LedgerEntryType,
    pub ledger_index: Option<String>,
    pub new_fields: Map<String, Value>,
    pub final_fields: Map<String, Value>,
    pub previous_fields: Map<String, Value>,
}

impl AffectedNode {
    /// The most complete field map for this node: final fields when the
    /// node already existed, new fields when it was just created.
    pub fn fields(&self) -> &Map<String, Value> {
        if self.final_fields.is_empty() {
            &self.new_fields
        } else {
            &self.final_fields
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNodeBody {
    #[serde(rename = "LedgerEntryType")]
    ledger_entry_type: LedgerEntryType,
    #[serde(rename = "LedgerIndex")]
    ledger_index: Option<String>,
    #[serde(rename = "NewFields")]
    new_fields: Option<Map<String, Value>>,
    #[serde(rename = "FinalFields")]
    final_fields: Option<Map<String, Value>>,
    #[serde(rename = "PreviousFields")]
    previous_fields: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
enum RawNode {
    CreatedNode(RawNodeBody),
    ModifiedNode(RawNodeBody),
    DeletedNode(RawNodeBody),
}

#[derive(Debug, Deserialize)]
struct RawHookExecutionWrapper {
    #[serde(rename = "HookExecution")]
    hook_execution: HookExecution,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    #[serde(rename = "AffectedNodes", default)]
    affected_nodes: Vec<RawNode>,
    #[serde(rename = "TransactionIndex")]
    transaction_index: Option<u32>,
    #[serde(rename = "TransactionResult")]
    transaction_result: Option<String>,
    #[serde(rename = "DeliveredAmount")]
    delivered_amount: Option<WireAmount>,
    #[serde(rename = "delivered_amount")]
    delivered_amount_computed: Option<WireAmount>,
    #[serde(rename = "HookExecutions", default)]
    hook_executions: Vec<RawHookExecutionWrapper>,
    #[serde(rename = "nftoken_id")]
    nftoken_id: Option<String>,
}

/// Normalized execution metadata for one transaction.
#[derive(Debug, Clone, Default)]
pub struct TransactionMeta {
    pub affected_nodes: Vec<AffectedNode>,
    pub transaction_index: Option<u32>,
    pub transaction_result: Option<String>,
    pub nftoken_id: Option<String>,
    delivered_amount: Option<WireAmount>,
    delivered_amount_computed: Option<WireAmount>,
    hook_executions: Vec<HookExecution>,
}

impl TransactionMeta {
    pub fn from_value(raw: Value) -> Result<Self, DecodeError> {
        let raw: RawMeta = serde_json::from_value(raw)?;
        let affected_nodes = raw
            .affected_nodes
            .into_iter()
            .map(|node| {
                let (diff_type, body) = match node {
                    RawNode::CreatedNode(body) => (DiffType::Created, body),
                    RawNode::ModifiedNode(body) => (DiffType::Modified, body),
                    RawNode::DeletedNode(body) => (DiffType::Deleted, body),
                };
                AffectedNode {
                    diff_type,
                    entry_type: body.ledger_entry_type,
                    ledger_index: body.ledger_index,
                    new_fields: body.new_fields.unwrap_or_default(),
                    final_fields: body.final_fields.unwrap_or_default(),
                    previous_fields: body.previous_fields.unwrap_or_default(),
                }
            })
            .collect();
        Ok(Self {
            affected_nodes,
            transaction_index: raw.transaction_index,
            transaction_result: raw.transaction_result,
            nftoken_id: raw.nftoken_id,
            delivered_amount: raw.delivered_amount,
            delivered_amount_computed: raw.delivered_amount_computed,
            hook_executions: raw
                .hook_executions
                .into_iter()
                .map(|wrapper| wrapper.hook_execution)
                .collect(),
        })
    }

    /// The delivered amount recorded by the ledger, if any. The literal
    /// `"unavailable"` sentinel of old partial-payment metadata counts as
    /// absent.
    pub fn delivered_amount(&self) -> Option<&WireAmount> {
        self.delivered_amount
            .as_ref()
            .or(self.delivered_amount_computed.as_ref())
            .filter(|wire| !matches!(wire, WireAmount::Drops(s) if s.as_str() == "unavailable"))
    }

    /// Per-address balance deltas, grouped by owning address. Records of
    /// the same address sharing (action, currency, issuer) are summed,
    /// never overwritten. Zero deltas are omitted entirely.
    pub fn parse_balance_changes(
        &self,
        native_asset: &str,
    ) -> BTreeMap<String, Vec<BalanceChangeRecord>> {
        let mut grouped: BTreeMap<String, Vec<BalanceChangeRecord>> = BTreeMap::new();
        for node in &self.affected_nodes {
            match node.entry_type {
                LedgerEntryType::AccountRoot => {
                    if let Some(record) = native_balance_change(node, native_asset) {
                        consolidate(&mut grouped, record);
                    }
                }
                LedgerEntryType::RippleState => {
                    for record in trustline_balance_changes(node) {
                        consolidate(&mut grouped, record);
                    }
                }
                _ => {}
            }
        }
        grouped
    }

    /// Owner-count deltas for accounts whose reserve requirement moved.
    /// Zero deltas are invisible, not explicit zero records.
    pub fn parse_owner_count_changes(&self) -> Vec<OwnerCountChangeRecord> {
        let mut changes = Vec::new();
        for node in &self.affected_nodes {
            if node.entry_type != LedgerEntryType::AccountRoot {
                continue;
            }
            let (previous, current) = match (
                wire::get_u64(&node.previous_fields, "OwnerCount"),
                wire::get_u64(&node.final_fields, "OwnerCount"),
            ) {
                (Some(previous), Some(current)) => (previous as i64, current as i64),
                _ => continue,
            };
            let delta = current - previous;
            if delta == 0 {
                continue;
            }
            let address = match wire::get_str(node.fields(), "Account") {
                Some(address) => address.to_string(),
                None => continue,
            };
            changes.push(OwnerCountChangeRecord {
                address,
                value: delta.unsigned_abs() as u32,
                action: if delta > 0 {
                    ChangeAction::Inc
                } else {
                    ChangeAction::Dec
                },
            });
        }
        changes
    }

    /// Sequences of tickets created by this transaction.
    pub fn parse_ticket_sequences(&self) -> Vec<u32> {
        self.affected_nodes
            .iter()
            .filter(|node| {
                node.diff_type == DiffType::Created && node.entry_type == LedgerEntryType::Ticket
            })
            .filter_map(|node| wire::get_u64(&node.new_fields, "TicketSequence"))
            .map(|sequence| sequence as u32)
            .collect()
    }

    /// Lifecycle status of a single offer node.
    pub fn offer_status(node: &AffectedNode) -> OfferStatus {
        match node.diff_type {
            DiffType::Created => OfferStatus::Created,
            DiffType::Modified => OfferStatus::PartiallyFilled,
            DiffType::Deleted => {
                // an order consumed to zero is removed with its last
                // TakerPays movement recorded; a cancelled one is not
                if node.previous_fields.contains_key("TakerPays") {
                    OfferStatus::Filled
                } else {
                    OfferStatus::Cancelled
                }
            }
        }
    }

    /// Lifecycle status of `owner`'s offer, by ledger index when known.
    ///
    /// When the direct lookup is inconclusive this falls back to a
    /// best-effort heuristic: a modified trustline naming the owner means
    /// the offer moved funds, its absence means the offer was killed
    /// outright. Multi-offer-consuming transactions can fool it.
    pub fn parse_offer_status_change(
        &self,
        owner: &str,
        offer_index: Option<&str>,
    ) -> OfferStatus {
        let offer_nodes: Vec<&AffectedNode> = self
            .affected_nodes
            .iter()
            .filter(|node| node.entry_type == LedgerEntryType::Offer)
            .collect();

        let direct = match offer_index {
            Some(index) => offer_nodes
                .iter()
                .find(|node| node.ledger_index.as_deref() == Some(index))
                .copied(),
            None => {
                let owned: Vec<&AffectedNode> = offer_nodes
                    .iter()
                    .filter(|node| wire::get_str(node.fields(), "Account") == Some(owner))
                    .copied()
                    .collect();
                if owned.len() == 1 {
                    Some(owned[0])
                } else {
                    None
                }
            }
        };

        let base = direct.map(Self::offer_status).unwrap_or(OfferStatus::Unknown);
        match base {
            OfferStatus::Unknown | OfferStatus::Created => {
                debug!(owner, ?base, "offer status inconclusive, using trustline heuristic");
                let moved_funds = self.affected_nodes.iter().any(|node| {
                    node.diff_type == DiffType::Modified
                        && node.entry_type == LedgerEntryType::RippleState
                        && (wire::get_limit_issuer(node.fields(), "HighLimit") == Some(owner)
                            || wire::get_limit_issuer(node.fields(), "LowLimit") == Some(owner))
                });
                match (base, moved_funds) {
                    (OfferStatus::Unknown, true) => OfferStatus::Filled,
                    (OfferStatus::Created, true) => OfferStatus::PartiallyFilled,
                    (OfferStatus::Unknown, false) => OfferStatus::Killed,
                    (other, _) => other,
                }
            }
            conclusive => conclusive,
        }
    }

    /// Hook execution records, lifted verbatim.
    pub fn parse_hook_executions(&self) -> &[HookExecution] {
        &self.hook_executions
    }

    /// The affected `AccountRoot` node owned by `address`, if any.
    pub fn find_account_root(&self, address: &str) -> Option<&AffectedNode> {
        self.affected_nodes.iter().find(|node| {
            node.entry_type == LedgerEntryType::AccountRoot
                && wire::get_str(node.fields(), "Account") == Some(address)
        })
    }

    /// Ledger index of the first created node of `entry_type`.
    pub fn created_node_index(&self, entry_type: &LedgerEntryType) -> Option<&str> {
        self.affected_nodes
            .iter()
            .find(|node| node.diff_type == DiffType::Created && node.entry_type == *entry_type)
            .and_then(|node| node.ledger_index.as_deref())
    }

    /// Whether any order-book offer was modified or deleted, i.e. whether
    /// the transaction matched against existing orders.
    pub fn touched_order_book(&self) -> bool {
        self.affected_nodes.iter().any(|node| {
            node.entry_type == LedgerEntryType::Offer
                && matches!(node.diff_type, DiffType::Modified | DiffType::Deleted)
        })
    }
}

fn consolidate(
    grouped: &mut BTreeMap<String, Vec<BalanceChangeRecord>>,
    record: BalanceChangeRecord,
) {
    let records = grouped.entry(record.address.clone()).or_default();
    if let Some(existing) = records.iter_mut().find(|existing| {
        existing.action == record.action
            && existing.currency == record.currency
            && existing.issuer == record.issuer
    }) {
        existing.value += record.value;
    } else {
        records.push(record);
    }
}

fn native_balance_change(node: &AffectedNode, native_asset: &str) -> Option<BalanceChangeRecord> {
    let (previous, current) = match node.diff_type {
        DiffType::Created => {
            let created = wire::get_str(&node.new_fields, "Balance")?;
            (Decimal::ZERO, parse_drops(created)?)
        }
        DiffType::Modified | DiffType::Deleted => {
            let previous = parse_drops(wire::get_str(&node.previous_fields, "Balance")?)?;
            let current = parse_drops(wire::get_str(&node.final_fields, "Balance")?)?;
            (previous, current)
        }
    };
    let delta = current - previous;
    if delta.is_zero() {
        return None;
    }
    let address = wire::get_str(node.fields(), "Account")?.to_string();
    Some(BalanceChangeRecord {
        address,
        currency: native_asset.to_string(),
        issuer: None,
        value: amount::round_derived(amount::drops_to_native(delta.abs())),
        action: if delta > Decimal::ZERO {
            ChangeAction::Inc
        } else {
            ChangeAction::Dec
        },
    })
}

/// A trustline balance is stored from the low account's perspective; the
/// high account's actual change is the exact negation.
fn trustline_balance_changes(node: &AffectedNode) -> Vec<BalanceChangeRecord> {
    let fields = node.fields();
    let low = match wire::get_limit_issuer(fields, "LowLimit") {
        Some(low) => low.to_string(),
        None => return Vec::new(),
    };
    let high = match wire::get_limit_issuer(fields, "HighLimit") {
        Some(high) => high.to_string(),
        None => return Vec::new(),
    };
    let balance = match wire::get_object(fields, "Balance") {
        Some(balance) => balance,
        None => return Vec::new(),
    };
    let currency = match wire::get_str(balance, "currency") {
        Some(currency) => currency.to_string(),
        None => return Vec::new(),
    };

    let current = match wire::get_str(balance, "value").and_then(parse_decimal) {
        Some(value) => value,
        None => return Vec::new(),
    };
    let previous = match node.diff_type {
        DiffType::Created => Decimal::ZERO,
        DiffType::Modified | DiffType::Deleted => {
            let prior = wire::get_object(&node.previous_fields, "Balance")
                .and_then(|balance| wire::get_str(balance, "value"))
                .and_then(parse_decimal);
            match prior {
                Some(value) => value,
                // balance untouched; only limits or flags moved
                None => return Vec::new(),
            }
        }
    };

    let delta = current - previous;
    if delta.is_zero() {
        return Vec::new();
    }
    let value = amount::round_derived(delta.abs());
    let low_action = if delta > Decimal::ZERO {
        ChangeAction::Inc
    } else {
        ChangeAction::Dec
    };
    vec![
        BalanceChangeRecord {
            address: low.clone(),
            currency: currency.clone(),
            issuer: Some(high.clone()),
            value,
            action: low_action,
        },
        BalanceChangeRecord {
            address: high,
            currency,
            issuer: Some(low),
            value,
            action: low_action.flipped(),
        },
    ]
}

fn parse_drops(raw: &str) -> Option<Decimal> {
    match amount::parse_str(raw, true) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(raw, %error, "skipping node with malformed drops balance");
            None
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    match Decimal::from_str(raw) {
        Ok(value) => Some(value),
        Err(_) => match Decimal::from_scientific(raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(raw, %error, "skipping node with malformed trustline balance");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta_with_nodes(nodes: Value) -> TransactionMeta {
        TransactionMeta::from_value(json!({
            "AffectedNodes": nodes,
            "TransactionIndex": 1,
            "TransactionResult": "tesSUCCESS"
        }))
        .unwrap()
    }

    #[test]
    fn test_node_wrapper_flattening() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "LedgerIndex": "AB12",
                    "FinalFields": { "Account": "rAlice", "Balance": "1000000" },
                    "PreviousFields": { "Balance": "2000000" }
                }
            }
        ]));
        assert_eq!(meta.affected_nodes.len(), 1);
        let node = &meta.affected_nodes[0];
        assert_eq!(node.diff_type, DiffType::Modified);
        assert_eq!(node.entry_type, LedgerEntryType::AccountRoot);
        assert_eq!(node.ledger_index.as_deref(), Some("AB12"));
        assert!(node.new_fields.is_empty());
    }

    #[test]
    fn test_native_balance_delta() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "FinalFields": { "Account": "rAlice", "Balance": "1500000" },
                    "PreviousFields": { "Balance": "3000000" }
                }
            }
        ]));
        let changes = meta.parse_balance_changes("XRP");
        let records = &changes["rAlice"];
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, ChangeAction::Dec);
        assert_eq!(crate::amount::format(records[0].value), "1.5");
    }

    #[test]
    fn test_zero_native_delta_omitted() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "FinalFields": { "Account": "rAlice", "Balance": "1000000", "OwnerCount": 2 },
                    "PreviousFields": { "Balance": "1000000", "OwnerCount": 2 }
                }
            }
        ]));
        assert!(meta.parse_balance_changes("XRP").is_empty());
        assert!(meta.parse_owner_count_changes().is_empty());
    }

    #[test]
    fn test_trustline_perspective_flip() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "RippleState",
                    "FinalFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "5" },
                        "LowLimit": { "currency": "USD", "issuer": "rAlice", "value": "100" },
                        "HighLimit": { "currency": "USD", "issuer": "rBob", "value": "0" }
                    },
                    "PreviousFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "0" }
                    }
                }
            }
        ]));
        let changes = meta.parse_balance_changes("XRP");
        let alice = &changes["rAlice"][0];
        assert_eq!(alice.action, ChangeAction::Inc);
        assert_eq!(crate::amount::format(alice.value), "5");
        assert_eq!(alice.issuer.as_deref(), Some("rBob"));
        let bob = &changes["rBob"][0];
        assert_eq!(bob.action, ChangeAction::Dec);
        assert_eq!(crate::amount::format(bob.value), "5");
        assert_eq!(bob.issuer.as_deref(), Some("rAlice"));
    }

    #[test]
    fn test_multi_path_consolidation_sums_records() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "RippleState",
                    "FinalFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "3" },
                        "LowLimit": { "currency": "USD", "issuer": "rAlice", "value": "100" },
                        "HighLimit": { "currency": "USD", "issuer": "rBob", "value": "0" }
                    },
                    "PreviousFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "0" }
                    }
                }
            },
            {
                "ModifiedNode": {
                    "LedgerEntryType": "RippleState",
                    "FinalFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "2" },
                        "LowLimit": { "currency": "USD", "issuer": "rAlice", "value": "50" },
                        "HighLimit": { "currency": "USD", "issuer": "rBob", "value": "0" }
                    },
                    "PreviousFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "0" }
                    }
                }
            }
        ]));
        let changes = meta.parse_balance_changes("XRP");
        let alice = &changes["rAlice"];
        assert_eq!(alice.len(), 1);
        assert_eq!(crate::amount::format(alice[0].value), "5");
    }

    #[test]
    fn test_owner_count_changes() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "AccountRoot",
                    "FinalFields": { "Account": "rAlice", "Balance": "1000000", "OwnerCount": 3 },
                    "PreviousFields": { "Balance": "1000000", "OwnerCount": 5 }
                }
            }
        ]));
        let changes = meta.parse_owner_count_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].address, "rAlice");
        assert_eq!(changes[0].value, 2);
        assert_eq!(changes[0].action, ChangeAction::Dec);
    }

    #[test]
    fn test_ticket_sequences() {
        let meta = meta_with_nodes(json!([
            { "CreatedNode": { "LedgerEntryType": "Ticket", "NewFields": { "TicketSequence": 101 } } },
            { "CreatedNode": { "LedgerEntryType": "Ticket", "NewFields": { "TicketSequence": 102 } } },
            { "ModifiedNode": { "LedgerEntryType": "AccountRoot", "FinalFields": {}, "PreviousFields": {} } }
        ]));
        assert_eq!(meta.parse_ticket_sequences(), vec![101, 102]);
    }

    #[test]
    fn test_offer_status_from_node() {
        let meta = meta_with_nodes(json!([
            {
                "DeletedNode": {
                    "LedgerEntryType": "Offer",
                    "LedgerIndex": "OFFER1",
                    "FinalFields": { "Account": "rAlice" },
                    "PreviousFields": { "TakerPays": "1000000" }
                }
            }
        ]));
        assert_eq!(
            TransactionMeta::offer_status(&meta.affected_nodes[0]),
            OfferStatus::Filled
        );
    }

    #[test]
    fn test_offer_status_cancelled_without_movement() {
        let meta = meta_with_nodes(json!([
            {
                "DeletedNode": {
                    "LedgerEntryType": "Offer",
                    "LedgerIndex": "OFFER1",
                    "FinalFields": { "Account": "rAlice" }
                }
            }
        ]));
        assert_eq!(
            meta.parse_offer_status_change("rAlice", Some("OFFER1")),
            OfferStatus::Cancelled
        );
    }

    #[test]
    fn test_offer_status_heuristic_killed() {
        let meta = meta_with_nodes(json!([]));
        assert_eq!(
            meta.parse_offer_status_change("rAlice", Some("MISSING")),
            OfferStatus::Killed
        );
    }

    #[test]
    fn test_offer_status_heuristic_filled() {
        let meta = meta_with_nodes(json!([
            {
                "ModifiedNode": {
                    "LedgerEntryType": "RippleState",
                    "FinalFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "7" },
                        "LowLimit": { "currency": "USD", "issuer": "rAlice", "value": "100" },
                        "HighLimit": { "currency": "USD", "issuer": "rGateway", "value": "0" }
                    },
                    "PreviousFields": {
                        "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "0" }
                    }
                }
            }
        ]));
        assert_eq!(
            meta.parse_offer_status_change("rAlice", None),
            OfferStatus::Filled
        );
    }

    #[test]
    fn test_delivered_amount_sentinel_is_absent() {
        let meta = TransactionMeta::from_value(json!({
            "AffectedNodes": [],
            "delivered_amount": "unavailable"
        }))
        .unwrap();
        assert!(meta.delivered_amount().is_none());
    }

    #[test]
    fn test_hook_executions_pass_through() {
        let meta = TransactionMeta::from_value(json!({
            "AffectedNodes": [],
            "HookExecutions": [
                {
                    "HookExecution": {
                        "HookAccount": "rHookAccount",
                        "HookResult": 3,
                        "HookReturnString": "00"
                    }
                }
            ]
        }))
        .unwrap();
        let hooks = meta.parse_hook_executions();
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].hook_account.as_deref(), Some("rHookAccount"));
        assert_eq!(hooks[0].hook_result, Some(3));
    }
}
