//! Per-observer derived views over a transaction's metadata.
//!
//! Balance changes, owner-count changes and hook executions are computed
//! on first access and memoized per entity instance. The caches never
//! invalidate: an entity is immutable once its metadata is fixed, and the
//! building-time setters run before any derived fact is read.

use crate::transaction::LedgerTransaction;
use crate::transactions::TxPayload;
use crate::types::{
    Amount, BalanceChangeRecord, ChangeAction, HookExecution, OwnerCountChangeRecord,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tracing::{debug, warn};

/// What one observer address sent and received in a transaction, fee
/// adjusted when the observer is the signer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceChangeView {
    pub sent: Option<Amount>,
    pub received: Option<Amount>,
}

/// Compute-once cache slots, one lock per slot so shared read-only access
/// from several threads stays race-free.
#[derive(Debug, Default)]
pub(crate) struct DerivedCaches {
    balance_changes: Mutex<Option<BTreeMap<String, Vec<BalanceChangeRecord>>>>,
    balance_views: Mutex<HashMap<String, BalanceChangeView>>,
    owner_count_changes: Mutex<Option<Vec<OwnerCountChangeRecord>>>,
    hook_executions: Mutex<Option<Vec<HookExecution>>>,
}

impl LedgerTransaction {
    /// All balance deltas derived from this transaction's metadata,
    /// grouped by owning address. Memoized on first call.
    pub fn balance_changes(
        &self,
        native_asset: &str,
    ) -> BTreeMap<String, Vec<BalanceChangeRecord>> {
        let mut cache = self
            .caches
            .balance_changes
            .lock()
            .expect("balance cache lock poisoned");
        if cache.is_none() {
            *cache = Some(
                self.meta()
                    .map(|meta| meta.parse_balance_changes(native_asset))
                    .unwrap_or_default(),
            );
        }
        cache.clone().unwrap_or_default()
    }

    /// The sent/received view for one observer address (the signing
    /// account when none is given).
    ///
    /// When the observer is the signer, the network fee is deducted from
    /// the native-denominated outflow: an outflow exactly equal to the fee
    /// disappears, and an outflow smaller than the fee flips into a
    /// received remainder (the signer netted a native gain despite paying
    /// the fee, as happens on brokered token sales).
    pub fn balance_change(
        &self,
        observer: Option<&str>,
        native_asset: &str,
    ) -> BalanceChangeView {
        let observer = observer
            .or_else(|| self.account())
            .unwrap_or_default()
            .to_string();
        {
            let views = self
                .caches
                .balance_views
                .lock()
                .expect("balance view cache lock poisoned");
            if let Some(view) = views.get(&observer) {
                return view.clone();
            }
        }

        let view = self.compute_balance_change(&observer, native_asset);
        self.caches
            .balance_views
            .lock()
            .expect("balance view cache lock poisoned")
            .insert(observer, view.clone());
        view
    }

    fn compute_balance_change(&self, observer: &str, native_asset: &str) -> BalanceChangeView {
        let mut records = self
            .balance_changes(native_asset)
            .get(observer)
            .cloned()
            .unwrap_or_default();

        if Some(observer) == self.account() {
            self.deduct_fee(&mut records, native_asset);
        }

        let sent = records
            .iter()
            .find(|record| record.action == ChangeAction::Dec)
            .map(record_to_amount);
        let received = records
            .iter()
            .find(|record| record.action == ChangeAction::Inc)
            .map(record_to_amount);
        BalanceChangeView { sent, received }
    }

    /// Remove the network fee from the signer's native outflow so the
    /// view shows what the transaction itself moved.
    fn deduct_fee(&self, records: &mut Vec<BalanceChangeRecord>, native_asset: &str) {
        let fee = match self.fee_native() {
            Ok(Some(fee)) if !fee.is_zero() => fee,
            Ok(_) => return,
            Err(error) => {
                warn!(%error, "fee not deducted from balance view");
                return;
            }
        };
        let position = records.iter().position(|record| {
            record.action == ChangeAction::Dec
                && record.issuer.is_none()
                && record.currency == native_asset
        });
        let position = match position {
            Some(position) => position,
            None => return,
        };
        let remainder = records[position].value - fee;
        if remainder.is_zero() {
            records.remove(position);
        } else if remainder < Decimal::ZERO {
            debug!("native outflow below fee, flipping to received remainder");
            records[position].action = ChangeAction::Inc;
            records[position].value = remainder.abs();
        } else {
            records[position].value = remainder;
        }
    }

    /// Owner-count deltas derived from metadata. Memoized on first call.
    pub fn owner_count_changes(&self) -> Vec<OwnerCountChangeRecord> {
        let mut cache = self
            .caches
            .owner_count_changes
            .lock()
            .expect("owner count cache lock poisoned");
        if cache.is_none() {
            *cache = Some(
                self.meta()
                    .map(|meta| meta.parse_owner_count_changes())
                    .unwrap_or_default(),
            );
        }
        cache.clone().unwrap_or_default()
    }

    /// The owner-count delta of one observer address (the signing account
    /// when none is given).
    pub fn owner_count_change(&self, observer: Option<&str>) -> Option<OwnerCountChangeRecord> {
        let observer = observer.or_else(|| self.account())?;
        self.owner_count_changes()
            .into_iter()
            .find(|change| change.address == observer)
    }

    /// Hook execution records. Transaction-global, memoized once.
    pub fn hook_executions(&self) -> Vec<HookExecution> {
        let mut cache = self
            .caches
            .hook_executions
            .lock()
            .expect("hook cache lock poisoned");
        if cache.is_none() {
            *cache = Some(
                self.meta()
                    .map(|meta| meta.parse_hook_executions().to_vec())
                    .unwrap_or_default(),
            );
        }
        cache.clone().unwrap_or_default()
    }

    /// The xApp identifier carried in a marker memo, if any.
    pub fn xapp_identifier(&self) -> Option<String> {
        self.memos().find_map(|memo| memo.xapp_identifier())
    }

    /// What the offer creator actually gave up, as opposed to the
    /// requested `TakerGets`. Only meaningful for an executed offer.
    pub fn taker_got(&self, native_asset: &str) -> Option<Amount> {
        if !matches!(self.payload(), TxPayload::OfferCreate(_)) || !self.offer_executed() {
            return None;
        }
        self.balance_change(None, native_asset).sent
    }

    /// What the offer creator actually obtained, as opposed to the
    /// requested `TakerPays`. Only meaningful for an executed offer.
    pub fn taker_paid(&self, native_asset: &str) -> Option<Amount> {
        if !matches!(self.payload(), TxPayload::OfferCreate(_)) || !self.offer_executed() {
            return None;
        }
        self.balance_change(None, native_asset).received
    }
}

fn record_to_amount(record: &BalanceChangeRecord) -> Amount {
    Amount {
        currency: record.currency.clone(),
        issuer: record.issuer.clone(),
        value: record.value,
    }
}
