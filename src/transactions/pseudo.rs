//! Pseudo-transaction views.
//!
//! Pseudo transactions are injected by validators during consensus; they
//! carry no fee or signer and skip the signing preparation steps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnableAmendment {
    #[serde(rename = "Amendment")]
    pub amendment: Option<String>,
    #[serde(rename = "LedgerSequence")]
    pub ledger_sequence: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetFee {
    #[serde(rename = "BaseFee")]
    pub base_fee: Option<String>,
    #[serde(rename = "ReferenceFeeUnits")]
    pub reference_fee_units: Option<u32>,
    #[serde(rename = "ReserveBase")]
    pub reserve_base: Option<u64>,
    #[serde(rename = "ReserveIncrement")]
    pub reserve_increment: Option<u64>,
    #[serde(rename = "BaseFeeDrops")]
    pub base_fee_drops: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UNLModify {
    #[serde(rename = "UNLModifyDisabling")]
    pub unl_modify_disabling: Option<u8>,
    #[serde(rename = "UNLModifyValidator")]
    pub unl_modify_validator: Option<String>,
}
