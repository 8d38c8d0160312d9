//! Trustline transaction views.

use super::decode_optional_amount;
use crate::error::AmountError;
use crate::types::Amount;
use crate::wire::WireAmount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustSet {
    #[serde(rename = "LimitAmount")]
    pub limit_amount: Option<WireAmount>,
    #[serde(rename = "QualityIn")]
    pub quality_in: Option<u32>,
    #[serde(rename = "QualityOut")]
    pub quality_out: Option<u32>,
}

impl TrustSet {
    /// The trust limit being set. Its issuer is the counterparty.
    pub fn limit(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.limit_amount, native_asset)
    }

    pub fn counterparty(&self) -> Option<&str> {
        match &self.limit_amount {
            Some(WireAmount::Issued(issued)) => issued.issuer.as_deref(),
            _ => None,
        }
    }

    pub fn currency(&self) -> Option<&str> {
        match &self.limit_amount {
            Some(WireAmount::Issued(issued)) => Some(&issued.currency),
            _ => None,
        }
    }

    /// A zero limit removes the trustline once its balance clears.
    pub fn removes_line(&self, native_asset: &str) -> bool {
        matches!(
            self.limit(native_asset),
            Ok(Some(limit)) if limit.value.is_zero()
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clawback {
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
}

impl Clawback {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }

    /// For a clawback the amount's issuer field names the token holder
    /// being clawed from, not the issuing account.
    pub fn holder(&self) -> Option<&str> {
        match &self.amount {
            Some(WireAmount::Issued(issued)) => issued.issuer.as_deref(),
            _ => None,
        }
    }
}
