//! Account configuration transaction views.

use super::make_destination;
use crate::flags;
use crate::types::{Destination, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountSet {
    #[serde(rename = "SetFlag")]
    pub set_flag: Option<u32>,
    #[serde(rename = "ClearFlag")]
    pub clear_flag: Option<u32>,
    #[serde(rename = "Domain")]
    pub domain: Option<String>,
    #[serde(rename = "EmailHash")]
    pub email_hash: Option<String>,
    #[serde(rename = "MessageKey")]
    pub message_key: Option<String>,
    #[serde(rename = "TransferRate")]
    pub transfer_rate: Option<u64>,
    #[serde(rename = "TickSize")]
    pub tick_size: Option<u8>,
    #[serde(rename = "NFTokenMinter")]
    pub nftoken_minter: Option<String>,
}

/// Wire scale of `TransferRate`: 1_000_000_000 means no fee.
const TRANSFER_RATE_SCALE: u64 = 1_000_000_000;

impl AccountSet {
    /// Name of the settings flag being set, resolved through the indexed
    /// flag namespace.
    pub fn set_flag_name(&self) -> Option<&'static str> {
        self.set_flag
            .and_then(|value| flags::flag_name_for_index(&TransactionType::AccountSet, value).ok())
    }

    /// Name of the settings flag being cleared.
    pub fn clear_flag_name(&self) -> Option<&'static str> {
        self.clear_flag
            .and_then(|value| flags::flag_name_for_index(&TransactionType::AccountSet, value).ok())
    }

    /// The domain field, hex-decoded to text when possible.
    pub fn decoded_domain(&self) -> Option<String> {
        let raw = self.domain.as_deref()?;
        let bytes = hex::decode(raw).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// The issuer transfer fee as a percentage, derived from the
    /// 1e9-scaled wire value.
    pub fn transfer_rate_percent(&self) -> Option<Decimal> {
        let rate = self.transfer_rate?;
        if rate == 0 {
            return Some(Decimal::ZERO);
        }
        let above_par = Decimal::from(rate) - Decimal::from(TRANSFER_RATE_SCALE);
        Some((above_par / Decimal::from(TRANSFER_RATE_SCALE) * Decimal::from(100)).normalize())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountDelete {
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "DestinationTag")]
    pub destination_tag: Option<u32>,
}

impl AccountDelete {
    /// Where the remaining balance is swept.
    pub fn destination(&self) -> Option<Destination> {
        make_destination(&self.destination, self.destination_tag)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetRegularKey {
    #[serde(rename = "RegularKey")]
    pub regular_key: Option<String>,
}

impl SetRegularKey {
    /// Absent key means the existing regular key is being removed.
    pub fn removes_key(&self) -> bool {
        self.regular_key.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignerListSet {
    #[serde(rename = "SignerQuorum")]
    pub signer_quorum: Option<u32>,
    #[serde(rename = "SignerEntries", default)]
    pub signer_entries: Vec<SignerEntryWrapper>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerEntryWrapper {
    #[serde(rename = "SignerEntry")]
    pub signer_entry: SignerEntry,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignerEntry {
    #[serde(rename = "Account")]
    pub account: Option<String>,
    #[serde(rename = "SignerWeight")]
    pub signer_weight: Option<u16>,
}

impl SignerListSet {
    /// The configured signers as (address, weight) pairs.
    pub fn entries(&self) -> Vec<(&str, u16)> {
        self.signer_entries
            .iter()
            .filter_map(|wrapper| {
                let entry = &wrapper.signer_entry;
                Some((entry.account.as_deref()?, entry.signer_weight.unwrap_or(0)))
            })
            .collect()
    }

    /// A zero quorum deletes the signer list.
    pub fn removes_list(&self) -> bool {
        self.signer_quorum == Some(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositPreauth {
    #[serde(rename = "Authorize")]
    pub authorize: Option<String>,
    #[serde(rename = "Unauthorize")]
    pub unauthorize: Option<String>,
}
