//! Flag codec.
//!
//! Two independent namespaces exist per concrete entity type: bitmask flags
//! (`tf*` on transactions, `lsf*` on ledger entries) and indexed settings
//! flags (`asf*`, a single integer per field). Tables are resolved through
//! exhaustive matches over the closed type enums, so a new transaction type
//! cannot be added without deciding its table.

use crate::error::FlagError;
use crate::types::{LedgerEntryType, TransactionType};
use std::collections::BTreeMap;

/// One named flag bit (or index, for the indexed namespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDef {
    pub name: &'static str,
    pub value: u32,
}

const fn flag(name: &'static str, value: u32) -> FlagDef {
    FlagDef { name, value }
}

/// Flags valid on every transaction type.
pub const UNIVERSAL_TX_FLAGS: &[FlagDef] = &[flag("tfFullyCanonicalSig", 0x8000_0000)];

const PAYMENT_FLAGS: &[FlagDef] = &[
    flag("tfNoRippleDirect", 0x0001_0000),
    flag("tfPartialPayment", 0x0002_0000),
    flag("tfLimitQuality", 0x0004_0000),
];

const OFFER_CREATE_FLAGS: &[FlagDef] = &[
    flag("tfPassive", 0x0001_0000),
    flag("tfImmediateOrCancel", 0x0002_0000),
    flag("tfFillOrKill", 0x0004_0000),
    flag("tfSell", 0x0008_0000),
];

const TRUST_SET_FLAGS: &[FlagDef] = &[
    flag("tfSetfAuth", 0x0001_0000),
    flag("tfSetNoRipple", 0x0002_0000),
    flag("tfClearNoRipple", 0x0004_0000),
    flag("tfSetFreeze", 0x0010_0000),
    flag("tfClearFreeze", 0x0020_0000),
];

const ACCOUNT_SET_FLAGS: &[FlagDef] = &[
    flag("tfRequireDestTag", 0x0001_0000),
    flag("tfOptionalDestTag", 0x0002_0000),
    flag("tfRequireAuth", 0x0004_0000),
    flag("tfOptionalAuth", 0x0008_0000),
    flag("tfDisallowXRP", 0x0010_0000),
    flag("tfAllowXRP", 0x0020_0000),
];

const NFTOKEN_MINT_FLAGS: &[FlagDef] = &[
    flag("tfBurnable", 0x0000_0001),
    flag("tfOnlyXRP", 0x0000_0002),
    flag("tfTrustLine", 0x0000_0004),
    flag("tfTransferable", 0x0000_0008),
];

const NFTOKEN_CREATE_OFFER_FLAGS: &[FlagDef] = &[flag("tfSellNFToken", 0x0000_0001)];

const PAYMENT_CHANNEL_CLAIM_FLAGS: &[FlagDef] = &[
    flag("tfRenew", 0x0001_0000),
    flag("tfClose", 0x0002_0000),
];

const ENABLE_AMENDMENT_FLAGS: &[FlagDef] = &[
    flag("tfGotMajority", 0x0001_0000),
    flag("tfLostMajority", 0x0002_0000),
];

const ACCOUNT_ROOT_FLAGS: &[FlagDef] = &[
    flag("lsfPasswordSpent", 0x0001_0000),
    flag("lsfRequireDestTag", 0x0002_0000),
    flag("lsfRequireAuth", 0x0004_0000),
    flag("lsfDisallowXRP", 0x0008_0000),
    flag("lsfDisableMaster", 0x0010_0000),
    flag("lsfNoFreeze", 0x0020_0000),
    flag("lsfGlobalFreeze", 0x0040_0000),
    flag("lsfDefaultRipple", 0x0080_0000),
    flag("lsfDepositAuth", 0x0100_0000),
];

const OFFER_OBJECT_FLAGS: &[FlagDef] = &[
    flag("lsfPassive", 0x0001_0000),
    flag("lsfSell", 0x0002_0000),
];

const RIPPLE_STATE_FLAGS: &[FlagDef] = &[
    flag("lsfLowReserve", 0x0001_0000),
    flag("lsfHighReserve", 0x0002_0000),
    flag("lsfLowAuth", 0x0004_0000),
    flag("lsfHighAuth", 0x0008_0000),
    flag("lsfLowNoRipple", 0x0010_0000),
    flag("lsfHighNoRipple", 0x0020_0000),
    flag("lsfLowFreeze", 0x0040_0000),
    flag("lsfHighFreeze", 0x0080_0000),
];

const SIGNER_LIST_FLAGS: &[FlagDef] = &[flag("lsfOneOwnerCount", 0x0001_0000)];

const NFTOKEN_OFFER_FLAGS: &[FlagDef] = &[flag("lsfSellNFToken", 0x0000_0001)];

const ACCOUNT_SET_INDEX_FLAGS: &[FlagDef] = &[
    flag("asfRequireDest", 1),
    flag("asfRequireAuth", 2),
    flag("asfDisallowXRP", 3),
    flag("asfDisableMaster", 4),
    flag("asfAccountTxnID", 5),
    flag("asfNoFreeze", 6),
    flag("asfGlobalFreeze", 7),
    flag("asfDefaultRipple", 8),
    flag("asfDepositAuth", 9),
    flag("asfAuthorizedNFTokenMinter", 10),
    flag("asfDisallowIncomingNFTokenOffer", 12),
    flag("asfDisallowIncomingCheck", 13),
    flag("asfDisallowIncomingPayChan", 14),
    flag("asfDisallowIncomingTrustline", 15),
];

/// Nested structures carrying their own flag field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerObjectKind {
    Remark,
}

const REMARK_FLAGS: &[FlagDef] = &[flag("tfImmutable", 0x0000_0001)];

/// Bitmask table for a transaction type, or `None` when the type carries no
/// type-specific flags.
pub fn transaction_flag_table(kind: &TransactionType) -> Option<&'static [FlagDef]> {
    match kind {
        TransactionType::Payment => Some(PAYMENT_FLAGS),
        TransactionType::OfferCreate => Some(OFFER_CREATE_FLAGS),
        TransactionType::TrustSet => Some(TRUST_SET_FLAGS),
        TransactionType::AccountSet => Some(ACCOUNT_SET_FLAGS),
        TransactionType::NFTokenMint => Some(NFTOKEN_MINT_FLAGS),
        TransactionType::NFTokenCreateOffer => Some(NFTOKEN_CREATE_OFFER_FLAGS),
        TransactionType::PaymentChannelClaim => Some(PAYMENT_CHANNEL_CLAIM_FLAGS),
        TransactionType::EnableAmendment => Some(ENABLE_AMENDMENT_FLAGS),
        TransactionType::OfferCancel
        | TransactionType::AccountDelete
        | TransactionType::SetRegularKey
        | TransactionType::SignerListSet
        | TransactionType::EscrowCreate
        | TransactionType::EscrowFinish
        | TransactionType::EscrowCancel
        | TransactionType::CheckCreate
        | TransactionType::CheckCash
        | TransactionType::CheckCancel
        | TransactionType::DepositPreauth
        | TransactionType::TicketCreate
        | TransactionType::PaymentChannelCreate
        | TransactionType::PaymentChannelFund
        | TransactionType::NFTokenBurn
        | TransactionType::NFTokenAcceptOffer
        | TransactionType::NFTokenCancelOffer
        | TransactionType::Clawback
        | TransactionType::SetFee
        | TransactionType::UNLModify => None,
        TransactionType::Unknown(_) => None,
    }
}

/// Bitmask table for a ledger entry type.
pub fn ledger_entry_flag_table(kind: &LedgerEntryType) -> Option<&'static [FlagDef]> {
    match kind {
        LedgerEntryType::AccountRoot => Some(ACCOUNT_ROOT_FLAGS),
        LedgerEntryType::Offer => Some(OFFER_OBJECT_FLAGS),
        LedgerEntryType::RippleState => Some(RIPPLE_STATE_FLAGS),
        LedgerEntryType::SignerList => Some(SIGNER_LIST_FLAGS),
        LedgerEntryType::NFTokenOffer => Some(NFTOKEN_OFFER_FLAGS),
        LedgerEntryType::Escrow
        | LedgerEntryType::Check
        | LedgerEntryType::Ticket
        | LedgerEntryType::PayChannel
        | LedgerEntryType::NFTokenPage
        | LedgerEntryType::DirectoryNode
        | LedgerEntryType::DepositPreauth
        | LedgerEntryType::FeeSettings
        | LedgerEntryType::Amendments => None,
        LedgerEntryType::Unknown(_) => None,
    }
}

/// Indexed (`asf*`) table for a transaction type.
pub fn index_flag_table(kind: &TransactionType) -> Option<&'static [FlagDef]> {
    match kind {
        TransactionType::AccountSet => Some(ACCOUNT_SET_INDEX_FLAGS),
        TransactionType::Payment
        | TransactionType::OfferCreate
        | TransactionType::OfferCancel
        | TransactionType::TrustSet
        | TransactionType::AccountDelete
        | TransactionType::SetRegularKey
        | TransactionType::SignerListSet
        | TransactionType::EscrowCreate
        | TransactionType::EscrowFinish
        | TransactionType::EscrowCancel
        | TransactionType::CheckCreate
        | TransactionType::CheckCash
        | TransactionType::CheckCancel
        | TransactionType::DepositPreauth
        | TransactionType::TicketCreate
        | TransactionType::PaymentChannelCreate
        | TransactionType::PaymentChannelFund
        | TransactionType::PaymentChannelClaim
        | TransactionType::NFTokenMint
        | TransactionType::NFTokenBurn
        | TransactionType::NFTokenCreateOffer
        | TransactionType::NFTokenAcceptOffer
        | TransactionType::NFTokenCancelOffer
        | TransactionType::Clawback
        | TransactionType::EnableAmendment
        | TransactionType::SetFee
        | TransactionType::UNLModify => None,
        TransactionType::Unknown(_) => None,
    }
}

fn inner_flag_table(kind: InnerObjectKind) -> &'static [FlagDef] {
    match kind {
        InnerObjectKind::Remark => REMARK_FLAGS,
    }
}

fn parse_bitmask(
    table: Option<&'static [FlagDef]>,
    universal: &'static [FlagDef],
    bits: Option<u32>,
) -> BTreeMap<&'static str, bool> {
    let mut result = BTreeMap::new();
    let table = match table {
        Some(table) => table,
        None => return result,
    };
    let bits = bits.unwrap_or(0);
    for def in table.iter().chain(universal.iter()) {
        result.insert(def.name, bits & def.value == def.value);
    }
    result
}

/// Decode a transaction flag bitmask into a named-boolean map. A type
/// without a table yields an empty map; that is not an error.
pub fn parse_transaction_flags(
    kind: &TransactionType,
    bits: Option<u32>,
) -> BTreeMap<&'static str, bool> {
    parse_bitmask(transaction_flag_table(kind), UNIVERSAL_TX_FLAGS, bits)
}

/// Decode a ledger entry flag bitmask into a named-boolean map.
pub fn parse_ledger_entry_flags(
    kind: &LedgerEntryType,
    bits: Option<u32>,
) -> BTreeMap<&'static str, bool> {
    parse_bitmask(ledger_entry_flag_table(kind), &[], bits)
}

/// Decode the flag field of a nested inner object.
pub fn parse_inner_flags(kind: InnerObjectKind, bits: Option<u32>) -> BTreeMap<&'static str, bool> {
    parse_bitmask(Some(inner_flag_table(kind)), &[], bits)
}

/// OR a named flag into an existing bitmask.
///
/// A type with no table at all is `UnsupportedType`; a known table missing
/// the requested name is `UnknownFlag`. The two stay distinguishable: an
/// empty parse result is valid, an unsupported type is not.
pub fn set_transaction_flag(
    kind: &TransactionType,
    name: &str,
    current: u32,
) -> Result<u32, FlagError> {
    let table = transaction_flag_table(kind).ok_or_else(|| FlagError::UnsupportedType {
        entity: kind.name().to_string(),
    })?;
    let def = table
        .iter()
        .chain(UNIVERSAL_TX_FLAGS.iter())
        .find(|def| def.name == name)
        .ok_or_else(|| FlagError::UnknownFlag {
            name: name.to_string(),
        })?;
    Ok(current | def.value)
}

/// Resolve an indexed settings flag name to its integer value.
pub fn flag_index(kind: &TransactionType, name: &str) -> Result<u32, FlagError> {
    let table = index_flag_table(kind).ok_or_else(|| FlagError::UnsupportedType {
        entity: kind.name().to_string(),
    })?;
    table
        .iter()
        .find(|def| def.name == name)
        .map(|def| def.value)
        .ok_or_else(|| FlagError::UnknownFlag {
            name: name.to_string(),
        })
}

/// Resolve an indexed settings flag value back to its name.
pub fn flag_name_for_index(kind: &TransactionType, value: u32) -> Result<&'static str, FlagError> {
    let table = index_flag_table(kind).ok_or_else(|| FlagError::UnsupportedType {
        entity: kind.name().to_string(),
    })?;
    table
        .iter()
        .find(|def| def.value == value)
        .map(|def| def.name)
        .ok_or_else(|| FlagError::UnknownFlag {
            name: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_create_round_trip() {
        let kind = TransactionType::OfferCreate;
        let bits = set_transaction_flag(&kind, "tfFillOrKill", 0).unwrap();
        let bits = set_transaction_flag(&kind, "tfImmediateOrCancel", bits).unwrap();
        assert_eq!(bits, 393_216);

        let parsed = parse_transaction_flags(&kind, Some(bits));
        assert_eq!(parsed["tfFillOrKill"], true);
        assert_eq!(parsed["tfImmediateOrCancel"], true);
        assert_eq!(parsed["tfPassive"], false);
        assert_eq!(parsed["tfSell"], false);
    }

    #[test]
    fn test_universal_flag_applies_to_every_typed_table() {
        let parsed = parse_transaction_flags(&TransactionType::Payment, Some(0x8000_0000));
        assert_eq!(parsed["tfFullyCanonicalSig"], true);
    }

    #[test]
    fn test_unknown_type_parses_to_empty_map() {
        let kind = TransactionType::Unknown("AMMDeposit".to_string());
        assert!(parse_transaction_flags(&kind, Some(0xFFFF_FFFF)).is_empty());
    }

    #[test]
    fn test_set_error_kinds_are_distinct() {
        let unsupported = set_transaction_flag(&TransactionType::OfferCancel, "tfPassive", 0);
        assert!(matches!(unsupported, Err(FlagError::UnsupportedType { .. })));

        let unknown = set_transaction_flag(&TransactionType::OfferCreate, "tfBogus", 0);
        assert!(matches!(unknown, Err(FlagError::UnknownFlag { .. })));
    }

    #[test]
    fn test_index_flags() {
        let kind = TransactionType::AccountSet;
        assert_eq!(flag_index(&kind, "asfRequireDest").unwrap(), 1);
        assert_eq!(flag_name_for_index(&kind, 9).unwrap(), "asfDepositAuth");
        assert!(matches!(
            flag_index(&TransactionType::Payment, "asfRequireDest"),
            Err(FlagError::UnsupportedType { .. })
        ));
        assert!(matches!(
            flag_name_for_index(&kind, 99),
            Err(FlagError::UnknownFlag { .. })
        ));
    }

    #[test]
    fn test_inner_object_flags() {
        let parsed = parse_inner_flags(InnerObjectKind::Remark, Some(1));
        assert_eq!(parsed["tfImmutable"], true);
        let parsed = parse_inner_flags(InnerObjectKind::Remark, None);
        assert_eq!(parsed["tfImmutable"], false);
    }
}
