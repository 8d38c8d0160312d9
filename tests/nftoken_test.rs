use serde_json::json;
use txlens::transactions::nftoken::compute_nftoken_id;
use txlens::{LedgerTransaction, TxPayload};

/// Account id of all zeroes, the canonical null address.
const ACCOUNT_ZERO: &str = "rrrrrrrrrrrrrrrrrrrrrhoLvTp";

#[test]
fn test_token_id_assembly_fixture() {
    // flags 8, no transfer fee, taxon 0: the taxon scramble for mint
    // sequence 0 is the additive cipher constant 2459 = 0x99B
    let id = compute_nftoken_id(8, 0, ACCOUNT_ZERO, 0, 0).unwrap();
    let expected = format!("00080000{}0000099B00000000", "0".repeat(40));
    assert_eq!(id, expected);
    assert_eq!(id.len(), 64);
}

#[test]
fn test_token_id_sequence_layout() {
    let id = compute_nftoken_id(8, 314, ACCOUNT_ZERO, 0, 1).unwrap();
    // flags and fee lead the id
    assert!(id.starts_with("0008013A"));
    // mint sequence trails the id
    assert!(id.ends_with("00000001"));
}

#[test]
fn test_minted_token_id_first_ever_mint() {
    let tx = LedgerTransaction::from_wire(
        json!({
            "TransactionType": "NFTokenMint",
            "Account": ACCOUNT_ZERO,
            "NFTokenTaxon": 0,
            "Flags": 8,
            "Fee": "12"
        }),
        Some(json!({
            "TransactionResult": "tesSUCCESS",
            "AffectedNodes": [
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "FinalFields": {
                            "Account": ACCOUNT_ZERO,
                            "Balance": "99999988",
                            "MintedNFTokens": 1
                        },
                        "PreviousFields": { "Balance": "100000000" }
                    }
                }
            ]
        })),
    )
    .unwrap();
    // first-ever mint: no previous MintedNFTokens, so sequence 0
    let id = tx.computed_nftoken_id().unwrap();
    assert!(id.ends_with("00000000"));
    assert!(id.starts_with("0008"));
}

#[test]
fn test_minted_token_id_uses_previous_counter() {
    let tx = LedgerTransaction::from_wire(
        json!({
            "TransactionType": "NFTokenMint",
            "Account": ACCOUNT_ZERO,
            "NFTokenTaxon": 7,
            "Flags": 8,
            "Fee": "12"
        }),
        Some(json!({
            "TransactionResult": "tesSUCCESS",
            "AffectedNodes": [
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "FinalFields": {
                            "Account": ACCOUNT_ZERO,
                            "Balance": "99999988",
                            "MintedNFTokens": 13
                        },
                        "PreviousFields": { "Balance": "100000000", "MintedNFTokens": 12 }
                    }
                }
            ]
        })),
    )
    .unwrap();
    let id = tx.computed_nftoken_id().unwrap();
    assert!(id.ends_with("0000000C"));
    assert_eq!(
        id,
        compute_nftoken_id(8, 0, ACCOUNT_ZERO, 7, 12).unwrap()
    );
}

#[test]
fn test_server_computed_id_preferred() {
    let tx = LedgerTransaction::from_wire(
        json!({
            "TransactionType": "NFTokenMint",
            "Account": ACCOUNT_ZERO,
            "NFTokenTaxon": 7,
            "Fee": "12"
        }),
        Some(json!({
            "TransactionResult": "tesSUCCESS",
            "AffectedNodes": [],
            "nftoken_id": "000B0000AABBCCDD"
        })),
    )
    .unwrap();
    assert_eq!(tx.computed_nftoken_id().as_deref(), Some("000B0000AABBCCDD"));
}

#[test]
fn test_non_mint_has_no_token_id() {
    let tx = LedgerTransaction::from_wire(
        json!({ "TransactionType": "Payment", "Account": "rAlice", "Fee": "12" }),
        Some(json!({ "TransactionResult": "tesSUCCESS", "AffectedNodes": [] })),
    )
    .unwrap();
    assert!(tx.computed_nftoken_id().is_none());
}

#[test]
fn test_mint_uri_decoding() {
    let tx = LedgerTransaction::from_wire(
        json!({
            "TransactionType": "NFTokenMint",
            "Account": ACCOUNT_ZERO,
            "NFTokenTaxon": 0,
            "URI": "697066733A2F2F6578616D706C65",
            "Fee": "12"
        }),
        None,
    )
    .unwrap();
    let mint = match tx.payload() {
        TxPayload::NFTokenMint(mint) => mint,
        other => panic!("expected a mint payload, got {other:?}"),
    };
    assert_eq!(mint.decoded_uri().as_deref(), Some("ipfs://example"));
}
