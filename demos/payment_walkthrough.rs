//! Decode a validated payment and walk through everything the
//! interpreter derives from it.
//!
//! Run with: cargo run --example payment_walkthrough

use serde_json::json;
use txlens::LedgerTransaction;

fn main() {
    let tx = LedgerTransaction::from_wire(
        json!({
            "TransactionType": "Payment",
            "Account": "rAlice",
            "Destination": "rBob",
            "DestinationTag": 7,
            "Amount": "85532100",
            "Fee": "12",
            "Sequence": 4,
            "ledger_index": 57913674,
            "hash": "E3F1C54E00A1B9F3C7E3D2A1B0C9D8E7F6A5B4C3D2E1F0A9B8C7D6E5F4A3B2C1"
        }),
        Some(json!({
            "TransactionResult": "tesSUCCESS",
            "TransactionIndex": 4,
            "AffectedNodes": [
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "FinalFields": { "Account": "rAlice", "Balance": "14467888" },
                        "PreviousFields": { "Balance": "100000000" }
                    }
                },
                {
                    "ModifiedNode": {
                        "LedgerEntryType": "AccountRoot",
                        "FinalFields": { "Account": "rBob", "Balance": "95532100" },
                        "PreviousFields": { "Balance": "10000000" }
                    }
                }
            ]
        })),
    )
    .expect("fixture decodes");

    println!("type:      {}", tx.transaction_type());
    println!("result:    {:?}", tx.result());
    println!("ctid:      {:?}", tx.ctid(0));

    let delivered = tx
        .delivered_amount("XRP")
        .expect("amount decodes")
        .expect("payment carries an amount");
    println!("delivered: {} {}", delivered.value_string(), delivered.currency);

    let sender = tx.balance_change(Some("rAlice"), "XRP");
    println!("sender sent (fee excluded): {:?}", sender.sent.map(|a| a.value_string()));

    let receiver = tx.balance_change(Some("rBob"), "XRP");
    println!("receiver got: {:?}", receiver.received.map(|a| a.value_string()));

    for (address, records) in tx.balance_changes("XRP") {
        for record in records {
            println!("  {} {:?} {} {}", address, record.action, record.value, record.currency);
        }
    }
}
