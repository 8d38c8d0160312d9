use chrono::{TimeZone, Utc};
use serde_json::json;
use txlens::{LedgerEntryType, LedgerObject, ObjectPayload};

#[test]
fn test_offer_object_rate_and_flags() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "Offer",
        "Account": "rAlice",
        "Flags": 0x00020000u32,
        "Sequence": 11,
        "TakerGets": "2000000",
        "TakerPays": { "currency": "USD", "issuer": "rGateway", "value": "3" },
        "index": "AA11"
    }))
    .unwrap();
    assert_eq!(object.entry_type(), &LedgerEntryType::Offer);
    assert_eq!(object.flags()["lsfSell"], true);

    let offer = match object.payload() {
        ObjectPayload::Offer(offer) => offer,
        other => panic!("expected an offer, got {other:?}"),
    };
    // 3 USD for 2 XRP reads as 1.5 USD per XRP
    assert!((offer.rate("XRP").unwrap() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_escrow_object_predicates() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "Escrow",
        "Account": "rAlice",
        "Amount": "5000000",
        "Destination": "rBob",
        "FinishAfter": 86400,
        "CancelAfter": 172800
    }))
    .unwrap();
    let escrow = match object.payload() {
        ObjectPayload::Escrow(escrow) => escrow,
        other => panic!("expected an escrow, got {other:?}"),
    };

    // before finish-after
    let early = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    assert!(!escrow.is_expired(early));
    assert!(!escrow.can_finish(early));

    // between finish-after and cancel-after
    let window = Utc.with_ymd_and_hms(2000, 1, 2, 12, 0, 0).unwrap();
    assert!(!escrow.is_expired(window));
    assert!(escrow.can_finish(window));

    // past cancel-after
    let late = Utc.with_ymd_and_hms(2000, 1, 3, 12, 0, 0).unwrap();
    assert!(escrow.is_expired(late));
    assert!(!escrow.can_finish(late));
}

#[test]
fn test_unconstrained_escrow_can_finish_immediately() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "Escrow",
        "Account": "rAlice",
        "Amount": "5000000",
        "Destination": "rBob"
    }))
    .unwrap();
    let escrow = match object.payload() {
        ObjectPayload::Escrow(escrow) => escrow,
        other => panic!("expected an escrow, got {other:?}"),
    };
    assert!(escrow.can_finish(Utc::now()));
}

#[test]
fn test_pay_channel_remaining() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "PayChannel",
        "Account": "rAlice",
        "Destination": "rBob",
        "Amount": "10000000",
        "Balance": "2500000",
        "SettleDelay": 3600
    }))
    .unwrap();
    let channel = match object.payload() {
        ObjectPayload::PayChannel(channel) => channel,
        other => panic!("expected a channel, got {other:?}"),
    };
    assert_eq!(
        txlens::amount::format(channel.remaining("XRP").unwrap().unwrap()),
        "7.5"
    );
    let destination = channel.destination().unwrap();
    assert_eq!(destination.address, "rBob");
}

#[test]
fn test_nftoken_offer_sell_flag() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "NFTokenOffer",
        "Owner": "rAlice",
        "Flags": 1,
        "NFTokenID": "000800000000000000000000000000000000000000000000000000000000099B00000000",
        "Amount": "1000000"
    }))
    .unwrap();
    assert_eq!(object.owner(), Some("rAlice"));
    let offer = match object.payload() {
        ObjectPayload::NFTokenOffer(offer) => offer,
        other => panic!("expected a token offer, got {other:?}"),
    };
    assert!(offer.is_sell_offer());
}

#[test]
fn test_check_object_expiration() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "Check",
        "Account": "rAlice",
        "Destination": "rBob",
        "SendMax": "1000000",
        "Expiration": 3600
    }))
    .unwrap();
    let check = match object.payload() {
        ObjectPayload::Check(check) => check,
        other => panic!("expected a check, got {other:?}"),
    };
    let before = Utc.with_ymd_and_hms(2000, 1, 1, 0, 30, 0).unwrap();
    assert!(!check.is_expired(before));
    let after = Utc.with_ymd_and_hms(2000, 1, 1, 2, 0, 0).unwrap();
    assert!(check.is_expired(after));
}

#[test]
fn test_ticket_object() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "Ticket",
        "Account": "rAlice",
        "TicketSequence": 55
    }))
    .unwrap();
    let ticket = match object.payload() {
        ObjectPayload::Ticket(ticket) => ticket,
        other => panic!("expected a ticket, got {other:?}"),
    };
    assert_eq!(ticket.ticket_sequence, Some(55));
}

#[test]
fn test_unmodeled_entry_type_keeps_raw_fields() {
    let object = LedgerObject::from_wire(json!({
        "LedgerEntryType": "DirectoryNode",
        "Owner": "rAlice",
        "RootIndex": "CC00"
    }))
    .unwrap();
    assert!(matches!(object.payload(), ObjectPayload::Other));
    assert_eq!(object.raw()["RootIndex"], json!("CC00"));
}
