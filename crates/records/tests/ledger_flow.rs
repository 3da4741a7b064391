use std::sync::Arc;

use chrono::NaiveDate;
use millbook_core::{OwnerId, parse_non_negative_decimal};
use millbook_events::{EventBus, InMemoryEventBus, Topic};
use millbook_milling::{AckRequest, MillingScenario, RiceType, calculate_ack_requirements, calculate_results};
use millbook_records::{
    ChangeKind, CmrDelivery, InMemoryRecordStore, MillSummary, PaddyReceipt, Record, RecordChange,
    RecordKind, RecordStore,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
}

/// Form text goes through the input boundary, records go through the store,
/// and the engine only ever sees clean numbers.
#[test]
fn receipts_flow_into_the_calculator() {
    let bus = Arc::new(InMemoryEventBus::<RecordChange>::new());
    let store = InMemoryRecordStore::new(Arc::clone(&bus));
    let owner = OwnerId::new();
    let inserts = bus.subscribe(RecordChange::topic(RecordKind::PaddyReceipt, ChangeKind::Insert));

    for (d, raw_quantity) in [(3, "600"), (4, " 400.0 "), (5, "not a number")] {
        let quantity = parse_non_negative_decimal(raw_quantity);
        store
            .insert(
                owner,
                Record::PaddyReceipt(PaddyReceipt {
                    received_on: day(d),
                    party: "Society 9".to_string(),
                    vehicle_number: None,
                    bags: (quantity * 100.0 / 40.0) as u32,
                    quantity,
                    rice_type: RiceType::Raw,
                }),
            )
            .unwrap();
    }
    store
        .insert(
            owner,
            Record::CmrDelivery(CmrDelivery {
                delivered_on: day(20),
                ack_number: "ACK-1".to_string(),
                quantity: 290.0,
                rice_type: RiceType::Raw,
            }),
        )
        .unwrap();

    assert_eq!(inserts.drain().len(), 3);

    let rows = store.list(owner, None).unwrap();
    let records: Vec<Record> = rows.into_iter().map(|row| row.record).collect();
    let summary = MillSummary::from_records(&records);
    assert_eq!(summary.paddy_received, 1000.0);

    let scenario = MillingScenario {
        paddy_quantity: summary.paddy_received,
        ..MillingScenario::default()
    };
    let results = calculate_results(&scenario);
    assert!((results.required_rice - summary.cmr_obligation).abs() < 1e-9);

    let outstanding = calculate_ack_requirements(&AckRequest::from_scenario(
        summary.cmr_outstanding,
        &scenario,
    ));
    assert!((outstanding.required_standard_paddy - (670.0 - 290.0) / 0.67).abs() < 1e-6);
}

#[test]
fn unsubscribed_listener_stops_hearing_changes() {
    let bus = Arc::new(InMemoryEventBus::<RecordChange>::new());
    let store = InMemoryRecordStore::new(Arc::clone(&bus));
    let owner = OwnerId::new();

    let listener = bus.subscribe(Topic::All);
    assert!(bus.unsubscribe(listener.id()));

    store
        .insert(
            owner,
            Record::CmrDelivery(CmrDelivery {
                delivered_on: day(1),
                ack_number: "ACK-2".to_string(),
                quantity: 290.0,
                rice_type: RiceType::Boiled,
            }),
        )
        .unwrap();

    assert!(listener.drain().is_empty());
}
