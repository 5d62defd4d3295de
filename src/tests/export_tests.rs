use crate::export::{self, TripExport};
use crate::models::Debt;
use crate::report::settlement_report;
use crate::visualization::Visualization;
use crate::{InMemoryAuditLogger, InMemoryStorage, TripService};

fn seeded_service<'a>(
    storage: &'a mut InMemoryStorage,
    audit_logger: &'a mut InMemoryAuditLogger,
) -> (TripService<'a>, uuid::Uuid) {
    let _ = env_logger::try_init();
    let mut service = TripService::new(storage, audit_logger);

    let alice = service.create_user("Alice".to_string()).unwrap();
    let trip = service
        .create_trip(
            &alice,
            "Baltic".to_string(),
            "PLN".to_string(),
            "Gdansk".to_string(),
        )
        .unwrap();
    let bob = service.add_member_by_name(trip.id, "Bob", &alice).unwrap();
    service
        .add_expense(
            trip.id,
            alice.id,
            100.0,
            "PLN".to_string(),
            1.0,
            "Hotel".to_string(),
            "Lodging".to_string(),
            &[(alice.id, 1.0), (bob.id, 1.0)],
            &alice,
        )
        .unwrap();
    let trip_id = trip.id;
    (service, trip_id)
}

#[test]
fn test_export_trip_snapshot_by_names() {
    let mut storage = InMemoryStorage::new();
    let mut audit_logger = InMemoryAuditLogger::new();
    let (service, trip_id) = seeded_service(&mut storage, &mut audit_logger);

    let exported = export::export_trip(&service, trip_id).unwrap();
    assert_eq!(exported.name, "Baltic");
    assert_eq!(exported.main_currency, "PLN");
    assert_eq!(exported.members, vec!["Alice", "Bob"]);
    assert_eq!(exported.transactions.len(), 1);

    let tx = &exported.transactions[0];
    assert_eq!(tx.payer_name, "Alice");
    assert_eq!(tx.amount, 100.0);
    assert!(!tx.is_repayment);
    assert_eq!(tx.beneficiaries.len(), 2);
    assert!(tx.beneficiaries.iter().all(|b| b.weight == 1.0));
}

#[test]
fn test_export_json_round_trip() {
    let mut storage = InMemoryStorage::new();
    let mut audit_logger = InMemoryAuditLogger::new();
    let (service, trip_id) = seeded_service(&mut storage, &mut audit_logger);

    let exported = export::export_trip(&service, trip_id).unwrap();
    let json = exported.to_json().unwrap();
    let parsed = TripExport::from_json(&json).unwrap();
    assert_eq!(parsed.name, exported.name);
    assert_eq!(parsed.members, exported.members);
    assert_eq!(parsed.transactions.len(), exported.transactions.len());

    assert!(TripExport::from_json("not json").is_err());
}

#[test]
fn test_settlement_report_text() {
    let mut storage = InMemoryStorage::new();
    let mut audit_logger = InMemoryAuditLogger::new();
    let (service, trip_id) = seeded_service(&mut storage, &mut audit_logger);

    let trip = service.get_trip(trip_id).unwrap();
    let members = service.trip_members(trip_id).unwrap();
    let report = service.trip_debts(trip_id, None).unwrap();

    let text = settlement_report(&trip, &members, &report.debts);
    assert!(text.contains("Trip settlement: Baltic"));
    assert!(text.contains("Bob -> Alice: 50.00 PLN"));

    let settled = settlement_report(&trip, &members, &[]);
    assert!(settled.contains("All settled up"));
}

#[test]
fn test_report_with_unknown_member_name() {
    let mut storage = InMemoryStorage::new();
    let mut audit_logger = InMemoryAuditLogger::new();
    let (service, trip_id) = seeded_service(&mut storage, &mut audit_logger);

    let trip = service.get_trip(trip_id).unwrap();
    let debts = vec![Debt {
        from_user_id: uuid::Uuid::new_v4(),
        to_user_id: uuid::Uuid::new_v4(),
        amount: 1.0,
        currency: "PLN".to_string(),
    }];
    let text = settlement_report(&trip, &[], &debts);
    assert!(text.contains("??? -> ???"));
}

#[test]
fn test_balance_chart_config() {
    let mut storage = InMemoryStorage::new();
    let mut audit_logger = InMemoryAuditLogger::new();
    let (service, trip_id) = seeded_service(&mut storage, &mut audit_logger);

    let chart = Visualization::generate_balance_chart(&service, trip_id).unwrap();
    assert_eq!(chart["type"], "bar");
    let labels = chart["data"]["labels"].as_array().unwrap();
    assert_eq!(labels.len(), 2);
    let data = chart["data"]["datasets"][0]["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    let total: f64 = data.iter().map(|v| v.as_f64().unwrap()).sum();
    assert!(total.abs() < 1e-9);
}
