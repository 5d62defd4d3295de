use crate::ledger::{
    self, BalanceMode, effective_share, normalized_amount, splits_by_transaction,
};
use crate::tests::{expense, split, uid};

#[test]
fn test_splits_grouped_by_transaction() {
    let splits = vec![
        split(1, 10, 1.0),
        split(1, 11, 2.0),
        split(2, 10, 1.0),
    ];

    let by_tx = splits_by_transaction(&splits);
    assert_eq!(by_tx.len(), 2);
    assert_eq!(by_tx[&uid(1)].len(), 2);
    assert_eq!(by_tx[&uid(2)].len(), 1);
}

#[test]
fn test_effective_share_is_weight_fraction() {
    let s = split(1, 10, 1.0);
    assert_eq!(effective_share(&s, 4.0), 0.25);
}

#[test]
fn test_effective_share_zero_total_weight_is_zero() {
    let s = split(1, 10, 1.0);
    assert_eq!(effective_share(&s, 0.0), 0.0);
    assert_eq!(effective_share(&s, -1.0), 0.0);
    assert!(effective_share(&s, 0.0).is_finite());
}

#[test]
fn test_normalized_amount_per_mode() {
    let tx = expense(1, 10, 100.0, "EUR", 4.5);
    assert_eq!(normalized_amount(&tx, BalanceMode::MainCurrency), 450.0);
    assert_eq!(normalized_amount(&tx, BalanceMode::SingleCurrency), 100.0);
}

#[test]
fn test_validate_transaction_rejects_bad_records() {
    let mut tx = expense(1, 10, -5.0, "PLN", 1.0);
    assert!(ledger::validate_transaction(&tx).is_err());

    tx.amount = f64::NAN;
    assert!(ledger::validate_transaction(&tx).is_err());

    tx.amount = 10.0;
    tx.exchange_rate = 0.0;
    assert!(ledger::validate_transaction(&tx).is_err());

    tx.exchange_rate = 1.0;
    assert!(ledger::validate_transaction(&tx).is_ok());
}

#[test]
fn test_validate_split_rejects_negative_weight() {
    assert!(ledger::validate_split(&split(1, 10, -1.0)).is_err());
    assert!(ledger::validate_split(&split(1, 10, f64::INFINITY)).is_err());
    // Weight 0 means "not a beneficiary", which is legal.
    assert!(ledger::validate_split(&split(1, 10, 0.0)).is_ok());
}
