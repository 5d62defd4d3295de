mod export_tests;
mod ledger_tests;

use crate::models::{Transaction, TransactionSplit};
use chrono::Utc;
use uuid::Uuid;

// Fixed ids keep debtor/creditor tie-breaking predictable across runs.
pub fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn expense(id: u128, payer: u128, amount: f64, currency: &str, rate: f64) -> Transaction {
    Transaction {
        id: uid(id),
        trip_id: uid(1000),
        payer_id: uid(payer),
        amount,
        currency: currency.to_string(),
        description: "test expense".to_string(),
        category: "Other".to_string(),
        exchange_rate: rate,
        date: Utc::now(),
        is_repayment: false,
    }
}

pub fn repayment(id: u128, payer: u128, amount: f64, currency: &str, rate: f64) -> Transaction {
    Transaction {
        is_repayment: true,
        ..expense(id, payer, amount, currency, rate)
    }
}

pub fn split(tx_id: u128, beneficiary: u128, weight: f64) -> TransactionSplit {
    TransactionSplit {
        id: Uuid::new_v4(),
        transaction_id: uid(tx_id),
        beneficiary_id: uid(beneficiary),
        weight,
    }
}
