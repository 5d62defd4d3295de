use crate::models::Transaction;
use std::collections::HashMap;

/// Total spent on the trip in its main currency. Repayments move money
/// between members without new spending, so they are excluded here even
/// though they do participate in balance computation.
pub fn total_spent(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|tx| !tx.is_repayment)
        .map(|tx| tx.amount * tx.exchange_rate)
        .sum()
}

/// Main-currency spending per expense category, repayments excluded.
pub fn category_summary(transactions: &[Transaction]) -> HashMap<String, f64> {
    let mut summary: HashMap<String, f64> = HashMap::new();
    for tx in transactions.iter().filter(|tx| !tx.is_repayment) {
        *summary.entry(tx.category.clone()).or_insert(0.0) += tx.amount * tx.exchange_rate;
    }
    summary
}

/// Original-currency spending per currency code, repayments excluded.
pub fn currency_summary(transactions: &[Transaction]) -> HashMap<String, f64> {
    let mut summary: HashMap<String, f64> = HashMap::new();
    for tx in transactions.iter().filter(|tx| !tx.is_repayment) {
        *summary.entry(tx.currency.clone()).or_insert(0.0) += tx.amount;
    }
    summary
}
