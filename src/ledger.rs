use crate::constants::MAX_AMOUNT;
use crate::models::{Transaction, TransactionSplit};
use std::collections::HashMap;
use uuid::Uuid;

/// Unit of account for balance computation.
///
/// `MainCurrency` converts every transaction into the trip's reporting
/// currency via its exchange rate. `SingleCurrency` keeps original amounts
/// and is only meaningful over transactions filtered to one currency, for
/// groups that settle each currency pool separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceMode {
    MainCurrency,
    SingleCurrency,
}

/// Groups splits by their transaction id in one pass.
///
/// Every downstream computation indexes into this map instead of scanning
/// the split list once per transaction.
pub fn splits_by_transaction(
    splits: &[TransactionSplit],
) -> HashMap<Uuid, Vec<&TransactionSplit>> {
    let mut by_tx: HashMap<Uuid, Vec<&TransactionSplit>> = HashMap::new();
    for split in splits {
        by_tx.entry(split.transaction_id).or_default().push(split);
    }
    by_tx
}

/// Fractional share of one split given the transaction's total weight.
/// Defined as 0.0 when the total weight is not positive, so a degenerate
/// transaction never divides by zero or produces NaN.
pub fn effective_share(split: &TransactionSplit, total_weight: f64) -> f64 {
    if total_weight <= 0.0 {
        return 0.0;
    }
    split.weight / total_weight
}

/// Transaction value in the requested unit of account.
pub fn normalized_amount(tx: &Transaction, mode: BalanceMode) -> f64 {
    match mode {
        BalanceMode::MainCurrency => tx.amount * tx.exchange_rate,
        BalanceMode::SingleCurrency => tx.amount,
    }
}

/// Checks the monetary invariants of a single transaction record.
/// Negative amounts are rejected rather than treated as debt reversals.
pub fn validate_transaction(tx: &Transaction) -> Result<(), String> {
    if !tx.amount.is_finite() || tx.amount <= 0.0 {
        return Err(format!("non-positive amount {}", tx.amount));
    }
    if tx.amount > MAX_AMOUNT {
        return Err(format!("amount {} exceeds maximum", tx.amount));
    }
    if !tx.exchange_rate.is_finite() || tx.exchange_rate <= 0.0 {
        return Err(format!("non-positive exchange rate {}", tx.exchange_rate));
    }
    Ok(())
}

/// Checks a split record. Weight 0 is legal ("not a beneficiary"); negative
/// or non-finite weights are malformed.
pub fn validate_split(split: &TransactionSplit) -> Result<(), String> {
    if !split.weight.is_finite() || split.weight < 0.0 {
        return Err(format!(
            "invalid weight {} for beneficiary {}",
            split.weight, split.beneficiary_id
        ));
    }
    Ok(())
}
