use crate::constants::{CONSERVATION_TOLERANCE, SETTLED_EPSILON};
use crate::error::TripLedgerError;
use crate::ledger::{self, BalanceMode};
use crate::models::{Debt, Transaction, TransactionSplit};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

/// Caller-side parameters for a balance computation.
#[derive(Clone, Debug)]
pub struct BalanceQuery<'a> {
    pub mode: BalanceMode,
    pub currency_filter: Option<&'a str>,
    pub known_participants: &'a [Uuid],
    pub strict: bool,
}

impl<'a> BalanceQuery<'a> {
    /// Trip-wide ledger in the reporting currency. The default mode.
    pub fn main_currency() -> Self {
        BalanceQuery {
            mode: BalanceMode::MainCurrency,
            currency_filter: None,
            known_participants: &[],
            strict: false,
        }
    }

    /// Per-currency pool over original amounts, restricted to `currency`.
    pub fn single_currency(currency: &'a str) -> Self {
        BalanceQuery {
            mode: BalanceMode::SingleCurrency,
            currency_filter: Some(currency),
            known_participants: &[],
            strict: false,
        }
    }

    /// Seeds the balance map so members with no activity still appear at 0.0.
    pub fn with_participants(mut self, participants: &'a [Uuid]) -> Self {
        self.known_participants = participants;
        self
    }

    /// Abort on the first malformed record instead of skipping it.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn validate(&self) -> Result<(), TripLedgerError> {
        match (self.mode, self.currency_filter) {
            (BalanceMode::SingleCurrency, None) => Err(TripLedgerError::CurrencyFilterRequired),
            (BalanceMode::MainCurrency, Some(currency)) => {
                Err(TripLedgerError::UnexpectedCurrencyFilter(currency.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// A record dropped during lenient balance computation.
#[derive(Clone, Debug)]
pub struct SkippedRecord {
    pub transaction_id: Uuid,
    pub reason: String,
}

/// Net balances plus the diagnostics gathered while computing them.
///
/// Positive balance means the participant is owed money, negative means
/// they owe the group.
#[derive(Clone, Debug, Default)]
pub struct BalanceSheet {
    pub balances: HashMap<Uuid, f64>,
    pub skipped: Vec<SkippedRecord>,
    /// Credit from degenerate transactions (no splits, or zero total
    /// weight): the payer was credited but nobody was debited, so this
    /// portion legitimately breaks the credit/debit symmetry.
    pub unmatched_credit: f64,
}

impl BalanceSheet {
    /// Residual of the conservation invariant: sum of all balances minus
    /// the credit that intentionally has no matching debits.
    pub fn conservation_gap(&self) -> f64 {
        self.balances.values().sum::<f64>() - self.unmatched_credit
    }

    pub fn is_conserved(&self) -> bool {
        self.conservation_gap().abs() <= CONSERVATION_TOLERANCE
    }
}

/// Computes each participant's net balance over a trip snapshot.
///
/// The payer of every transaction is credited its normalized value; each
/// beneficiary is debited `value * weight / total_weight`. Repayments
/// participate identically, which is what lets them cancel existing debt.
/// Transactions with zero split weight credit the payer only.
pub fn compute_balances(
    transactions: &[Transaction],
    splits: &[TransactionSplit],
    query: &BalanceQuery,
) -> Result<BalanceSheet, TripLedgerError> {
    query.validate()?;
    debug!(
        "Computing balances over {} transactions, {} splits, mode {:?}",
        transactions.len(),
        splits.len(),
        query.mode
    );

    let mut sheet = BalanceSheet::default();
    for &participant in query.known_participants {
        sheet.balances.insert(participant, 0.0);
    }

    let by_tx = ledger::splits_by_transaction(splits);

    for tx in transactions {
        if let Some(filter) = query.currency_filter {
            if tx.currency != filter {
                continue;
            }
        }

        if let Err(reason) = ledger::validate_transaction(tx) {
            if query.strict {
                return Err(TripLedgerError::MalformedRecord {
                    transaction_id: tx.id,
                    reason,
                });
            }
            warn!("Skipping transaction {}: {}", tx.id, reason);
            sheet.skipped.push(SkippedRecord {
                transaction_id: tx.id,
                reason,
            });
            continue;
        }

        let mut tx_splits: Vec<&TransactionSplit> = Vec::new();
        for &split in by_tx.get(&tx.id).map(Vec::as_slice).unwrap_or(&[]) {
            match ledger::validate_split(split) {
                Ok(()) => tx_splits.push(split),
                Err(reason) => {
                    if query.strict {
                        return Err(TripLedgerError::MalformedRecord {
                            transaction_id: tx.id,
                            reason,
                        });
                    }
                    warn!("Skipping split of transaction {}: {}", tx.id, reason);
                    sheet.skipped.push(SkippedRecord {
                        transaction_id: tx.id,
                        reason,
                    });
                }
            }
        }

        let value = ledger::normalized_amount(tx, query.mode);
        *sheet.balances.entry(tx.payer_id).or_insert(0.0) += value;

        let total_weight: f64 = tx_splits.iter().map(|s| s.weight).sum();
        if total_weight > 0.0 {
            for split in &tx_splits {
                let share = ledger::effective_share(split, total_weight);
                *sheet.balances.entry(split.beneficiary_id).or_insert(0.0) -= value * share;
            }
        } else {
            // Degenerate: payer credited, nobody debited.
            sheet.unmatched_credit += value;
        }
    }

    debug!("Balances computed: {:?}", sheet.balances);
    Ok(sheet)
}

/// Reduces a balance map to the smallest practical list of repayments.
///
/// Deterministic extreme-pair greedy: the largest debtor always pays the
/// largest creditor, ties broken by id. Emitted amounts are rounded to two
/// decimals; the running balances keep full precision so rounding error
/// never compounds across iterations.
pub fn minimize_debts(balances: &HashMap<Uuid, f64>, currency: &str) -> Vec<Debt> {
    let mut debtors: Vec<(Uuid, f64)> = balances
        .iter()
        .filter(|&(_, &balance)| balance < -SETTLED_EPSILON)
        .map(|(&user, &balance)| (user, balance))
        .collect();
    let mut creditors: Vec<(Uuid, f64)> = balances
        .iter()
        .filter(|&(_, &balance)| balance > SETTLED_EPSILON)
        .map(|(&user, &balance)| (user, balance))
        .collect();

    let mut debts = Vec::new();
    while !debtors.is_empty() && !creditors.is_empty() {
        debtors.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        creditors.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let (debtor, debtor_balance) = debtors[0];
        let (creditor, creditor_balance) = creditors[0];

        let amount = (-debtor_balance).min(creditor_balance);
        let rounded = (amount * 100.0).round() / 100.0;

        if rounded > SETTLED_EPSILON && debtor != creditor {
            debts.push(Debt {
                from_user_id: debtor,
                to_user_id: creditor,
                amount: rounded,
                currency: currency.to_string(),
            });
        }

        debtors[0].1 += amount;
        creditors[0].1 -= amount;

        if debtors[0].1 >= -SETTLED_EPSILON {
            debtors.remove(0);
        }
        if creditors[0].1 <= SETTLED_EPSILON {
            creditors.remove(0);
        }
    }

    debug!("Minimized to {} debts", debts.len());
    debts
}

/// Debt list plus the balance sheet it was derived from.
#[derive(Clone, Debug)]
pub struct DebtReport {
    pub debts: Vec<Debt>,
    pub sheet: BalanceSheet,
    /// Set when total debtor deficit and creditor surplus disagree beyond
    /// tolerance, which points at corrupted upstream data. A warning, not
    /// a failure; the settlement is still produced.
    pub conservation_gap: Option<f64>,
}

/// Convenience chain: balances then minimization. `currency` labels the
/// emitted debts (the trip's main currency, or the filtered currency in
/// single-currency mode).
pub fn compute_debts(
    transactions: &[Transaction],
    splits: &[TransactionSplit],
    query: &BalanceQuery,
    currency: &str,
) -> Result<DebtReport, TripLedgerError> {
    let sheet = compute_balances(transactions, splits, query)?;

    let conservation_gap = if sheet.is_conserved() {
        None
    } else {
        let gap = sheet.conservation_gap();
        warn!("Balances are not conserved, residual {:.4} {}", gap, currency);
        Some(gap)
    };

    let debts = minimize_debts(&sheet.balances, currency);
    Ok(DebtReport {
        debts,
        sheet,
        conservation_gap,
    })
}
