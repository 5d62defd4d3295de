use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed repayment recommendation, produced by debt minimization.
/// Debts are computation output only and are never persisted; settling one
/// materializes into a new repayment transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
    pub amount: f64,
    pub currency: String,
}
