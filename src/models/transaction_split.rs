use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A weighted claim by one beneficiary on one transaction's value.
///
/// `weight` is a relative share, not a fraction: a beneficiary's cut is
/// `weight / total_weight` over all splits of the same transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionSplit {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub beneficiary_id: Uuid,
    pub weight: f64,
}
