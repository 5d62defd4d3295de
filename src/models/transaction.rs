use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One money movement inside a trip.
///
/// `amount` is denominated in `currency`; `exchange_rate` converts it into
/// the trip's main currency (1.0 when the currencies already match).
/// Repayments use the same payer/split semantics as expenses so they cancel
/// out previously computed debt, but they are excluded from spending
/// statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub payer_id: Uuid,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub category: String,
    pub exchange_rate: f64,
    pub date: DateTime<Utc>,
    pub is_repayment: bool,
}
