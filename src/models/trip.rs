use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared expense pool: participants plus the transactions they log.
/// `main_currency` is the trip's reporting currency; foreign amounts
/// convert into it via each transaction's exchange rate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub main_currency: String,
    pub destination: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}
