use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripMember {
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}
