//! Hospital manager model - document-approval authority at one hospital.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// HospitalManager profile. Can approve or reject Documents belonging to
/// Students who have Shifts at this hospital.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HospitalManager {
    pub manager_id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl HospitalManager {
    /// Create a new manager at a hospital.
    pub fn new(user_id: Uuid, hospital_id: Uuid) -> Self {
        Self {
            manager_id: Uuid::new_v4(),
            user_id,
            hospital_id,
            created_utc: Utc::now(),
        }
    }
}
