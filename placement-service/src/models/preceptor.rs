//! Preceptor model - clinical shift supervision profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Preceptor profile. Supervises Shifts at one hospital.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preceptor {
    pub preceptor_id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
    pub specialty: String,
    pub license_number: String,
    pub created_utc: DateTime<Utc>,
}

impl Preceptor {
    /// Create a new preceptor at a hospital.
    pub fn new(user_id: Uuid, hospital_id: Uuid, specialty: String, license_number: String) -> Self {
        Self {
            preceptor_id: Uuid::new_v4(),
            user_id,
            hospital_id,
            specialty,
            license_number,
            created_utc: Utc::now(),
        }
    }
}
