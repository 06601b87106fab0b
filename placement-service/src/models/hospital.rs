//! Hospital model - the clinical organization root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Hospital entity. Owns Shifts, HospitalManagers and Preceptors;
/// administered by OrgAdmins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hospital {
    pub hospital_id: Uuid,
    pub hospital_name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl Hospital {
    /// Create a new hospital.
    pub fn new(hospital_name: String) -> Self {
        Self {
            hospital_id: Uuid::new_v4(),
            hospital_name,
            address: None,
            email: None,
            phone: None,
            created_utc: Utc::now(),
        }
    }
}
