//! School model - the academic organization root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// School entity. Owns Supervisors and Courses; administered by OrgAdmins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct School {
    pub school_id: Uuid,
    pub school_name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl School {
    /// Create a new school.
    pub fn new(school_name: String) -> Self {
        Self {
            school_id: Uuid::new_v4(),
            school_name,
            address: None,
            email: None,
            phone: None,
            created_utc: Utc::now(),
        }
    }
}
