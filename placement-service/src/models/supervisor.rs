//! Supervisor model - academic oversight profile, school-scoped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Supervisor profile. Owns zero or more Courses at one School.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supervisor {
    pub supervisor_id: Uuid,
    pub user_id: Uuid,
    pub school_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl Supervisor {
    /// Create a new supervisor at a school.
    pub fn new(user_id: Uuid, school_id: Uuid) -> Self {
        Self {
            supervisor_id: Uuid::new_v4(),
            user_id,
            school_id,
            created_utc: Utc::now(),
        }
    }
}
