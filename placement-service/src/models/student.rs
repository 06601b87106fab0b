//! Student model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Student profile. Member of one class group; owns Documents and
/// participates in Shifts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub student_id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl Student {
    /// Create a new student in a class group.
    pub fn new(user_id: Uuid, class_id: Uuid) -> Self {
        Self {
            student_id: Uuid::new_v4(),
            user_id,
            class_id,
            created_utc: Utc::now(),
        }
    }
}
