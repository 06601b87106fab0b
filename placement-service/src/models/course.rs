//! Course model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Course entity. Belongs to a School, run by one Supervisor, owns classes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub course_id: Uuid,
    pub course_name: String,
    pub school_id: Uuid,
    pub supervisor_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl Course {
    /// Create a new course.
    pub fn new(course_name: String, school_id: Uuid, supervisor_id: Uuid) -> Self {
        Self {
            course_id: Uuid::new_v4(),
            course_name,
            school_id,
            supervisor_id,
            created_utc: Utc::now(),
        }
    }
}
