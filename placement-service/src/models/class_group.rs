//! Class group model - a cohort of students within a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Class group entity. Owns zero or more Students.
///
/// Cannot be deleted while it still has Students; see `services::guard`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassGroup {
    pub class_id: Uuid,
    pub class_name: String,
    pub course_id: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl ClassGroup {
    /// Create a new class group under a course.
    pub fn new(class_name: String, course_id: Uuid) -> Self {
        Self {
            class_id: Uuid::new_v4(),
            class_name,
            course_id,
            created_utc: Utc::now(),
        }
    }
}
