//! OrgAdmin model - delegated administrative authority over one organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// OrgAdmin profile. Exactly one of `school_id`/`hospital_id` is set.
///
/// An organization must always retain at least one OrgAdmin; the delete
/// guard in `services::guard` enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrgAdmin {
    pub org_admin_id: Uuid,
    pub user_id: Uuid,
    pub school_id: Option<Uuid>,
    pub hospital_id: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
}

impl OrgAdmin {
    /// Create a school-side admin.
    pub fn for_school(user_id: Uuid, school_id: Uuid) -> Self {
        Self {
            org_admin_id: Uuid::new_v4(),
            user_id,
            school_id: Some(school_id),
            hospital_id: None,
            created_utc: Utc::now(),
        }
    }

    /// Create a hospital-side admin.
    pub fn for_hospital(user_id: Uuid, hospital_id: Uuid) -> Self {
        Self {
            org_admin_id: Uuid::new_v4(),
            user_id,
            school_id: None,
            hospital_id: Some(hospital_id),
            created_utc: Utc::now(),
        }
    }
}
