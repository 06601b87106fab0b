//! Resource graph accessor - the read-only lookups the engine walks.
//!
//! One narrow lookup per ownership edge. Every lookup either returns the
//! requested projection or `None` for "not found"; the engine treats
//! `None` as deny, never as an error. `Err` is reserved for
//! infrastructure failures and propagates uncaught.

use async_trait::async_trait;
use chrono::NaiveDate;
use service_core::error::AppError;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::document::DocumentStatus;
use crate::models::shift::ShiftWindow;

/// Reference to one concrete organization.
///
/// Replaces the source's abstract Organization base class with a tagged
/// union; an OrgAdmin's authority is rooted at exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrgRef {
    School(Uuid),
    Hospital(Uuid),
}

/// Student with its full ownership chain resolved.
#[derive(Debug, Clone, FromRow)]
pub struct StudentChain {
    pub student_id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub course_id: Uuid,
    pub school_id: Uuid,
    pub supervisor_id: Uuid,
}

/// Class group with its chain up to school and supervisor.
#[derive(Debug, Clone, FromRow)]
pub struct ClassChain {
    pub class_id: Uuid,
    pub course_id: Uuid,
    pub school_id: Uuid,
    pub supervisor_id: Uuid,
}

/// Course with its owning school and supervisor.
#[derive(Debug, Clone, FromRow)]
pub struct CourseChain {
    pub course_id: Uuid,
    pub school_id: Uuid,
    pub supervisor_id: Uuid,
}

/// Document with its owning student and that student's user account.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRef {
    pub document_id: Uuid,
    pub student_id: Uuid,
    pub owner_user_id: Uuid,
    pub status_code: String,
}

impl DocumentRef {
    /// Typed status; `None` for unknown codes (fail-closed).
    pub fn status(&self) -> Option<DocumentStatus> {
        DocumentStatus::parse(&self.status_code)
    }
}

/// Shift with the edges the engine needs: hospital, preceptor, students.
#[derive(Debug, Clone)]
pub struct ShiftContext {
    pub shift_id: Uuid,
    pub hospital_id: Uuid,
    pub preceptor_id: Uuid,
    pub student_ids: Vec<Uuid>,
}

/// Supervisor profile projection.
#[derive(Debug, Clone, FromRow)]
pub struct SupervisorRef {
    pub supervisor_id: Uuid,
    pub user_id: Uuid,
    pub school_id: Uuid,
}

/// Student profile projection.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRef {
    pub student_id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
}

/// OrgAdmin profile projection; exactly one org side is set.
#[derive(Debug, Clone, FromRow)]
pub struct OrgAdminRef {
    pub org_admin_id: Uuid,
    pub user_id: Uuid,
    pub school_id: Option<Uuid>,
    pub hospital_id: Option<Uuid>,
}

impl OrgAdminRef {
    /// The administered organization, or `None` on a malformed row
    /// (neither side set) - which denies downstream.
    pub fn org(&self) -> Option<OrgRef> {
        match (self.school_id, self.hospital_id) {
            (Some(school), None) => Some(OrgRef::School(school)),
            (None, Some(hospital)) => Some(OrgRef::Hospital(hospital)),
            _ => None,
        }
    }
}

/// HospitalManager profile projection.
#[derive(Debug, Clone, FromRow)]
pub struct HospitalManagerRef {
    pub manager_id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
}

/// Preceptor profile projection.
#[derive(Debug, Clone, FromRow)]
pub struct PreceptorRef {
    pub preceptor_id: Uuid,
    pub user_id: Uuid,
    pub hospital_id: Uuid,
}

/// Read-only lookups over the relational ownership graph.
///
/// Backed by `services::Database` in production and by the in-memory
/// fixture graph in tests. All lookups may suspend awaiting storage;
/// none of them writes.
#[async_trait]
pub trait ResourceGraph: Send + Sync {
    // Profile lookups, keyed by the requester's user id.

    async fn student_profile(&self, user_id: Uuid) -> Result<Option<StudentRef>, AppError>;
    async fn supervisor_profile(&self, user_id: Uuid) -> Result<Option<SupervisorRef>, AppError>;
    async fn org_admin_profile(&self, user_id: Uuid) -> Result<Option<OrgAdminRef>, AppError>;
    async fn hospital_manager_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<HospitalManagerRef>, AppError>;
    async fn preceptor_profile(&self, user_id: Uuid) -> Result<Option<PreceptorRef>, AppError>;

    // Chain lookups, keyed by the target resource id.

    async fn student_chain(&self, student_id: Uuid) -> Result<Option<StudentChain>, AppError>;
    async fn class_chain(&self, class_id: Uuid) -> Result<Option<ClassChain>, AppError>;
    async fn course_chain(&self, course_id: Uuid) -> Result<Option<CourseChain>, AppError>;
    async fn document_ref(&self, document_id: Uuid) -> Result<Option<DocumentRef>, AppError>;
    async fn shift_context(&self, shift_id: Uuid) -> Result<Option<ShiftContext>, AppError>;
    async fn supervisor_ref(&self, supervisor_id: Uuid)
        -> Result<Option<SupervisorRef>, AppError>;
    async fn org_admin_ref(&self, org_admin_id: Uuid) -> Result<Option<OrgAdminRef>, AppError>;
    async fn hospital_manager_ref(
        &self,
        manager_id: Uuid,
    ) -> Result<Option<HospitalManagerRef>, AppError>;
    async fn preceptor_ref(&self, preceptor_id: Uuid) -> Result<Option<PreceptorRef>, AppError>;

    // Shift participation edges.

    async fn student_has_shift_at_hospital(
        &self,
        student_id: Uuid,
        hospital_id: Uuid,
    ) -> Result<bool, AppError>;
    async fn student_has_shift_with_preceptor(
        &self,
        student_id: Uuid,
        preceptor_id: Uuid,
    ) -> Result<bool, AppError>;

    // Projections for the collaborating domain rules (services::guard).

    async fn org_admin_count(&self, org: OrgRef) -> Result<i64, AppError>;
    async fn class_student_count(&self, class_id: Uuid) -> Result<i64, AppError>;
    async fn shifts_for_preceptor_on(
        &self,
        preceptor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ShiftWindow>, AppError>;
    async fn shifts_for_student_on(
        &self,
        student_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ShiftWindow>, AppError>;
}
