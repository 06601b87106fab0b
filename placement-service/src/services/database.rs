//! PostgreSQL database service.
//!
//! Implements the resource graph accessor with narrow runtime-checked
//! queries. Joins resolve each ownership edge; a dangling reference
//! simply produces no row, which the engine treats as deny.

use async_trait::async_trait;
use chrono::NaiveDate;
use service_core::error::AppError;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::authz::graph::{
    ClassChain, CourseChain, DocumentRef, HospitalManagerRef, OrgAdminRef, OrgRef, PreceptorRef,
    ResourceGraph, ShiftContext, StudentChain, StudentRef, SupervisorRef,
};
use crate::models::shift::ShiftWindow;

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database wrapper from a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(|e| {
            tracing::error!("Database health check failed: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Database health check failed: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl ResourceGraph for Database {
    async fn student_profile(&self, user_id: Uuid) -> Result<Option<StudentRef>, AppError> {
        let row = sqlx::query_as::<_, StudentRef>(
            "SELECT student_id, user_id, class_id FROM students WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn supervisor_profile(&self, user_id: Uuid) -> Result<Option<SupervisorRef>, AppError> {
        let row = sqlx::query_as::<_, SupervisorRef>(
            "SELECT supervisor_id, user_id, school_id FROM supervisors WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn org_admin_profile(&self, user_id: Uuid) -> Result<Option<OrgAdminRef>, AppError> {
        let row = sqlx::query_as::<_, OrgAdminRef>(
            "SELECT org_admin_id, user_id, school_id, hospital_id FROM org_admins WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn hospital_manager_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<HospitalManagerRef>, AppError> {
        let row = sqlx::query_as::<_, HospitalManagerRef>(
            "SELECT manager_id, user_id, hospital_id FROM hospital_managers WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn preceptor_profile(&self, user_id: Uuid) -> Result<Option<PreceptorRef>, AppError> {
        let row = sqlx::query_as::<_, PreceptorRef>(
            "SELECT preceptor_id, user_id, hospital_id FROM preceptors WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn student_chain(&self, student_id: Uuid) -> Result<Option<StudentChain>, AppError> {
        let row = sqlx::query_as::<_, StudentChain>(
            r#"
            SELECT s.student_id, s.user_id, s.class_id,
                   cg.course_id, co.school_id, co.supervisor_id
            FROM students s
            JOIN class_groups cg ON cg.class_id = s.class_id
            JOIN courses co ON co.course_id = cg.course_id
            WHERE s.student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn class_chain(&self, class_id: Uuid) -> Result<Option<ClassChain>, AppError> {
        let row = sqlx::query_as::<_, ClassChain>(
            r#"
            SELECT cg.class_id, cg.course_id, co.school_id, co.supervisor_id
            FROM class_groups cg
            JOIN courses co ON co.course_id = cg.course_id
            WHERE cg.class_id = $1
            "#,
        )
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn course_chain(&self, course_id: Uuid) -> Result<Option<CourseChain>, AppError> {
        let row = sqlx::query_as::<_, CourseChain>(
            "SELECT course_id, school_id, supervisor_id FROM courses WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn document_ref(&self, document_id: Uuid) -> Result<Option<DocumentRef>, AppError> {
        let row = sqlx::query_as::<_, DocumentRef>(
            r#"
            SELECT d.document_id, d.student_id, s.user_id AS owner_user_id, d.status_code
            FROM documents d
            JOIN students s ON s.student_id = d.student_id
            WHERE d.document_id = $1
            "#,
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn shift_context(&self, shift_id: Uuid) -> Result<Option<ShiftContext>, AppError> {
        let shift = sqlx::query_as::<_, (Uuid, Uuid, Uuid)>(
            "SELECT shift_id, hospital_id, preceptor_id FROM shifts WHERE shift_id = $1",
        )
        .bind(shift_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some((shift_id, hospital_id, preceptor_id)) = shift else {
            return Ok(None);
        };

        let student_ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT student_id FROM shift_students WHERE shift_id = $1",
        )
        .bind(shift_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ShiftContext {
            shift_id,
            hospital_id,
            preceptor_id,
            student_ids,
        }))
    }

    async fn supervisor_ref(
        &self,
        supervisor_id: Uuid,
    ) -> Result<Option<SupervisorRef>, AppError> {
        let row = sqlx::query_as::<_, SupervisorRef>(
            "SELECT supervisor_id, user_id, school_id FROM supervisors WHERE supervisor_id = $1",
        )
        .bind(supervisor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn org_admin_ref(&self, org_admin_id: Uuid) -> Result<Option<OrgAdminRef>, AppError> {
        let row = sqlx::query_as::<_, OrgAdminRef>(
            "SELECT org_admin_id, user_id, school_id, hospital_id FROM org_admins WHERE org_admin_id = $1",
        )
        .bind(org_admin_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn hospital_manager_ref(
        &self,
        manager_id: Uuid,
    ) -> Result<Option<HospitalManagerRef>, AppError> {
        let row = sqlx::query_as::<_, HospitalManagerRef>(
            "SELECT manager_id, user_id, hospital_id FROM hospital_managers WHERE manager_id = $1",
        )
        .bind(manager_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn preceptor_ref(&self, preceptor_id: Uuid) -> Result<Option<PreceptorRef>, AppError> {
        let row = sqlx::query_as::<_, PreceptorRef>(
            "SELECT preceptor_id, user_id, hospital_id FROM preceptors WHERE preceptor_id = $1",
        )
        .bind(preceptor_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn student_has_shift_at_hospital(
        &self,
        student_id: Uuid,
        hospital_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM shift_students ss
                JOIN shifts sh ON sh.shift_id = ss.shift_id
                WHERE ss.student_id = $1 AND sh.hospital_id = $2
            )
            "#,
        )
        .bind(student_id)
        .bind(hospital_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn student_has_shift_with_preceptor(
        &self,
        student_id: Uuid,
        preceptor_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM shift_students ss
                JOIN shifts sh ON sh.shift_id = ss.shift_id
                WHERE ss.student_id = $1 AND sh.preceptor_id = $2
            )
            "#,
        )
        .bind(student_id)
        .bind(preceptor_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn org_admin_count(&self, org: OrgRef) -> Result<i64, AppError> {
        let count: i64 = match org {
            OrgRef::School(school_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM org_admins WHERE school_id = $1")
                    .bind(school_id)
                    .fetch_one(&self.pool)
                    .await?
            }
            OrgRef::Hospital(hospital_id) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM org_admins WHERE hospital_id = $1")
                    .bind(hospital_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn class_student_count(&self, class_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE class_id = $1")
            .bind(class_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn shifts_for_preceptor_on(
        &self,
        preceptor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ShiftWindow>, AppError> {
        let rows = sqlx::query_as::<_, ShiftWindow>(
            "SELECT shift_id, start_time, end_time FROM shifts WHERE preceptor_id = $1 AND shift_date = $2",
        )
        .bind(preceptor_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn shifts_for_student_on(
        &self,
        student_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ShiftWindow>, AppError> {
        let rows = sqlx::query_as::<_, ShiftWindow>(
            r#"
            SELECT sh.shift_id, sh.start_time, sh.end_time
            FROM shifts sh
            JOIN shift_students ss ON ss.shift_id = sh.shift_id
            WHERE ss.student_id = $1 AND sh.shift_date = $2
            "#,
        )
        .bind(student_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
