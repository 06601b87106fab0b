//! Test helper module for permission-engine integration tests.
//!
//! Provides an in-memory resource graph with builder helpers so tests can
//! assemble ownership chains without a database. The graph clones share
//! state, mirroring the pool-backed `Database` handle, so a test can keep
//! mutating fixtures after handing a clone to the engine.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use placement_service::authz::graph::{
    ClassChain, CourseChain, DocumentRef, HospitalManagerRef, OrgAdminRef, OrgRef, PreceptorRef,
    ResourceGraph, ShiftContext, StudentChain, StudentRef, SupervisorRef,
};
use placement_service::authz::{Identity, PermissionEngine, RoleTag};
use placement_service::models::shift::ShiftWindow;
use placement_service::models::{
    ClassGroup, Course, Document, DocumentStatus, DocumentType, Hospital, HospitalManager,
    OrgAdmin, Preceptor, School, Shift, Student, Supervisor,
};
use service_core::error::AppError;

#[derive(Default)]
struct Inner {
    schools: HashMap<Uuid, School>,
    hospitals: HashMap<Uuid, Hospital>,
    org_admins: HashMap<Uuid, OrgAdmin>,
    supervisors: HashMap<Uuid, Supervisor>,
    courses: HashMap<Uuid, Course>,
    classes: HashMap<Uuid, ClassGroup>,
    students: HashMap<Uuid, Student>,
    managers: HashMap<Uuid, HospitalManager>,
    preceptors: HashMap<Uuid, Preceptor>,
    shifts: HashMap<Uuid, Shift>,
    documents: HashMap<Uuid, Document>,
    poisoned: bool,
}

/// In-memory implementation of the resource graph accessor.
#[derive(Clone, Default)]
pub struct FixtureGraph {
    inner: Arc<RwLock<Inner>>,
}

impl FixtureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine over a shared handle to this graph.
    pub fn engine(&self) -> PermissionEngine<FixtureGraph> {
        PermissionEngine::new(self.clone())
    }

    /// After this, every lookup fails like a lost database connection.
    pub fn poison(&self) {
        self.inner.write().unwrap().poisoned = true;
    }

    fn guard(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, AppError> {
        let inner = self.inner.read().unwrap();
        if inner.poisoned {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "connection reset by peer"
            )));
        }
        Ok(inner)
    }

    // ==================== Builders ====================

    pub fn add_school(&self, name: &str) -> Uuid {
        let school = School::new(name.to_string());
        let id = school.school_id;
        self.inner.write().unwrap().schools.insert(id, school);
        id
    }

    pub fn add_hospital(&self, name: &str) -> Uuid {
        let hospital = Hospital::new(name.to_string());
        let id = hospital.hospital_id;
        self.inner.write().unwrap().hospitals.insert(id, hospital);
        id
    }

    pub fn add_school_admin(&self, user_id: Uuid, school_id: Uuid) -> Uuid {
        let admin = OrgAdmin::for_school(user_id, school_id);
        let id = admin.org_admin_id;
        self.inner.write().unwrap().org_admins.insert(id, admin);
        id
    }

    pub fn add_hospital_admin(&self, user_id: Uuid, hospital_id: Uuid) -> Uuid {
        let admin = OrgAdmin::for_hospital(user_id, hospital_id);
        let id = admin.org_admin_id;
        self.inner.write().unwrap().org_admins.insert(id, admin);
        id
    }

    pub fn remove_org_admin(&self, org_admin_id: Uuid) {
        self.inner.write().unwrap().org_admins.remove(&org_admin_id);
    }

    pub fn add_supervisor(&self, user_id: Uuid, school_id: Uuid) -> Uuid {
        let supervisor = Supervisor::new(user_id, school_id);
        let id = supervisor.supervisor_id;
        self.inner.write().unwrap().supervisors.insert(id, supervisor);
        id
    }

    pub fn add_course(&self, school_id: Uuid, supervisor_id: Uuid) -> Uuid {
        let course = Course::new("Clinical Practice".to_string(), school_id, supervisor_id);
        let id = course.course_id;
        self.inner.write().unwrap().courses.insert(id, course);
        id
    }

    pub fn add_class(&self, course_id: Uuid) -> Uuid {
        let class = ClassGroup::new("Cohort A".to_string(), course_id);
        let id = class.class_id;
        self.inner.write().unwrap().classes.insert(id, class);
        id
    }

    /// Drop a class group, leaving any students pointing at it dangling.
    pub fn remove_class(&self, class_id: Uuid) {
        self.inner.write().unwrap().classes.remove(&class_id);
    }

    pub fn add_student(&self, user_id: Uuid, class_id: Uuid) -> Uuid {
        let student = Student::new(user_id, class_id);
        let id = student.student_id;
        self.inner.write().unwrap().students.insert(id, student);
        id
    }

    pub fn move_student(&self, student_id: Uuid, class_id: Uuid) {
        if let Some(student) = self.inner.write().unwrap().students.get_mut(&student_id) {
            student.class_id = class_id;
        }
    }

    pub fn add_manager(&self, user_id: Uuid, hospital_id: Uuid) -> Uuid {
        let manager = HospitalManager::new(user_id, hospital_id);
        let id = manager.manager_id;
        self.inner.write().unwrap().managers.insert(id, manager);
        id
    }

    pub fn add_preceptor(&self, user_id: Uuid, hospital_id: Uuid) -> Uuid {
        let preceptor = Preceptor::new(
            user_id,
            hospital_id,
            "Emergency".to_string(),
            "RN-10482".to_string(),
        );
        let id = preceptor.preceptor_id;
        self.inner.write().unwrap().preceptors.insert(id, preceptor);
        id
    }

    pub fn add_shift(
        &self,
        hospital_id: Uuid,
        preceptor_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        student_ids: &[Uuid],
    ) -> Uuid {
        let mut shift = Shift::new(
            date,
            start,
            end,
            "Ward 3".to_string(),
            hospital_id,
            preceptor_id,
        );
        shift.student_ids = student_ids.to_vec();
        let id = shift.shift_id;
        self.inner.write().unwrap().shifts.insert(id, shift);
        id
    }

    pub fn add_document(&self, student_id: Uuid) -> Uuid {
        let doc = Document::new(
            "Immunization record".to_string(),
            DocumentType::Immunization,
            "https://files.example/doc.pdf".to_string(),
            student_id,
        );
        let id = doc.document_id;
        self.inner.write().unwrap().documents.insert(id, doc);
        id
    }

    pub fn set_document_status(&self, document_id: Uuid, status: DocumentStatus) {
        if let Some(doc) = self.inner.write().unwrap().documents.get_mut(&document_id) {
            doc.status_code = status.as_str().to_string();
        }
    }
}

/// Shorthand for an identity holding the given tags.
pub fn identity(user_id: Uuid, roles: &[RoleTag]) -> Identity {
    Identity::new(user_id, roles.iter().copied())
}

#[async_trait]
impl ResourceGraph for FixtureGraph {
    async fn student_profile(&self, user_id: Uuid) -> Result<Option<StudentRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .students
            .values()
            .find(|s| s.user_id == user_id)
            .map(|s| StudentRef {
                student_id: s.student_id,
                user_id: s.user_id,
                class_id: s.class_id,
            }))
    }

    async fn supervisor_profile(&self, user_id: Uuid) -> Result<Option<SupervisorRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .supervisors
            .values()
            .find(|s| s.user_id == user_id)
            .map(|s| SupervisorRef {
                supervisor_id: s.supervisor_id,
                user_id: s.user_id,
                school_id: s.school_id,
            }))
    }

    async fn org_admin_profile(&self, user_id: Uuid) -> Result<Option<OrgAdminRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .org_admins
            .values()
            .find(|a| a.user_id == user_id)
            .map(|a| OrgAdminRef {
                org_admin_id: a.org_admin_id,
                user_id: a.user_id,
                school_id: a.school_id,
                hospital_id: a.hospital_id,
            }))
    }

    async fn hospital_manager_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<HospitalManagerRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .managers
            .values()
            .find(|m| m.user_id == user_id)
            .map(|m| HospitalManagerRef {
                manager_id: m.manager_id,
                user_id: m.user_id,
                hospital_id: m.hospital_id,
            }))
    }

    async fn preceptor_profile(&self, user_id: Uuid) -> Result<Option<PreceptorRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .preceptors
            .values()
            .find(|p| p.user_id == user_id)
            .map(|p| PreceptorRef {
                preceptor_id: p.preceptor_id,
                user_id: p.user_id,
                hospital_id: p.hospital_id,
            }))
    }

    async fn student_chain(&self, student_id: Uuid) -> Result<Option<StudentChain>, AppError> {
        let inner = self.guard()?;
        let Some(student) = inner.students.get(&student_id) else {
            return Ok(None);
        };
        let Some(class) = inner.classes.get(&student.class_id) else {
            return Ok(None);
        };
        let Some(course) = inner.courses.get(&class.course_id) else {
            return Ok(None);
        };
        Ok(Some(StudentChain {
            student_id: student.student_id,
            user_id: student.user_id,
            class_id: class.class_id,
            course_id: course.course_id,
            school_id: course.school_id,
            supervisor_id: course.supervisor_id,
        }))
    }

    async fn class_chain(&self, class_id: Uuid) -> Result<Option<ClassChain>, AppError> {
        let inner = self.guard()?;
        let Some(class) = inner.classes.get(&class_id) else {
            return Ok(None);
        };
        let Some(course) = inner.courses.get(&class.course_id) else {
            return Ok(None);
        };
        Ok(Some(ClassChain {
            class_id: class.class_id,
            course_id: course.course_id,
            school_id: course.school_id,
            supervisor_id: course.supervisor_id,
        }))
    }

    async fn course_chain(&self, course_id: Uuid) -> Result<Option<CourseChain>, AppError> {
        let inner = self.guard()?;
        Ok(inner.courses.get(&course_id).map(|c| CourseChain {
            course_id: c.course_id,
            school_id: c.school_id,
            supervisor_id: c.supervisor_id,
        }))
    }

    async fn document_ref(&self, document_id: Uuid) -> Result<Option<DocumentRef>, AppError> {
        let inner = self.guard()?;
        let Some(doc) = inner.documents.get(&document_id) else {
            return Ok(None);
        };
        let Some(student) = inner.students.get(&doc.student_id) else {
            return Ok(None);
        };
        Ok(Some(DocumentRef {
            document_id: doc.document_id,
            student_id: doc.student_id,
            owner_user_id: student.user_id,
            status_code: doc.status_code.clone(),
        }))
    }

    async fn shift_context(&self, shift_id: Uuid) -> Result<Option<ShiftContext>, AppError> {
        let inner = self.guard()?;
        Ok(inner.shifts.get(&shift_id).map(|s| ShiftContext {
            shift_id: s.shift_id,
            hospital_id: s.hospital_id,
            preceptor_id: s.preceptor_id,
            student_ids: s.student_ids.clone(),
        }))
    }

    async fn supervisor_ref(
        &self,
        supervisor_id: Uuid,
    ) -> Result<Option<SupervisorRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner.supervisors.get(&supervisor_id).map(|s| SupervisorRef {
            supervisor_id: s.supervisor_id,
            user_id: s.user_id,
            school_id: s.school_id,
        }))
    }

    async fn org_admin_ref(&self, org_admin_id: Uuid) -> Result<Option<OrgAdminRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner.org_admins.get(&org_admin_id).map(|a| OrgAdminRef {
            org_admin_id: a.org_admin_id,
            user_id: a.user_id,
            school_id: a.school_id,
            hospital_id: a.hospital_id,
        }))
    }

    async fn hospital_manager_ref(
        &self,
        manager_id: Uuid,
    ) -> Result<Option<HospitalManagerRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner.managers.get(&manager_id).map(|m| HospitalManagerRef {
            manager_id: m.manager_id,
            user_id: m.user_id,
            hospital_id: m.hospital_id,
        }))
    }

    async fn preceptor_ref(&self, preceptor_id: Uuid) -> Result<Option<PreceptorRef>, AppError> {
        let inner = self.guard()?;
        Ok(inner.preceptors.get(&preceptor_id).map(|p| PreceptorRef {
            preceptor_id: p.preceptor_id,
            user_id: p.user_id,
            hospital_id: p.hospital_id,
        }))
    }

    async fn student_has_shift_at_hospital(
        &self,
        student_id: Uuid,
        hospital_id: Uuid,
    ) -> Result<bool, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .shifts
            .values()
            .any(|s| s.hospital_id == hospital_id && s.includes_student(student_id)))
    }

    async fn student_has_shift_with_preceptor(
        &self,
        student_id: Uuid,
        preceptor_id: Uuid,
    ) -> Result<bool, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .shifts
            .values()
            .any(|s| s.preceptor_id == preceptor_id && s.includes_student(student_id)))
    }

    async fn org_admin_count(&self, org: OrgRef) -> Result<i64, AppError> {
        let inner = self.guard()?;
        let count = inner
            .org_admins
            .values()
            .filter(|a| match org {
                OrgRef::School(school_id) => a.school_id == Some(school_id),
                OrgRef::Hospital(hospital_id) => a.hospital_id == Some(hospital_id),
            })
            .count();
        Ok(count as i64)
    }

    async fn class_student_count(&self, class_id: Uuid) -> Result<i64, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .students
            .values()
            .filter(|s| s.class_id == class_id)
            .count() as i64)
    }

    async fn shifts_for_preceptor_on(
        &self,
        preceptor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ShiftWindow>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .shifts
            .values()
            .filter(|s| s.preceptor_id == preceptor_id && s.shift_date == date)
            .map(|s| ShiftWindow {
                shift_id: s.shift_id,
                start_time: s.start_time,
                end_time: s.end_time,
            })
            .collect())
    }

    async fn shifts_for_student_on(
        &self,
        student_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ShiftWindow>, AppError> {
        let inner = self.guard()?;
        Ok(inner
            .shifts
            .values()
            .filter(|s| s.shift_date == date && s.includes_student(student_id))
            .map(|s| ShiftWindow {
                shift_id: s.shift_id,
                start_time: s.start_time,
                end_time: s.end_time,
            })
            .collect())
    }
}
