//! OrgAdmin delegation: authority over everything under one organization.
//!
//! School admins reach Supervisors, Courses, ClassGroups, Students, their
//! Documents, and peer admins of the same School. Hospital admins reach
//! HospitalManagers, Shifts, Preceptors, and peer admins of the same
//! Hospital. Document approval stays with HospitalManagers.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::graph::{OrgAdminRef, OrgRef, ResourceGraph};
use crate::authz::resource::ResourceKind;

pub async fn allows<G: ResourceGraph + ?Sized>(
    graph: &G,
    admin: &OrgAdminRef,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    // A profile with neither org side set is malformed; deny.
    let Some(org) = admin.org() else {
        return Ok(false);
    };
    match org {
        OrgRef::School(school_id) => {
            allows_school_side(graph, school_id, resource, action, resource_id).await
        }
        OrgRef::Hospital(hospital_id) => {
            allows_hospital_side(graph, hospital_id, resource, action, resource_id).await
        }
    }
}

async fn allows_school_side<G: ResourceGraph + ?Sized>(
    graph: &G,
    school_id: Uuid,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    match (resource, action) {
        // The org itself: read and update, never delete.
        (ResourceKind::School, Action::Read | Action::Update) => Ok(resource_id == school_id),
        (ResourceKind::Supervisor, Action::Read | Action::Update | Action::Delete) => {
            let Some(supervisor) = graph.supervisor_ref(resource_id).await? else {
                return Ok(false);
            };
            Ok(supervisor.school_id == school_id)
        }
        (ResourceKind::Course, Action::Read | Action::Update | Action::Delete) => {
            let Some(course) = graph.course_chain(resource_id).await? else {
                return Ok(false);
            };
            Ok(course.school_id == school_id)
        }
        (ResourceKind::Classes, Action::Read | Action::Update | Action::Delete) => {
            let Some(class) = graph.class_chain(resource_id).await? else {
                return Ok(false);
            };
            Ok(class.school_id == school_id)
        }
        (ResourceKind::Student, Action::Read | Action::Update | Action::Delete) => {
            let Some(student) = graph.student_chain(resource_id).await? else {
                return Ok(false);
            };
            Ok(student.school_id == school_id)
        }
        (
            ResourceKind::Document,
            Action::Read | Action::Update | Action::Delete | Action::Compile,
        ) => {
            let Some(doc) = graph.document_ref(resource_id).await? else {
                return Ok(false);
            };
            let Some(student) = graph.student_chain(doc.student_id).await? else {
                return Ok(false);
            };
            Ok(student.school_id == school_id)
        }
        (ResourceKind::OrgAdmin, Action::Read | Action::Update | Action::Delete) => {
            let Some(peer) = graph.org_admin_ref(resource_id).await? else {
                return Ok(false);
            };
            Ok(peer.school_id == Some(school_id))
        }
        _ => Ok(false),
    }
}

async fn allows_hospital_side<G: ResourceGraph + ?Sized>(
    graph: &G,
    hospital_id: Uuid,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    match (resource, action) {
        (ResourceKind::Hospital, Action::Read | Action::Update) => Ok(resource_id == hospital_id),
        (ResourceKind::HospitalManager, Action::Read | Action::Update | Action::Delete) => {
            let Some(manager) = graph.hospital_manager_ref(resource_id).await? else {
                return Ok(false);
            };
            Ok(manager.hospital_id == hospital_id)
        }
        (ResourceKind::Shift, Action::Read | Action::Update | Action::Delete) => {
            let Some(shift) = graph.shift_context(resource_id).await? else {
                return Ok(false);
            };
            Ok(shift.hospital_id == hospital_id)
        }
        (ResourceKind::Preceptor, Action::Read | Action::Update | Action::Delete) => {
            let Some(preceptor) = graph.preceptor_ref(resource_id).await? else {
                return Ok(false);
            };
            Ok(preceptor.hospital_id == hospital_id)
        }
        (ResourceKind::OrgAdmin, Action::Read | Action::Update | Action::Delete) => {
            let Some(peer) = graph.org_admin_ref(resource_id).await? else {
                return Ok(false);
            };
            Ok(peer.hospital_id == Some(hospital_id))
        }
        _ => Ok(false),
    }
}
