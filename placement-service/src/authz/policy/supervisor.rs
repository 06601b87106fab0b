//! Supervisor delegation: authority over the academic chain.
//!
//! A supervisor reaches an entity when its chain resolves back to the
//! supervisor's own profile: Course directly, ClassGroup through its
//! course, Student through class and course, Document through its owning
//! student. Shifts are readable when they include one of the supervisor's
//! students.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::graph::{ResourceGraph, SupervisorRef};
use crate::authz::resource::ResourceKind;

pub async fn allows<G: ResourceGraph + ?Sized>(
    graph: &G,
    supervisor: &SupervisorRef,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    match (resource, action) {
        (ResourceKind::Course, Action::Read | Action::Update | Action::Delete) => {
            let Some(course) = graph.course_chain(resource_id).await? else {
                return Ok(false);
            };
            Ok(course.supervisor_id == supervisor.supervisor_id)
        }
        (ResourceKind::Classes, Action::Read | Action::Update | Action::Delete) => {
            let Some(class) = graph.class_chain(resource_id).await? else {
                return Ok(false);
            };
            Ok(class.supervisor_id == supervisor.supervisor_id)
        }
        (ResourceKind::Student, Action::Read | Action::Update | Action::Delete) => {
            let Some(student) = graph.student_chain(resource_id).await? else {
                return Ok(false);
            };
            Ok(student.supervisor_id == supervisor.supervisor_id)
        }
        // Read-only over student documents; Compile follows the Read rule.
        (ResourceKind::Document, Action::Read | Action::Compile) => {
            let Some(doc) = graph.document_ref(resource_id).await? else {
                return Ok(false);
            };
            let Some(student) = graph.student_chain(doc.student_id).await? else {
                return Ok(false);
            };
            Ok(student.supervisor_id == supervisor.supervisor_id)
        }
        (ResourceKind::Shift, Action::Read) => {
            let Some(shift) = graph.shift_context(resource_id).await? else {
                return Ok(false);
            };
            for student_id in shift.student_ids {
                if let Some(student) = graph.student_chain(student_id).await? {
                    if student.supervisor_id == supervisor.supervisor_id {
                        return Ok(true);
                    }
                }
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}
