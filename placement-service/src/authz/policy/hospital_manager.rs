//! HospitalManager delegation: authority scoped to one hospital.
//!
//! Document access resolves through shift participation: a manager sees a
//! student's documents only while that student has a shift at the
//! manager's hospital, and may approve or reject them only while the
//! document is still pending.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::graph::{HospitalManagerRef, ResourceGraph};
use crate::authz::resource::ResourceKind;
use crate::models::document::DocumentStatus;

pub async fn allows<G: ResourceGraph + ?Sized>(
    graph: &G,
    manager: &HospitalManagerRef,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    match (resource, action) {
        (ResourceKind::Hospital, Action::Read) => Ok(resource_id == manager.hospital_id),
        (ResourceKind::Shift, Action::Read | Action::Update | Action::Delete) => {
            let Some(shift) = graph.shift_context(resource_id).await? else {
                return Ok(false);
            };
            Ok(shift.hospital_id == manager.hospital_id)
        }
        (ResourceKind::Preceptor, Action::Read | Action::Update | Action::Delete) => {
            let Some(preceptor) = graph.preceptor_ref(resource_id).await? else {
                return Ok(false);
            };
            Ok(preceptor.hospital_id == manager.hospital_id)
        }
        (ResourceKind::Student, Action::Read) => {
            graph
                .student_has_shift_at_hospital(resource_id, manager.hospital_id)
                .await
        }
        (ResourceKind::Document, Action::Read) => {
            let Some(doc) = graph.document_ref(resource_id).await? else {
                return Ok(false);
            };
            graph
                .student_has_shift_at_hospital(doc.student_id, manager.hospital_id)
                .await
        }
        (ResourceKind::Document, Action::Approve) => {
            let Some(doc) = graph.document_ref(resource_id).await? else {
                return Ok(false);
            };
            // Terminal states stay terminal; only pending documents are
            // approvable, and an unknown status code is not pending.
            if doc.status() != Some(DocumentStatus::Pending) {
                return Ok(false);
            }
            graph
                .student_has_shift_at_hospital(doc.student_id, manager.hospital_id)
                .await
        }
        _ => Ok(false),
    }
}
