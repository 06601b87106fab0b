//! Preceptor delegation: read access through supervised shifts.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::graph::{PreceptorRef, ResourceGraph};
use crate::authz::resource::ResourceKind;

pub async fn allows<G: ResourceGraph + ?Sized>(
    graph: &G,
    preceptor: &PreceptorRef,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    match (resource, action) {
        (ResourceKind::Shift, Action::Read) => {
            let Some(shift) = graph.shift_context(resource_id).await? else {
                return Ok(false);
            };
            Ok(shift.preceptor_id == preceptor.preceptor_id)
        }
        (ResourceKind::Student, Action::Read) => {
            graph
                .student_has_shift_with_preceptor(resource_id, preceptor.preceptor_id)
                .await
        }
        (ResourceKind::Document, Action::Read) => {
            let Some(doc) = graph.document_ref(resource_id).await? else {
                return Ok(false);
            };
            graph
                .student_has_shift_with_preceptor(doc.student_id, preceptor.preceptor_id)
                .await
        }
        _ => Ok(false),
    }
}
