//! Student delegation: shift participation.
//!
//! Everything else a student may touch (own user record, own profile, own
//! documents) is handled by the engine's self-service step; what remains
//! here is access that resolves through the shift's student set.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::graph::{ResourceGraph, StudentRef};
use crate::authz::resource::ResourceKind;

pub async fn allows<G: ResourceGraph + ?Sized>(
    graph: &G,
    student: &StudentRef,
    resource: ResourceKind,
    action: Action,
    resource_id: Uuid,
) -> Result<bool, AppError> {
    match (resource, action) {
        (ResourceKind::Shift, Action::Read) => {
            let Some(shift) = graph.shift_context(resource_id).await? else {
                return Ok(false);
            };
            Ok(shift.student_ids.contains(&student.student_id))
        }
        _ => Ok(false),
    }
}
