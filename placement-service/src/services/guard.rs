//! Domain-rule guards that collaborate with the permission engine.
//!
//! These are not authorization decisions: a requester who passes the
//! permission check can still be refused here when the mutation would
//! break a structural invariant. Violations surface as `Conflict`.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::graph::ResourceGraph;
use crate::models::Shift;

/// An organization must always retain at least one OrgAdmin.
pub async fn ensure_org_admin_removable<G: ResourceGraph + ?Sized>(
    graph: &G,
    org_admin_id: Uuid,
) -> Result<(), AppError> {
    let Some(admin) = graph.org_admin_ref(org_admin_id).await? else {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "OrgAdmin {} does not exist",
            org_admin_id
        )));
    };
    let Some(org) = admin.org() else {
        return Err(AppError::InternalError(anyhow::anyhow!(
            "OrgAdmin {} references no organization",
            org_admin_id
        )));
    };
    let remaining = graph.org_admin_count(org).await?;
    if remaining <= 1 {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot remove the organization's last admin"
        )));
    }
    Ok(())
}

/// A class group cannot be deleted while it still has students.
pub async fn ensure_class_removable<G: ResourceGraph + ?Sized>(
    graph: &G,
    class_id: Uuid,
) -> Result<(), AppError> {
    let Some(_) = graph.class_chain(class_id).await? else {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Class {} does not exist",
            class_id
        )));
    };
    let students = graph.class_student_count(class_id).await?;
    if students > 0 {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Class still has {} enrolled student(s)",
            students
        )));
    }
    Ok(())
}

/// No two shifts for the same preceptor or the same student may overlap
/// in time on the same date. The shift's own id is excluded so updates
/// do not collide with themselves.
pub async fn ensure_shift_schedulable<G: ResourceGraph + ?Sized>(
    graph: &G,
    shift: &Shift,
) -> Result<(), AppError> {
    let preceptor_windows = graph
        .shifts_for_preceptor_on(shift.preceptor_id, shift.shift_date)
        .await?;
    if preceptor_windows
        .iter()
        .any(|w| w.shift_id != shift.shift_id && w.collides(shift.start_time, shift.end_time))
    {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Preceptor already has an overlapping shift on {}",
            shift.shift_date
        )));
    }

    for student_id in &shift.student_ids {
        let windows = graph
            .shifts_for_student_on(*student_id, shift.shift_date)
            .await?;
        if windows
            .iter()
            .any(|w| w.shift_id != shift.shift_id && w.collides(shift.start_time, shift.end_time))
        {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Student {} already has an overlapping shift on {}",
                student_id,
                shift.shift_date
            )));
        }
    }

    Ok(())
}
