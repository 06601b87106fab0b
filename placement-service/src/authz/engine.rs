//! Permission engine - the single allow/deny decision point.
//!
//! Evaluation order, first match wins:
//! 1. SysAdmin override (before any parsing or lookup)
//! 2. Create matrix (creates never name an instance; empty-string id)
//! 3. Self-service (resource directly owned by the requester)
//! 4. Per-role delegation through the ownership chains
//! 5. Default deny
//!
//! Missing chain edges deny; infrastructure errors propagate untouched.
//! The engine issues read lookups only and mutates nothing, so it is safe
//! to share across concurrent requests.

use service_core::error::AppError;
use uuid::Uuid;

use crate::authz::action::Action;
use crate::authz::graph::ResourceGraph;
use crate::authz::identity::{Identity, RoleTag};
use crate::authz::policy;
use crate::authz::resource::ResourceKind;

/// Convention: `Create` checks carry no instance id.
pub const NO_RESOURCE_ID: &str = "";

#[derive(Debug, Clone)]
pub struct PermissionEngine<G> {
    graph: G,
}

impl<G: ResourceGraph> PermissionEngine<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// The underlying resource graph accessor.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Decide whether `requester` may perform `action` on the resource
    /// instance named by `resource_id`.
    ///
    /// Denial is `Ok(false)`, never an error; `Err` means the storage
    /// layer failed and the caller should surface a 500, not a 403.
    pub async fn has_permission(
        &self,
        requester: &Identity,
        resource: ResourceKind,
        action: Action,
        resource_id: &str,
    ) -> Result<bool, AppError> {
        if requester.has_role(RoleTag::SysAdmin) {
            return Ok(true);
        }

        if action == Action::Create {
            return Ok(requester
                .roles
                .iter()
                .any(|role| create_allowed(*role, resource)));
        }

        // Opaque ids that do not name a real instance can never be read;
        // malformed input denies the same way a missing row does.
        let Ok(target_id) = Uuid::parse_str(resource_id) else {
            return Ok(false);
        };

        if self
            .allowed_self(requester, resource, action, target_id)
            .await?
        {
            tracing::debug!(
                resource = resource.as_str(),
                action = action.as_str(),
                rule = "self_service",
                "permission granted"
            );
            return Ok(true);
        }

        for role in &requester.roles {
            if self
                .allowed_by_role(*role, requester, resource, action, target_id)
                .await?
            {
                tracing::debug!(
                    resource = resource.as_str(),
                    action = action.as_str(),
                    role = role.as_str(),
                    "permission granted"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Document bundling: all-or-nothing Read over every named student.
    ///
    /// An empty set denies; there is no bundle without subjects.
    pub async fn can_compile(
        &self,
        requester: &Identity,
        student_ids: &[Uuid],
    ) -> Result<bool, AppError> {
        if requester.has_role(RoleTag::SysAdmin) {
            return Ok(true);
        }
        if student_ids.is_empty() {
            return Ok(false);
        }
        for student_id in student_ids {
            let readable = self
                .has_permission(
                    requester,
                    ResourceKind::Student,
                    Action::Read,
                    &student_id.to_string(),
                )
                .await?;
            if !readable {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Self-service: the instance is directly owned by the requester.
    async fn allowed_self(
        &self,
        requester: &Identity,
        resource: ResourceKind,
        action: Action,
        target_id: Uuid,
    ) -> Result<bool, AppError> {
        match (resource, action) {
            (ResourceKind::User, Action::Read | Action::Update) => {
                Ok(target_id == requester.user_id)
            }
            (ResourceKind::Student, Action::Read | Action::Update)
                if requester.has_role(RoleTag::Student) =>
            {
                let profile = self.graph.student_profile(requester.user_id).await?;
                Ok(profile.is_some_and(|p| p.student_id == target_id))
            }
            (ResourceKind::Document, Action::Read | Action::Update | Action::Delete) => {
                let Some(doc) = self.graph.document_ref(target_id).await? else {
                    return Ok(false);
                };
                Ok(doc.owner_user_id == requester.user_id)
            }
            (ResourceKind::Supervisor, Action::Read)
                if requester.has_role(RoleTag::Supervisor) =>
            {
                let profile = self.graph.supervisor_profile(requester.user_id).await?;
                Ok(profile.is_some_and(|p| p.supervisor_id == target_id))
            }
            (ResourceKind::OrgAdmin, Action::Read) if requester.has_role(RoleTag::OrgAdmin) => {
                let profile = self.graph.org_admin_profile(requester.user_id).await?;
                Ok(profile.is_some_and(|p| p.org_admin_id == target_id))
            }
            (ResourceKind::HospitalManager, Action::Read)
                if requester.has_role(RoleTag::HospitalManager) =>
            {
                let profile = self.graph.hospital_manager_profile(requester.user_id).await?;
                Ok(profile.is_some_and(|p| p.manager_id == target_id))
            }
            (ResourceKind::Preceptor, Action::Read)
                if requester.has_role(RoleTag::Preceptor) =>
            {
                let profile = self.graph.preceptor_profile(requester.user_id).await?;
                Ok(profile.is_some_and(|p| p.preceptor_id == target_id))
            }
            _ => Ok(false),
        }
    }

    /// Hierarchical delegation for one held role tag.
    async fn allowed_by_role(
        &self,
        role: RoleTag,
        requester: &Identity,
        resource: ResourceKind,
        action: Action,
        target_id: Uuid,
    ) -> Result<bool, AppError> {
        match role {
            // Handled by the override before any of this runs.
            RoleTag::SysAdmin => Ok(true),
            RoleTag::Student => {
                let Some(profile) = self.graph.student_profile(requester.user_id).await? else {
                    return Ok(false);
                };
                policy::student::allows(&self.graph, &profile, resource, action, target_id).await
            }
            RoleTag::Supervisor => {
                let Some(profile) = self.graph.supervisor_profile(requester.user_id).await? else {
                    return Ok(false);
                };
                policy::supervisor::allows(&self.graph, &profile, resource, action, target_id)
                    .await
            }
            RoleTag::OrgAdmin => {
                let Some(profile) = self.graph.org_admin_profile(requester.user_id).await? else {
                    return Ok(false);
                };
                policy::org_admin::allows(&self.graph, &profile, resource, action, target_id).await
            }
            RoleTag::HospitalManager => {
                let Some(profile) =
                    self.graph.hospital_manager_profile(requester.user_id).await?
                else {
                    return Ok(false);
                };
                policy::hospital_manager::allows(
                    &self.graph,
                    &profile,
                    resource,
                    action,
                    target_id,
                )
                .await
            }
            RoleTag::Preceptor => {
                let Some(profile) = self.graph.preceptor_profile(requester.user_id).await? else {
                    return Ok(false);
                };
                policy::preceptor::allows(&self.graph, &profile, resource, action, target_id).await
            }
        }
    }
}

/// Static create matrix. Creation never names an instance, so authority
/// cannot be scoped to an organization at check time; the matrix grants
/// per-role resource kinds and the sensitive kinds stay with admins.
fn create_allowed(role: RoleTag, resource: ResourceKind) -> bool {
    match role {
        RoleTag::SysAdmin => true,
        RoleTag::OrgAdmin => matches!(
            resource,
            ResourceKind::User
                | ResourceKind::OrgAdmin
                | ResourceKind::Supervisor
                | ResourceKind::HospitalManager
                | ResourceKind::Preceptor
                | ResourceKind::Course
                | ResourceKind::Classes
                | ResourceKind::Student
                | ResourceKind::Shift
                | ResourceKind::Document
        ),
        RoleTag::Supervisor => matches!(
            resource,
            ResourceKind::Course
                | ResourceKind::Classes
                | ResourceKind::Student
                | ResourceKind::Document
        ),
        RoleTag::HospitalManager => {
            matches!(resource, ResourceKind::Shift | ResourceKind::Preceptor)
        }
        RoleTag::Preceptor => false,
        RoleTag::Student => matches!(resource, ResourceKind::Document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admins_mint_admin_roles() {
        for sensitive in [
            ResourceKind::OrgAdmin,
            ResourceKind::Supervisor,
            ResourceKind::HospitalManager,
        ] {
            assert!(create_allowed(RoleTag::OrgAdmin, sensitive));
            assert!(!create_allowed(RoleTag::Supervisor, sensitive));
            assert!(!create_allowed(RoleTag::HospitalManager, sensitive));
            assert!(!create_allowed(RoleTag::Preceptor, sensitive));
            assert!(!create_allowed(RoleTag::Student, sensitive));
        }
    }

    #[test]
    fn organizations_are_sysadmin_only() {
        for org in [ResourceKind::School, ResourceKind::Hospital] {
            assert!(create_allowed(RoleTag::SysAdmin, org));
            assert!(!create_allowed(RoleTag::OrgAdmin, org));
        }
    }

    #[test]
    fn students_upload_their_own_documents() {
        assert!(create_allowed(RoleTag::Student, ResourceKind::Document));
        assert!(!create_allowed(RoleTag::Student, ResourceKind::Shift));
    }
}
