//! Requester identity - who is asking.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Role tags a user can hold. A user may hold several at once; each tag
/// corresponds to a distinct profile record owned 1:1 by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    SysAdmin,
    OrgAdmin,
    Supervisor,
    HospitalManager,
    Preceptor,
    Student,
}

impl RoleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::SysAdmin => "sys_admin",
            RoleTag::OrgAdmin => "org_admin",
            RoleTag::Supervisor => "supervisor",
            RoleTag::HospitalManager => "hospital_manager",
            RoleTag::Preceptor => "preceptor",
            RoleTag::Student => "student",
        }
    }

    /// Fail-closed: unknown tags are dropped, not defaulted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sys_admin" => Some(RoleTag::SysAdmin),
            "org_admin" => Some(RoleTag::OrgAdmin),
            "supervisor" => Some(RoleTag::Supervisor),
            "hospital_manager" => Some(RoleTag::HospitalManager),
            "preceptor" => Some(RoleTag::Preceptor),
            "student" => Some(RoleTag::Student),
            _ => None,
        }
    }
}

/// An authenticated requester: user id plus held role tags.
///
/// Constructed per request from a verified token upstream; this subsystem
/// never authenticates, only authorizes.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub roles: HashSet<RoleTag>,
}

impl Identity {
    pub fn new(user_id: Uuid, roles: impl IntoIterator<Item = RoleTag>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    /// Build from the raw tag strings carried in token claims. Unknown
    /// tags are discarded.
    pub fn from_claims(user_id: Uuid, tags: &[String]) -> Self {
        Self {
            user_id,
            roles: tags.iter().filter_map(|t| RoleTag::parse(t)).collect(),
        }
    }

    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }
}
