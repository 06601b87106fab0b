//! Resource kinds the engine gates.

use serde::{Deserialize, Serialize};

/// Closed resource taxonomy.
///
/// `Classes` is the class-group cohort resource (the `ClassGroup` model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    User,
    Student,
    Supervisor,
    Course,
    Classes,
    Shift,
    Document,
    Hospital,
    HospitalManager,
    OrgAdmin,
    School,
    Preceptor,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Student => "student",
            ResourceKind::Supervisor => "supervisor",
            ResourceKind::Course => "course",
            ResourceKind::Classes => "classes",
            ResourceKind::Shift => "shift",
            ResourceKind::Document => "document",
            ResourceKind::Hospital => "hospital",
            ResourceKind::HospitalManager => "hospital_manager",
            ResourceKind::OrgAdmin => "org_admin",
            ResourceKind::School => "school",
            ResourceKind::Preceptor => "preceptor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(ResourceKind::User),
            "student" => Some(ResourceKind::Student),
            "supervisor" => Some(ResourceKind::Supervisor),
            "course" => Some(ResourceKind::Course),
            "classes" => Some(ResourceKind::Classes),
            "shift" => Some(ResourceKind::Shift),
            "document" => Some(ResourceKind::Document),
            "hospital" => Some(ResourceKind::Hospital),
            "hospital_manager" => Some(ResourceKind::HospitalManager),
            "org_admin" => Some(ResourceKind::OrgAdmin),
            "school" => Some(ResourceKind::School),
            "preceptor" => Some(ResourceKind::Preceptor),
            _ => None,
        }
    }

    /// All resource kinds, for exhaustive property tests.
    pub const ALL: [ResourceKind; 12] = [
        ResourceKind::User,
        ResourceKind::Student,
        ResourceKind::Supervisor,
        ResourceKind::Course,
        ResourceKind::Classes,
        ResourceKind::Shift,
        ResourceKind::Document,
        ResourceKind::Hospital,
        ResourceKind::HospitalManager,
        ResourceKind::OrgAdmin,
        ResourceKind::School,
        ResourceKind::Preceptor,
    ];
}
