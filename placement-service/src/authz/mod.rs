//! Authorization subsystem.
//!
//! Pure decision logic over an injected [`graph::ResourceGraph`]: the
//! engine never authenticates (identities arrive verified) and never
//! writes. Controllers map a `false` decision to 403 and do their own
//! existence check for 404; infrastructure errors pass through as 500.

pub mod action;
pub mod engine;
pub mod filter;
pub mod graph;
pub mod identity;
pub mod policy;
pub mod resource;

pub use action::Action;
pub use engine::{PermissionEngine, NO_RESOURCE_ID};
pub use filter::Page;
pub use graph::{OrgRef, ResourceGraph};
pub use identity::{Identity, RoleTag};
pub use resource::ResourceKind;
