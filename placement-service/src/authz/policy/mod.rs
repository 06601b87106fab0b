//! Per-role delegation policies.
//!
//! One module per role tag; the engine dispatches each of the requester's
//! held tags to its module and allows on the first grant. Every module is
//! a pure predicate over the resource graph: missing chain edges deny,
//! infrastructure errors propagate.

pub mod hospital_manager;
pub mod org_admin;
pub mod preceptor;
pub mod student;
pub mod supervisor;
