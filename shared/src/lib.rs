//! Shared types for the group balancer
//!
//! Contains the plain data types that cross the core/persistence boundary
//! (pairs, groups, session records), the shared error types, and tracing
//! setup. Component-internal types live in the balancer crate itself.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
