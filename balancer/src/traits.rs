//! Trait definitions with mockall annotations for testing
//!
//! The service seams of the balancer: where state blobs and rosters come
//! from. These traits are used for dependency injection into the session
//! runner and enable testing the orchestration flow without touching disk.

use std::path::Path;

use crate::core::BalancerState;
use crate::error::BalancerResult;

/// Persistence abstraction for the full balancer state.
///
/// Implementations touch durable storage only at the path named by the
/// caller; there is no implicit autosave.
#[mockall::automock]
pub trait StateStore {
    /// Load a previously saved state.
    ///
    /// Returns `Ok(None)` when no file exists at `path` (the caller decides
    /// whether to start fresh). Structurally invalid content is an error,
    /// never silently replaced.
    fn load(&self, path: &Path) -> BalancerResult<Option<BalancerState>>;

    /// Persist the complete state to `path`, replacing any previous file.
    fn save(&self, path: &Path, state: &BalancerState) -> BalancerResult<()>;
}

/// Source of the participant roster.
#[mockall::automock]
pub trait RosterSource {
    /// Load the roster from `path`, one participant per line.
    fn load(&self, path: &Path) -> BalancerResult<Vec<String>>;
}
