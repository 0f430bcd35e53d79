//! JSON state persistence
//!
//! Serializes the complete balancer state (roster, group size, pair counts,
//! session history) to a single JSON file and back. Saves are atomic
//! (temp file + rename); loads replace state wholesale.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use shared::{Session, SharedError};

use crate::core::{BalancerState, PairLedger};
use crate::error::{BalancerError, BalancerResult};
use crate::traits::StateStore;

/// Persisted state layout. Pair counts are keyed by the canonical
/// `"name1|name2"` encoding.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    people: Vec<String>,
    group_size: usize,
    pair_counts: BTreeMap<String, u64>,
    session_history: Vec<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

/// State store backed by a JSON file on the local file system.
#[derive(Debug, Default)]
pub struct JsonStateStore;

impl JsonStateStore {
    /// Create a new JSON state store.
    pub fn new() -> Self {
        Self
    }
}

impl StateStore for JsonStateStore {
    fn load(&self, path: &Path) -> BalancerResult<Option<BalancerState>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let file: StateFile = serde_json::from_str(&content).map_err(|e| {
            BalancerError::MalformedState { message: e.to_string() }
        })?;

        let ledger = PairLedger::from_key_counts(&file.pair_counts).map_err(|e| {
            BalancerError::MalformedState { message: e.to_string() }
        })?;
        let state =
            BalancerState::from_parts(file.people, file.group_size, ledger, file.session_history)
                .map_err(|e| BalancerError::MalformedState { message: e.to_string() })?;

        debug!(
            "loaded state from {}: {} people, {} sessions",
            path.display(),
            state.people().len(),
            state.session_count()
        );
        Ok(Some(state))
    }

    fn save(&self, path: &Path, state: &BalancerState) -> BalancerResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = StateFile {
            people: state.people().to_vec(),
            group_size: state.group_size(),
            pair_counts: state.ledger().to_key_counts(),
            session_history: state.history().to_vec(),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| SharedError::SerializationError { message: e.to_string() })?;

        // Atomic replace: write next to the target, then rename over it.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;

        debug!(
            "saved state to {}: {} sessions, {} distinct pairs",
            path.display(),
            state.session_count(),
            state.ledger().distinct_pairs()
        );
        Ok(())
    }
}
