//! Common test fixtures and helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use balancer::runner::RunConfig;

/// Write a roster file with the given names, one per line.
pub fn write_roster(dir: &Path, names: &[&str]) -> PathBuf {
    let path = dir.join("participants.txt");
    fs::write(&path, names.join("\n")).unwrap();
    path
}

/// Eight-person roster used by most scenarios.
pub fn eight_names() -> Vec<&'static str> {
    vec!["alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi"]
}

/// Quiet baseline config for a roster file; tests adjust what they need.
pub fn base_config(participants_file: PathBuf) -> RunConfig {
    RunConfig {
        participants_file,
        sessions: 1,
        group_size: 4,
        num_groups: None,
        save_state: None,
        load_state: None,
        show_stats: false,
        show_matrix: false,
        stats_only: false,
        seed: Some(42),
        quiet: true,
    }
}
