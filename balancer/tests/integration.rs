//! Integration tests for the balancer
//!
//! Exercise the full flow with the real services: roster files on disk,
//! JSON state persistence, and multi-run history accumulation.

use std::collections::HashSet;
use std::fs;

use balancer::services::{FileRosterSource, JsonStateStore, Reporter};
use balancer::{BalancerError, PairLedger, SessionRunner};

mod common;
use common::{base_config, eight_names, write_roster};

fn runner() -> SessionRunner<JsonStateStore, FileRosterSource> {
    SessionRunner::new(JsonStateStore::new(), FileRosterSource::new(), Reporter::new(true))
}

#[test]
fn end_to_end_run_persists_a_well_formed_state_file() {
    let tmp = tempfile::tempdir().unwrap();
    let roster_path = write_roster(tmp.path(), &eight_names());
    let state_path = tmp.path().join("history.json");

    let mut config = base_config(roster_path);
    config.sessions = 2;
    config.save_state = Some(state_path.clone());

    let state = runner().run(&config).unwrap();
    assert_eq!(state.session_count(), 2);

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(value["people"].as_array().unwrap().len(), 8);
    assert_eq!(value["group_size"], 4);
    assert_eq!(value["session_history"].as_array().unwrap().len(), 2);
    for key in value["pair_counts"].as_object().unwrap().keys() {
        assert!(key.contains('|'));
    }
}

#[test]
fn every_session_partitions_its_selection() {
    let tmp = tempfile::tempdir().unwrap();
    let roster_path = write_roster(tmp.path(), &eight_names());

    let mut config = base_config(roster_path);
    config.sessions = 4;

    let state = runner().run(&config).unwrap();
    for session in state.history() {
        let placed: Vec<&String> = session.groups.iter().flatten().collect();
        assert_eq!(placed.len(), session.participants.len());
        let unique: HashSet<&String> = placed.into_iter().collect();
        assert_eq!(unique.len(), session.participants.len());
    }
}

#[test]
fn history_accumulates_across_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let roster_path = write_roster(tmp.path(), &eight_names());
    let state_path = tmp.path().join("history.json");

    let mut first = base_config(roster_path.clone());
    first.save_state = Some(state_path.clone());
    runner().run(&first).unwrap();

    let mut second = base_config(roster_path);
    second.load_state = Some(state_path.clone());
    second.save_state = Some(state_path.clone());
    second.seed = Some(43);
    let state = runner().run(&second).unwrap();

    assert_eq!(state.session_count(), 2);

    // The ledger must equal an independent reconstruction from the history.
    let mut rebuilt = PairLedger::new();
    for session in state.history() {
        for group in &session.groups {
            rebuilt.record(group);
        }
    }
    assert_eq!(&rebuilt, state.ledger());
}

#[test]
fn seeded_runs_are_reproducible() {
    let tmp = tempfile::tempdir().unwrap();
    let roster_path = write_roster(tmp.path(), &eight_names());

    let run_once = |state_file: &str| {
        let mut config = base_config(roster_path.clone());
        config.sessions = 3;
        config.save_state = Some(tmp.path().join(state_file));
        runner().run(&config).unwrap()
    };

    let a = run_once("a.json");
    let b = run_once("b.json");
    assert_eq!(a.history(), b.history());
}

#[test]
fn capacity_shortfall_fails_without_writing_state() {
    let tmp = tempfile::tempdir().unwrap();
    let roster_path = write_roster(tmp.path(), &["alice", "bob", "carol"]);
    let state_path = tmp.path().join("history.json");

    let mut config = base_config(roster_path);
    config.group_size = 4;
    config.save_state = Some(state_path.clone());

    let result = runner().run(&config);
    assert!(matches!(result, Err(BalancerError::Capacity { .. })));
    assert!(!state_path.exists());
}

#[test]
fn oversubscribed_roster_cycles_everyone_in() {
    let tmp = tempfile::tempdir().unwrap();
    let names: Vec<&str> = vec![
        "p0", "p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9",
    ];
    let roster_path = write_roster(tmp.path(), &names);

    // Each session needs 9 of the 10 people; the selection window rotates by
    // one per session, so three sessions cover the whole roster.
    let mut config = base_config(roster_path);
    config.group_size = 3;
    config.sessions = 3;

    let state = runner().run(&config).unwrap();
    let seen: HashSet<&String> = state
        .history()
        .iter()
        .flat_map(|s| s.participants.iter())
        .collect();
    assert_eq!(seen.len(), names.len());
}

#[test]
fn malformed_state_file_fails_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let roster_path = write_roster(tmp.path(), &eight_names());
    let state_path = tmp.path().join("broken.json");
    fs::write(&state_path, "{ \"people\": 7 }").unwrap();

    let mut config = base_config(roster_path);
    config.load_state = Some(state_path);

    let result = runner().run(&config);
    assert!(matches!(result, Err(BalancerError::MalformedState { .. })));
}
