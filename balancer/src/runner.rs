//! End-to-end session run orchestration
//!
//! [`SessionRunner`] drives one invocation of the tool over injected
//! services: load the roster, optionally seed state from a saved blob, plan
//! the requested sessions, report, and optionally persist the result.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::core::{BalancerState, PairStatistics};
use crate::error::BalancerResult;
use crate::services::Reporter;
use crate::traits::{RosterSource, StateStore};

/// Configuration for one balancer run, as resolved from the CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Participant roster file, one name per line.
    pub participants_file: PathBuf,

    /// Number of sessions to generate.
    pub sessions: u32,

    /// Size of each group.
    pub group_size: usize,

    /// Explicit group count per session; defaults to as many full groups as
    /// the roster allows.
    pub num_groups: Option<usize>,

    /// Where to persist the state after the run, if anywhere.
    pub save_state: Option<PathBuf>,

    /// Previously saved state to seed the ledger and history from.
    pub load_state: Option<PathBuf>,

    /// Print the statistics block after generation.
    pub show_stats: bool,

    /// Print the overlap matrix after generation.
    pub show_matrix: bool,

    /// Report on existing state only; plan no new sessions.
    pub stats_only: bool,

    /// Seed for deterministic reproduction.
    pub seed: Option<u64>,

    /// Bare group output only.
    pub quiet: bool,
}

/// Runs the balancer flow with injected persistence and roster services.
pub struct SessionRunner<S, R>
where
    S: StateStore,
    R: RosterSource,
{
    store: S,
    roster_source: R,
    reporter: Reporter,
}

impl<S, R> SessionRunner<S, R>
where
    S: StateStore,
    R: RosterSource,
{
    /// Create a runner with injected dependencies.
    pub fn new(store: S, roster_source: R, reporter: Reporter) -> Self {
        Self {
            store,
            roster_source,
            reporter,
        }
    }

    /// Execute the configured run and return the final state.
    pub fn run(&self, config: &RunConfig) -> BalancerResult<BalancerState> {
        let roster = self.roster_source.load(&config.participants_file)?;
        info!("loaded {} participants", roster.len());
        if !config.quiet {
            self.reporter.roster_loaded(&config.participants_file, &roster);
        }

        let mut state = BalancerState::new(roster, config.group_size)?;

        if let Some(path) = &config.load_state {
            match self.store.load(path)? {
                Some(loaded) => {
                    info!(
                        "seeded from saved state: {} prior sessions",
                        loaded.session_count()
                    );
                    if !config.quiet {
                        self.reporter.state_loaded(path, loaded.session_count());
                    }
                    // Wholesale replacement: roster, group size, ledger, and
                    // history all come from the blob.
                    state = loaded;
                }
                None => {
                    warn!("state file '{}' not found, starting fresh", path.display());
                    self.reporter.state_missing(path);
                }
            }
        }

        if config.stats_only {
            self.reporter
                .statistics(PairStatistics::from_ledger(state.ledger()).as_ref());
            if config.show_matrix {
                self.reporter.overlap_matrix(state.people(), state.ledger());
            }
            return Ok(state);
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for number in 1..=config.sessions {
            let session = state.plan_session(config.num_groups, &mut rng)?;
            debug!(
                "session {number}: {} groups, score {}",
                session.groups.len(),
                session.score
            );
            self.reporter.session(number, &session);
            if config.quiet && number < config.sessions {
                self.reporter.session_gap();
            }
        }

        if config.show_stats && !config.quiet {
            self.reporter
                .statistics(PairStatistics::from_ledger(state.ledger()).as_ref());
        }
        if config.show_matrix && !config.quiet {
            self.reporter.overlap_matrix(state.people(), state.ledger());
        }

        if let Some(path) = &config.save_state {
            self.store.save(path, &state)?;
            info!("state saved to {}", path.display());
            if !config.quiet {
                self.reporter.state_saved(path);
            }
        }

        Ok(state)
    }
}
