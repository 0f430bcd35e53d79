//! Session planning via bounded randomized local search
//!
//! Exact minimum-conflict partitioning is NP-hard in general, so the planner
//! runs a bounded random-restart search instead: shuffle the selected
//! participants, slice the shuffle into groups, score the candidate against
//! the pair ledger, and keep the best partition seen. The trial budget is
//! `min(1000, selected_count * 50)`, so a session always completes in bounded
//! time with a usable (possibly suboptimal) partition.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use shared::{Group, Pair, Session};

use crate::core::ledger::PairLedger;
use crate::error::{BalancerError, BalancerResult};

/// Hard cap on shuffle trials per session.
const MAX_TRIALS: usize = 1000;

/// Trial budget granted per selected participant, up to the hard cap.
const TRIALS_PER_PARTICIPANT: usize = 50;

/// Plans one session of groups against the accumulated pair history.
#[derive(Debug, Clone)]
pub struct SessionPlanner {
    max_trials: usize,
    trials_per_participant: usize,
}

impl Default for SessionPlanner {
    fn default() -> Self {
        Self {
            max_trials: MAX_TRIALS,
            trials_per_participant: TRIALS_PER_PARTICIPANT,
        }
    }
}

impl SessionPlanner {
    /// Create a planner with the default trial budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan one session: select participants, search for a low-conflict
    /// partition, commit the winner to the ledger, and return the session
    /// record.
    ///
    /// `num_groups` defaults to as many full groups as the roster allows.
    /// Fails with [`BalancerError::Capacity`] when the requested
    /// configuration needs more participants than the roster holds; the
    /// ledger is only mutated once a winning partition exists.
    pub fn plan_session<R: Rng>(
        &self,
        roster: &[String],
        group_size: usize,
        num_groups: Option<usize>,
        ledger: &mut PairLedger,
        history_len: usize,
        rng: &mut R,
    ) -> BalancerResult<Session> {
        if group_size == 0 {
            return Err(BalancerError::Configuration {
                field: "group_size".to_string(),
                value: group_size.to_string(),
            });
        }

        let num_groups = match num_groups {
            Some(0) => {
                return Err(BalancerError::Configuration {
                    field: "num_groups".to_string(),
                    value: "0".to_string(),
                });
            }
            Some(n) => n,
            None => {
                let derived = roster.len() / group_size;
                if derived == 0 {
                    // Roster smaller than a single group.
                    return Err(BalancerError::Capacity {
                        available: roster.len(),
                        groups: 1,
                        group_size,
                    });
                }
                derived
            }
        };

        let needed = num_groups * group_size;
        if needed > roster.len() {
            return Err(BalancerError::Capacity {
                available: roster.len(),
                groups: num_groups,
                group_size,
            });
        }

        let selected = Self::select_participants(roster, needed, history_len);
        let trials = self.max_trials.min(selected.len() * self.trials_per_participant);

        // First trial seeds the running best; later trials must beat it
        // strictly, so ties keep the first partition found.
        let mut shuffled = selected.clone();
        shuffled.shuffle(rng);
        let mut best_groups = Self::partition(&shuffled, group_size);
        let mut best_score = Self::conflict_score(&best_groups, ledger);

        for _ in 1..trials {
            if best_score == 0 {
                break;
            }
            shuffled.shuffle(rng);
            let candidate = Self::partition(&shuffled, group_size);
            let score = Self::conflict_score(&candidate, ledger);
            if score < best_score {
                best_score = score;
                best_groups = candidate;
            }
        }

        debug!(
            "planned session: {} groups of {}, score {}",
            best_groups.len(),
            group_size,
            best_score
        );

        for group in &best_groups {
            ledger.record(group);
        }

        Ok(Session {
            groups: best_groups,
            score: best_score,
            participants: selected,
        })
    }

    /// Select the participants for this session.
    ///
    /// When the roster holds more people than the session needs, a contiguous
    /// window rotated by `history_len % roster.len()` is taken, so that every
    /// participant eventually appears across successive sessions. The offset
    /// formula determines long-run fairness of exposure and is fixed.
    fn select_participants(roster: &[String], needed: usize, history_len: usize) -> Vec<String> {
        if roster.len() > needed {
            let start = history_len % roster.len();
            roster
                .iter()
                .cycle()
                .skip(start)
                .take(needed)
                .cloned()
                .collect()
        } else {
            roster.to_vec()
        }
    }

    /// Slice a shuffled selection into contiguous groups.
    ///
    /// The final chunk may be shorter than `group_size` when the input length
    /// is not a multiple of it. Session selection always supplies a multiple,
    /// so the short tail stays latent there, but the primitive keeps the
    /// slicing semantics as-is.
    fn partition(selected: &[String], group_size: usize) -> Vec<Group> {
        selected.chunks(group_size).map(|c| c.to_vec()).collect()
    }

    /// Quadratic conflict score of a candidate partition: the sum of
    /// `frequency(pair)^2` over every in-group pair. Squaring makes repeated
    /// re-pairings disproportionately costly, spreading first and second
    /// meetings broadly before any pair meets a third time.
    fn conflict_score(groups: &[Group], ledger: &PairLedger) -> u64 {
        let mut score = 0u64;
        for group in groups {
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    let freq = ledger.frequency(&Pair::new(group[i].as_str(), group[j].as_str()));
                    score += freq * freq;
                }
            }
        }
        score
    }
}
