//! Pairwise co-occurrence accounting
//!
//! The ledger records how many times every unordered pair of participants
//! has been placed in the same group, across all sessions ever generated or
//! loaded. Counts only ever increase; mutation is isolated to [`PairLedger::record`].

use std::collections::{BTreeMap, HashMap};

use shared::{Pair, SharedResult};

/// Mapping from canonical pair to co-occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairLedger {
    counts: HashMap<Pair, u64>,
}

impl PairLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one group: every 2-combination of its members is incremented
    /// by 1. Members are expected to be distinct.
    pub fn record(&mut self, group: &[String]) {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let pair = Pair::new(group[i].as_str(), group[j].as_str());
                *self.counts.entry(pair).or_insert(0) += 1;
            }
        }
    }

    /// Current count for a pair, 0 if the pair was never recorded.
    pub fn frequency(&self, pair: &Pair) -> u64 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Snapshot of all recorded counts. Order is irrelevant.
    pub fn all_frequencies(&self) -> Vec<u64> {
        self.counts.values().copied().collect()
    }

    /// Number of distinct pairs recorded so far.
    pub fn distinct_pairs(&self) -> usize {
        self.counts.len()
    }

    /// True if no pair has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over recorded pairs and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&Pair, u64)> {
        self.counts.iter().map(|(pair, count)| (pair, *count))
    }

    /// Encode the ledger as a sorted key/count map for persistence.
    pub fn to_key_counts(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .map(|(pair, count)| (pair.key(), *count))
            .collect()
    }

    /// Rebuild a ledger from a persisted key/count map.
    pub fn from_key_counts(counts: &BTreeMap<String, u64>) -> SharedResult<Self> {
        let mut ledger = Self::new();
        for (key, count) in counts {
            let pair = Pair::from_key(key)?;
            ledger.counts.insert(pair, *count);
        }
        Ok(ledger)
    }
}
