//! Aggregate statistics derived from the pair ledger
//!
//! Pure, on-demand derivation: nothing here mutates the ledger.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::ledger::PairLedger;

/// Summary of pair meeting frequencies across the whole history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairStatistics {
    /// Number of distinct pairs recorded.
    pub total_pairs: usize,

    /// Lowest recorded frequency.
    pub min_frequency: u64,

    /// Highest recorded frequency.
    pub max_frequency: u64,

    /// Mean frequency, rounded to 2 decimals.
    pub mean_frequency: f64,

    /// Population standard deviation, rounded to 2 decimals.
    pub std_frequency: f64,

    /// How many pairs sit at each frequency value.
    pub distribution: BTreeMap<u64, usize>,
}

impl PairStatistics {
    /// Summarize the ledger. Returns `None` when no pair has been recorded
    /// yet (no sessions run).
    pub fn from_ledger(ledger: &PairLedger) -> Option<Self> {
        let frequencies = ledger.all_frequencies();
        if frequencies.is_empty() {
            return None;
        }

        let count = frequencies.len() as f64;
        let mean = frequencies.iter().sum::<u64>() as f64 / count;
        let variance = frequencies
            .iter()
            .map(|&f| {
                let delta = f as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / count;

        let mut distribution = BTreeMap::new();
        for &f in &frequencies {
            *distribution.entry(f).or_insert(0) += 1;
        }

        Some(Self {
            total_pairs: frequencies.len(),
            min_frequency: frequencies.iter().copied().min().unwrap_or(0),
            max_frequency: frequencies.iter().copied().max().unwrap_or(0),
            mean_frequency: round2(mean),
            std_frequency: round2(variance.sqrt()),
            distribution,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn empty_ledger_has_no_statistics() {
        assert_eq!(PairStatistics::from_ledger(&PairLedger::new()), None);
    }

    #[test]
    fn single_session_of_two_groups_of_four() {
        let mut ledger = PairLedger::new();
        ledger.record(&group(&["a", "b", "c", "d"]));
        ledger.record(&group(&["e", "f", "g", "h"]));

        let stats = PairStatistics::from_ledger(&ledger).unwrap();
        assert_eq!(stats.total_pairs, 12);
        assert_eq!(stats.min_frequency, 1);
        assert_eq!(stats.max_frequency, 1);
        assert_eq!(stats.mean_frequency, 1.0);
        assert_eq!(stats.std_frequency, 0.0);
        assert_eq!(stats.distribution.get(&1), Some(&12));
    }

    #[test]
    fn mean_and_std_round_to_two_decimals() {
        let mut ledger = PairLedger::new();
        // Frequencies end up as [2, 1, 1] in some order.
        ledger.record(&group(&["a", "b", "c"]));
        ledger.record(&group(&["a", "b"]));

        let stats = PairStatistics::from_ledger(&ledger).unwrap();
        assert_eq!(stats.total_pairs, 3);
        assert_eq!(stats.min_frequency, 1);
        assert_eq!(stats.max_frequency, 2);
        // mean = 4/3, population std = sqrt(2/9)
        assert_eq!(stats.mean_frequency, 1.33);
        assert_eq!(stats.std_frequency, 0.47);
        assert_eq!(stats.distribution.get(&1), Some(&2));
        assert_eq!(stats.distribution.get(&2), Some(&1));
    }
}
