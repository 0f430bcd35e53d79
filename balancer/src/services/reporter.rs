//! Formatted console output
//!
//! Product output on stdout: session groupings, overlap statistics, and the
//! pairwise overlap matrix. Diagnostics go through tracing instead and never
//! mix into this surface.

use std::path::Path;

use shared::{Pair, Session};

use crate::core::{PairLedger, PairStatistics};

/// Widest roster the overlap matrix will render before truncating.
const MAX_MATRIX_PEOPLE: usize = 20;

/// Console reporter. In quiet mode only the bare group lines are printed.
#[derive(Debug, Clone)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    /// Create a reporter; `quiet` strips banners and decorations.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Announce the loaded roster. Small rosters are echoed in full.
    pub fn roster_loaded(&self, path: &Path, people: &[String]) {
        println!("Loaded {} participants from '{}'", people.len(), path.display());
        if people.len() <= 20 {
            println!("Participants: {}", people.join(", "));
        }
    }

    /// Announce a loaded state file and its prior session count.
    pub fn state_loaded(&self, path: &Path, prior_sessions: usize) {
        println!("Loaded previous state from '{}'", path.display());
        println!("Previous sessions: {prior_sessions}");
    }

    /// Warn that the requested state file does not exist.
    pub fn state_missing(&self, path: &Path) {
        println!(
            "Warning: State file '{}' not found, starting fresh",
            path.display()
        );
    }

    /// Print one session's groups.
    pub fn session(&self, number: u32, session: &Session) {
        if self.quiet {
            for (i, group) in session.groups.iter().enumerate() {
                println!("Group {}: {}", i + 1, group.join(", "));
            }
        } else {
            println!("\n{} SESSION {} {}", "=".repeat(20), number, "=".repeat(20));
            for (i, group) in session.groups.iter().enumerate() {
                println!("Group {:2}: {}", i + 1, group.join(", "));
            }
        }
    }

    /// Blank separator line between quiet-mode sessions.
    pub fn session_gap(&self) {
        println!();
    }

    /// Print the statistics block, or the "no data" message.
    pub fn statistics(&self, stats: Option<&PairStatistics>) {
        let Some(stats) = stats else {
            println!("\nNo statistics available yet.");
            return;
        };

        println!("\n{} STATISTICS {}", "=".repeat(20), "=".repeat(20));
        println!("Total unique pairs: {}", stats.total_pairs);
        println!(
            "Pair frequency range: {} - {}",
            stats.min_frequency, stats.max_frequency
        );
        println!(
            "Mean pair frequency: {} ± {}",
            stats.mean_frequency, stats.std_frequency
        );

        println!("\nFrequency distribution:");
        for (frequency, count) in &stats.distribution {
            println!("  {frequency} meetings: {count} pairs");
        }
    }

    /// Print the pairwise overlap matrix (sorted by name, upper triangle
    /// only, truncated to the first 20 participants).
    pub fn overlap_matrix(&self, people: &[String], ledger: &PairLedger) {
        if ledger.is_empty() {
            println!("\nNo overlap data available yet.");
            return;
        }

        let mut sorted: Vec<&String> = people.iter().collect();
        sorted.sort();
        if sorted.len() > MAX_MATRIX_PEOPLE {
            sorted.truncate(MAX_MATRIX_PEOPLE);
            println!("\nOverlap Matrix (showing first {MAX_MATRIX_PEOPLE} people):");
        } else {
            println!("\nOverlap Matrix:");
        }

        println!("{}", "=".repeat(sorted.len() * 4 + 10));

        // Header row: 3-character abbreviations.
        print!("{:>10}", "");
        for person in &sorted {
            print!("{:>4}", char_prefix(person, 3));
        }
        println!();

        for (i, row_person) in sorted.iter().enumerate() {
            print!("{:>10}", char_prefix(row_person, 9));
            for (j, col_person) in sorted.iter().enumerate() {
                if i == j {
                    print!("{:>4}", "—");
                } else if i < j {
                    let count = ledger.frequency(&Pair::new(row_person.as_str(), col_person.as_str()));
                    print!("{count:>4}");
                } else {
                    print!("{:>4}", "");
                }
            }
            println!();
        }
    }

    /// Confirm where the state was saved.
    pub fn state_saved(&self, path: &Path) {
        println!("\nSaved session history to '{}'", path.display());
    }
}

/// First `n` characters of a name (not bytes, so multi-byte names are safe).
fn char_prefix(name: &str, n: usize) -> String {
    name.chars().take(n).collect()
}
