//! Core types used throughout the group balancer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};

/// Separator used when a pair is encoded as a single string key.
///
/// Participant names must not contain this character; the roster and state
/// loading layers reject names that do.
pub const PAIR_KEY_SEPARATOR: char = '|';

/// One group within a session. Order of members is irrelevant.
pub type Group = Vec<String>;

/// An unordered 2-combination of distinct participants.
///
/// Construction canonicalizes the order lexicographically, so `(A, B)` and
/// `(B, A)` are the same pair and produce the same encoded key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    first: String,
    second: String,
}

impl Pair {
    /// Create a pair from two participant names in any order.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lexicographically smaller member.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger member.
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Encoded key used in the persisted state blob, e.g. `"alice|bob"`.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.first, PAIR_KEY_SEPARATOR, self.second)
    }

    /// Parse an encoded key back into a pair.
    ///
    /// The key must contain exactly one separator with a non-empty name on
    /// each side. Canonical order is restored even if the stored key was not
    /// canonical.
    pub fn from_key(key: &str) -> SharedResult<Self> {
        let Some((first, second)) = key.split_once(PAIR_KEY_SEPARATOR) else {
            return Err(SharedError::InvalidPairKey { input: key.to_string() });
        };
        if first.is_empty() || second.is_empty() || second.contains(PAIR_KEY_SEPARATOR) {
            return Err(SharedError::InvalidPairKey { input: key.to_string() });
        }
        Ok(Self::new(first, second))
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// One completed grouping event.
///
/// Immutable once created: the groups produced, the participants that were
/// selected for the session, and the conflict score of the winning partition.
/// Field names match the persisted state layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Groups produced for this session, in the order they were formed.
    pub groups: Vec<Group>,

    /// Conflict score of the winning partition (lower is better).
    pub score: u64,

    /// Participants selected for this session, a subset of the roster.
    pub participants: Vec<String>,
}

impl Session {
    /// Total number of participants placed into groups.
    pub fn placed_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }
}
