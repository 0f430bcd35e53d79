//! Participant roster loading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{BalancerError, BalancerResult};
use crate::traits::RosterSource;

/// Roster source backed by a line-delimited text file: one participant name
/// per line, surrounding whitespace trimmed, blank lines skipped.
#[derive(Debug, Default)]
pub struct FileRosterSource;

impl FileRosterSource {
    /// Create a new file roster source.
    pub fn new() -> Self {
        Self
    }
}

impl RosterSource for FileRosterSource {
    fn load(&self, path: &Path) -> BalancerResult<Vec<String>> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                BalancerError::Roster {
                    message: format!("file '{}' not found", path.display()),
                }
            } else {
                BalancerError::IoError(e)
            }
        })?;

        let participants: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if participants.is_empty() {
            return Err(BalancerError::Roster {
                message: format!("no participants found in '{}'", path.display()),
            });
        }

        debug!("loaded {} participants from {}", participants.len(), path.display());
        Ok(participants)
    }
}
