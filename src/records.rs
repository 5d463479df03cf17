//! Score gateway and the local record book
//!
//! Round outcomes leave the core through `ScoreGateway`; a submission
//! failure is a notice for the player, never a reason to touch round state.
//! The record book is the bundled implementation: a descending top-10 table
//! with JSON persistence.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of records to keep
pub const MAX_RECORDS: usize = 10;

/// A submitted round result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub final_score: u32,
    pub raw_score: u32,
    pub target_count: u32,
    pub duration_secs: u32,
}

/// How the core hands off a finished round for persistence.
pub trait ScoreGateway {
    fn submit(&mut self, entry: &ScoreEntry) -> Result<()>;
}

/// Local record table, sorted descending by final score.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecordBook {
    pub entries: Vec<ScoreEntry>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, final_score: u32) -> bool {
        if final_score == 0 {
            return false;
        }
        if self.entries.len() < MAX_RECORDS {
            return true;
        }
        // Beats the lowest entry?
        self.entries
            .last()
            .map(|e| final_score > e.final_score)
            .unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, final_score: u32) -> Option<usize> {
        if !self.qualifies(final_score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| final_score > e.final_score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a qualifying entry, returning the rank achieved (1-indexed) or
    /// None if it didn't qualify
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.final_score) {
            return None;
        }

        // Insertion point, sorted descending by final score
        let pos = self
            .entries
            .iter()
            .position(|e| entry.final_score > e.final_score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_RECORDS);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.final_score)
    }

    /// Load the table from a JSON file; a missing or unreadable file starts
    /// a fresh table.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<RecordBook>(&json) {
                Ok(book) => {
                    log::info!("Loaded {} records", book.entries.len());
                    book
                }
                Err(err) => {
                    log::warn!("Record file unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No records found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the table to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Records saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl ScoreGateway for RecordBook {
    fn submit(&mut self, entry: &ScoreEntry) -> Result<()> {
        self.add(*entry);
        Ok(())
    }
}
