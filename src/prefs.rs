//! Round preferences and the preferences gateway
//!
//! The simulation reads {target count, round duration} through
//! `PreferencesGateway` before a round starts; what backs the gateway
//! (a local file, a remote profile service) is a collaborator detail the
//! core never sees. Missing or invalid preferences fall back to documented
//! defaults and never block a round.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sim::RoundConfig;

/// Per-player round configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Concurrent patrol targets (the field holds at most 5 lanes)
    pub target_count: u32,
    /// Round length in seconds
    pub round_duration: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            target_count: 1,
            round_duration: 60,
        }
    }
}

impl Preferences {
    /// Convert to a sanitized round configuration (lane limit enforced,
    /// zero duration replaced).
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig::new(self.target_count, self.round_duration)
    }
}

/// How the core reads and writes round preferences.
pub trait PreferencesGateway {
    fn load(&self) -> Result<Preferences>;
    fn save(&mut self, prefs: &Preferences) -> Result<()>;
}

/// In-memory gateway for tests and the demo shell.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    prefs: Option<Preferences>,
}

impl MemoryPreferences {
    pub fn new(prefs: Preferences) -> Self {
        Self { prefs: Some(prefs) }
    }
}

impl PreferencesGateway for MemoryPreferences {
    fn load(&self) -> Result<Preferences> {
        self.prefs.context("no preferences stored")
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        self.prefs = Some(*prefs);
        Ok(())
    }
}

/// JSON-file gateway. `load` reports a missing or corrupt file as an error;
/// the session shell decides to fall back to defaults.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferencesGateway for FilePreferences {
    fn load(&self) -> Result<Preferences> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&json).context("parsing preferences")
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        log::info!("Preferences saved");
        Ok(())
    }
}
