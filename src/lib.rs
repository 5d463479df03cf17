//! Skystrike - a timed shooting-gallery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, round state, scoring)
//! - `prefs`: Round configuration and the preferences gateway
//! - `records`: Score gateway and the local record book
//! - `render`: Drawing-surface boundary consumed by any rendering backend
//! - `app`: Session shell wiring gateways to the round lifecycle

pub mod app;
pub mod prefs;
pub mod records;
pub mod render;
pub mod sim;

pub use prefs::{Preferences, PreferencesGateway};
pub use records::{RecordBook, ScoreEntry, ScoreGateway};
pub use sim::{Round, RoundPhase};

/// Game configuration constants
pub mod consts {
    /// Playing field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 1400.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Horizontal lanes targets patrol in. Lane 1 is the topmost.
    pub const LANE_HEIGHT: f32 = 100.0;
    pub const MAX_LANES: usize = 5;

    /// Target defaults
    pub const TARGET_WIDTH: f32 = 100.0;
    pub const TARGET_HEIGHT: f32 = 100.0;
    pub const TARGET_STEP: f32 = 10.0;
    /// Patrol motion period (one step per fire)
    pub const TARGET_MOVE_PERIOD_MS: u64 = 25;
    /// Re-entry offsets are drawn from this many discrete start columns
    pub const ENTRY_COLUMNS: u32 = 10;
    pub const ENTRY_COLUMN_SPACING: f32 = 120.0;
    pub const ENTRY_COLUMN_MARGIN: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 60.0;
    pub const PROJECTILE_HEIGHT: f32 = 80.0;
    pub const PROJECTILE_STEP: f32 = 10.0;
    pub const PROJECTILE_RISE_STEP: f32 = 5.0;
    pub const PROJECTILE_RISE_PERIOD_MS: u64 = 10;
    /// Gap between the grounded projectile and the field bottom
    pub const PROJECTILE_BOTTOM_MARGIN: f32 = 10.0;

    /// Round timing
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
    /// How long a hit target shows its explosion sprite
    pub const EXPLOSION_COOLDOWN_MS: u64 = 1000;
    /// Delay before a hit target re-enters the field
    pub const RESPAWN_DELAY_MS: u64 = 1000;

    /// Raw score awarded per confirmed hit
    pub const HIT_SCORE: u32 = 100;
}

/// Vertical center-line of a lane; slot 1 is the topmost lane.
#[inline]
pub fn lane_top(slot: usize) -> f32 {
    slot as f32 * consts::LANE_HEIGHT - consts::LANE_HEIGHT / 2.0
}
