//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical timeline, advanced explicitly by the embedding shell
//! - Seeded RNG only
//! - No rendering, storage, or platform dependencies

pub mod collision;
pub mod round;
pub mod sched;
pub mod score;
pub mod state;

pub use collision::{Rect, projectile_hits_target};
pub use round::{InputEvent, Round, RoundConfig, RoundOutcome};
pub use sched::{Scheduler, TaskId, TaskKind};
pub use score::ScorePolicy;
pub use state::{Direction, FlightState, HitState, Projectile, RoundPhase, Target};
