//! Round controller
//!
//! Owns the targets, the projectile, the scheduler, and the countdown, and
//! is the sole mutator of round state. Phases run `Idle -> Running -> Ended`,
//! with `play_again` looping Ended back into Running on the same
//! configuration.
//!
//! Determinism: all randomness (slot draw, entry offsets, initial patrol
//! directions) flows through one seeded RNG, so a fixed seed and input
//! sequence reproduce a round exactly.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::projectile_hits_target;
use super::sched::{Scheduler, TaskId, TaskKind};
use super::score::ScorePolicy;
use super::state::{Projectile, RoundPhase, Target};
use crate::consts::*;

/// Sanitized round configuration. The constructor enforces the lane limit,
/// so a `RoundConfig` in hand is always startable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    target_count: usize,
    duration_secs: u32,
}

impl RoundConfig {
    /// Clamp the target count into `1..=MAX_LANES` (lanes are a hard field
    /// limit, extra targets are rejected rather than doubled up) and replace
    /// a zero duration with the 60-second default.
    pub fn new(target_count: u32, duration_secs: u32) -> Self {
        let clamped = (target_count as usize).clamp(1, MAX_LANES);
        if clamped != target_count as usize {
            log::warn!("Target count {target_count} outside 1..={MAX_LANES}, using {clamped}");
        }
        let duration = if duration_secs == 0 {
            log::warn!("Zero round duration, using 60s");
            60
        } else {
            duration_secs
        };
        Self {
            target_count: clamped,
            duration_secs: duration,
        }
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }
}

/// Player input, delivered by the embedding shell. Every event is a no-op
/// unless the round is Running; Fire additionally requires a grounded
/// projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Frozen result of an ended round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub raw_score: u32,
    pub final_score: u32,
    pub target_count: u32,
    pub duration_secs: u32,
}

/// One timed play session.
pub struct Round {
    config: RoundConfig,
    policy: ScorePolicy,
    phase: RoundPhase,
    remaining_secs: u32,
    raw_score: u32,
    targets: Vec<Target>,
    projectile: Projectile,
    sched: Scheduler,
    rng: Pcg32,
    /// Periodic patrol task per target; None while the target awaits respawn
    move_tasks: Vec<Option<TaskId>>,
    rise_task: Option<TaskId>,
    outcome: Option<RoundOutcome>,
}

impl Round {
    pub fn new(config: RoundConfig, seed: u64) -> Self {
        Self {
            config,
            policy: ScorePolicy::default(),
            phase: RoundPhase::Idle,
            remaining_secs: config.duration_secs(),
            raw_score: 0,
            targets: Vec::new(),
            projectile: Projectile::new(),
            sched: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            move_tasks: Vec::new(),
            rise_task: None,
            outcome: None,
        }
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn raw_score(&self) -> u32 {
        self.raw_score
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    /// The frozen result, present once the round has Ended.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Idle/Ended -> Running. Draws each target a distinct lane slot, puts
    /// every actor in motion, and starts the countdown. A restart fully
    /// stops the previous round's schedules first.
    pub fn start(&mut self) {
        if self.phase == RoundPhase::Running {
            return;
        }
        self.sched.clear();
        self.rise_task = None;

        self.raw_score = 0;
        self.remaining_secs = self.config.duration_secs();
        self.outcome = None;
        self.projectile = Projectile::new();

        let slots =
            rand::seq::index::sample(&mut self.rng, MAX_LANES, self.config.target_count());
        self.targets = slots
            .iter()
            .map(|slot| Target::new(slot + 1, &mut self.rng))
            .collect();
        self.move_tasks = vec![None; self.targets.len()];
        for i in 0..self.targets.len() {
            self.launch_target(i);
        }

        self.sched.every(COUNTDOWN_PERIOD_MS, TaskKind::Countdown);
        self.phase = RoundPhase::Running;
        log::info!(
            "Round started: {} targets, {}s",
            self.targets.len(),
            self.remaining_secs
        );
    }

    /// Ended -> Running with the same configuration.
    pub fn play_again(&mut self) {
        if self.phase != RoundPhase::Ended {
            return;
        }
        self.start();
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if self.phase != RoundPhase::Running {
            return;
        }
        match event {
            InputEvent::MoveLeft => self.projectile.move_left(),
            InputEvent::MoveRight => self.projectile.move_right(),
            InputEvent::Fire => {
                if self.projectile.launch() {
                    self.rise_task = Some(
                        self.sched
                            .every(PROJECTILE_RISE_PERIOD_MS, TaskKind::ProjectileRise),
                    );
                    log::debug!("Projectile launched at x={}", self.projectile.pos().x);
                }
            }
        }
    }

    /// One render/update tick: advance the logical clock by `elapsed_ms`,
    /// apply due motion and timer tasks, then run the collision pass.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.phase != RoundPhase::Running {
            return;
        }
        for kind in self.sched.advance(elapsed_ms) {
            // The countdown may end the round mid-batch; later tasks from the
            // same window belong to a dead round and must not apply
            if self.phase != RoundPhase::Running {
                break;
            }
            self.dispatch(kind);
        }
        if self.phase == RoundPhase::Running && self.projectile.is_in_flight() {
            self.collision_pass();
        }
    }

    fn dispatch(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::TargetMove(i) => self.targets[i].advance(),
            TaskKind::ProjectileRise => {
                // A miss mid-batch grounds the projectile while later rise
                // entries from the same advance window are still queued
                if self.projectile.is_in_flight() && self.projectile.rise() {
                    log::debug!("Projectile left the field");
                    self.reset_projectile();
                }
            }
            TaskKind::Countdown => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.end();
                }
            }
            TaskKind::ExplosionClear(i) => self.targets[i].clear_hit(),
            TaskKind::Respawn(i) => self.launch_target(i),
        }
    }

    /// Give a target a fresh entry offset and (re)start its patrol schedule.
    fn launch_target(&mut self, i: usize) {
        self.targets[i].relaunch(&mut self.rng);
        if let Some(id) = self.move_tasks[i].take() {
            self.sched.cancel(id);
        }
        self.move_tasks[i] = Some(
            self.sched
                .every(TARGET_MOVE_PERIOD_MS, TaskKind::TargetMove(i)),
        );
    }

    fn reset_projectile(&mut self) {
        if let Some(id) = self.rise_task.take() {
            self.sched.cancel(id);
        }
        self.projectile.reset();
    }

    /// Check the in-flight projectile against every Alive target. All
    /// overlapping targets in this tick score before the single projectile
    /// reset, so a box overlapping two targets yields two increments.
    fn collision_pass(&mut self) {
        let hits: Vec<usize> = self
            .targets
            .iter()
            .enumerate()
            .filter(|(_, target)| projectile_hits_target(&self.projectile, target))
            .map(|(i, _)| i)
            .collect();
        if hits.is_empty() {
            return;
        }
        for i in hits {
            self.raw_score += HIT_SCORE;
            self.targets[i].hit();
            if let Some(id) = self.move_tasks[i].take() {
                self.sched.cancel(id);
            }
            self.sched
                .once(EXPLOSION_COOLDOWN_MS, TaskKind::ExplosionClear(i));
            self.sched.once(RESPAWN_DELAY_MS, TaskKind::Respawn(i));
            log::debug!(
                "Hit in lane {} (raw score {})",
                self.targets[i].slot(),
                self.raw_score
            );
        }
        self.reset_projectile();
    }

    /// Running -> Ended: stop everything, compute the final score exactly
    /// once, freeze the state.
    fn end(&mut self) {
        self.sched.clear();
        self.move_tasks.iter_mut().for_each(|task| *task = None);
        self.rise_task = None;
        self.projectile.reset();

        let final_score = self.policy.final_score(
            self.raw_score,
            self.targets.len() as u32,
            self.config.duration_secs(),
        );
        self.outcome = Some(RoundOutcome {
            raw_score: self.raw_score,
            final_score,
            target_count: self.targets.len() as u32,
            duration_secs: self.config.duration_secs(),
        });
        self.phase = RoundPhase::Ended;
        log::info!("Round ended: raw {} -> final {}", self.raw_score, final_score);
    }
}
