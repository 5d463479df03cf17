//! Round actors and their state
//!
//! Targets and the projectile own only their own motion and hit state.
//! Cross-actor rules (scoring, respawn timing, round lifecycle) live in the
//! round controller.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use crate::consts::*;
use crate::lane_top;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Configured but not yet started
    Idle,
    /// Timers live, actors in motion
    Running,
    /// Countdown expired; state frozen, outcome available
    Ended,
}

/// Patrol direction along a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Target hit state. Exploding targets are immune to further collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitState {
    Alive,
    Exploding,
}

/// Projectile flight state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Grounded,
    InFlight,
}

/// A patrolling target, fixed to the lane its slot selects.
#[derive(Debug, Clone)]
pub struct Target {
    slot: usize,
    pos: Vec2,
    dir: Direction,
    hit_state: HitState,
    step: f32,
}

impl Target {
    /// Create a target in lane `slot` (1..=MAX_LANES). The vertical position
    /// is fixed here for the target's whole life; the initial direction comes
    /// from the round RNG.
    pub fn new(slot: usize, rng: &mut impl Rng) -> Self {
        debug_assert!((1..=MAX_LANES).contains(&slot));
        let dir = if rng.random_bool(0.5) {
            Direction::Right
        } else {
            Direction::Left
        };
        Self {
            slot,
            pos: Vec2::new(0.0, lane_top(slot)),
            dir,
            hit_state: HitState::Alive,
            step: TARGET_STEP,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn hit_state(&self) -> HitState {
        self.hit_state
    }

    pub fn is_alive(&self) -> bool {
        self.hit_state == HitState::Alive
    }

    /// One patrol step. A step that would cross a field bound flips the
    /// direction instead of moving, so the position never leaves
    /// `[0, FIELD_WIDTH - TARGET_WIDTH]`.
    pub fn advance(&mut self) {
        match self.dir {
            Direction::Right => {
                if self.pos.x + self.step + TARGET_WIDTH < FIELD_WIDTH {
                    self.pos.x += self.step;
                } else {
                    self.dir = Direction::Left;
                }
            }
            Direction::Left => {
                if self.pos.x - self.step > 0.0 {
                    self.pos.x -= self.step;
                } else {
                    self.dir = Direction::Right;
                }
            }
        }
    }

    /// Re-enter the field: fresh horizontal offset from one of the discrete
    /// entry columns, hit state cleared.
    pub fn relaunch(&mut self, rng: &mut impl Rng) {
        let column = rng.random_range(0..ENTRY_COLUMNS);
        self.pos.x = column as f32 * ENTRY_COLUMN_SPACING + ENTRY_COLUMN_MARGIN;
        self.hit_state = HitState::Alive;
    }

    /// Record an impact. The explosion sprite shows until the controller's
    /// cooldown clears it.
    pub fn hit(&mut self) {
        self.hit_state = HitState::Exploding;
    }

    /// Cooldown expiry: back to Alive in place.
    pub fn clear_hit(&mut self) {
        self.hit_state = HitState::Alive;
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(TARGET_WIDTH, TARGET_HEIGHT))
    }

    /// Test hook: park the target at an exact horizontal position.
    #[cfg(test)]
    pub(crate) fn place_at(&mut self, x: f32) {
        self.pos.x = x;
    }
}

/// The player's projectile. One per round, reset (not recreated) after every
/// flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pos: Vec2,
    flight: FlightState,
    step: f32,
    rise_step: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new()
    }
}

impl Projectile {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, Self::start_y()),
            flight: FlightState::Grounded,
            step: PROJECTILE_STEP,
            rise_step: PROJECTILE_RISE_STEP,
        }
    }

    fn start_y() -> f32 {
        FIELD_HEIGHT - PROJECTILE_HEIGHT - PROJECTILE_BOTTOM_MARGIN
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn is_in_flight(&self) -> bool {
        self.flight == FlightState::InFlight
    }

    /// Shift left one step, clamped to the field. No-op while in flight.
    pub fn move_left(&mut self) {
        if self.is_in_flight() {
            return;
        }
        if self.pos.x - self.step > 0.0 {
            self.pos.x -= self.step;
        }
    }

    /// Shift right one step, clamped so the box stays inside the field.
    /// No-op while in flight.
    pub fn move_right(&mut self) {
        if self.is_in_flight() {
            return;
        }
        if self.pos.x + PROJECTILE_WIDTH + self.step < FIELD_WIDTH {
            self.pos.x += self.step;
        }
    }

    /// Begin flight. Returns false (and changes nothing) if already flying.
    pub fn launch(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.flight = FlightState::InFlight;
        true
    }

    /// One rise step. Returns true when the top boundary is reached or
    /// passed, i.e. the shot missed and the caller must reset.
    pub fn rise(&mut self) -> bool {
        self.pos.y -= self.rise_step;
        self.pos.y <= 0.0
    }

    /// Back to Grounded at the start position. Idempotent; called on both
    /// miss and confirmed hit.
    pub fn reset(&mut self) {
        self.flight = FlightState::Grounded;
        self.pos.y = Self::start_y();
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_target_lane_is_fixed_at_creation() {
        let mut rng = rng();
        for slot in 1..=MAX_LANES {
            let mut target = Target::new(slot, &mut rng);
            let y = target.pos().y;
            assert_eq!(y, slot as f32 * LANE_HEIGHT - LANE_HEIGHT / 2.0);

            for _ in 0..500 {
                target.advance();
            }
            target.relaunch(&mut rng);
            assert_eq!(target.pos().y, y);
        }
    }

    #[test]
    fn test_target_flips_at_left_bound_without_moving() {
        let mut rng = rng();
        // Fresh targets sit at x=0; a leftward step must flip, not move
        let mut target = Target::new(1, &mut rng);
        while target.direction() == Direction::Right {
            target = Target::new(1, &mut rng);
        }
        let x = target.pos().x;
        target.advance();
        assert_eq!(target.pos().x, x);
        assert_eq!(target.direction(), Direction::Right);
    }

    #[test]
    fn test_target_flips_at_right_bound() {
        let mut target = Target::new(2, &mut rng());
        // Walk right until the flip happens
        while target.direction() == Direction::Left {
            target.advance();
        }
        let mut steps = 0;
        while target.direction() == Direction::Right {
            target.advance();
            steps += 1;
            assert!(steps < 1000, "never reached the right bound");
        }
        assert!(target.pos().x + TARGET_WIDTH <= FIELD_WIDTH);
    }

    proptest! {
        #[test]
        fn prop_target_stays_in_bounds(seed in 0u64..1000, steps in 0usize..2000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut target = Target::new(3, &mut rng);
            target.relaunch(&mut rng);
            for _ in 0..steps {
                target.advance();
                prop_assert!(target.pos().x >= 0.0);
                prop_assert!(target.pos().x <= FIELD_WIDTH - TARGET_WIDTH);
            }
        }

        #[test]
        fn prop_relaunch_offset_in_bounds(seed in 0u64..1000) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut target = Target::new(1, &mut rng);
            target.hit();
            target.relaunch(&mut rng);
            prop_assert!(target.is_alive());
            prop_assert!(target.pos().x >= 0.0);
            prop_assert!(target.pos().x <= FIELD_WIDTH - TARGET_WIDTH);
        }
    }

    #[test]
    fn test_projectile_lateral_movement_clamped() {
        let mut projectile = Projectile::new();
        for _ in 0..1000 {
            projectile.move_left();
        }
        assert!(projectile.pos().x > 0.0);

        for _ in 0..1000 {
            projectile.move_right();
        }
        assert!(projectile.pos().x + PROJECTILE_WIDTH < FIELD_WIDTH);
    }

    #[test]
    fn test_projectile_no_lateral_movement_in_flight() {
        let mut projectile = Projectile::new();
        assert!(projectile.launch());
        let x = projectile.pos().x;
        projectile.move_left();
        projectile.move_right();
        assert_eq!(projectile.pos().x, x);
    }

    #[test]
    fn test_projectile_launch_is_noop_in_flight() {
        let mut projectile = Projectile::new();
        assert!(projectile.launch());
        assert!(!projectile.launch());
    }

    #[test]
    fn test_projectile_rise_reports_top() {
        let mut projectile = Projectile::new();
        projectile.launch();
        let mut ticks = 0;
        while !projectile.rise() {
            ticks += 1;
            assert!(ticks < 10_000, "projectile never reached the top");
        }
        assert!(projectile.pos().y <= 0.0);
    }

    #[test]
    fn test_projectile_reset_is_idempotent() {
        let mut projectile = Projectile::new();
        projectile.launch();
        projectile.rise();
        projectile.reset();
        let after_once = projectile.clone();
        projectile.reset();
        assert_eq!(projectile.pos(), after_once.pos());
        assert_eq!(projectile.is_in_flight(), after_once.is_in_flight());
        assert!(!projectile.is_in_flight());
    }
}
