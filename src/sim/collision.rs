//! Collision detection for the shooting field
//!
//! Everything here is axis-aligned: the projectile and every target are
//! upright rectangles, so a hit test is a strict overlap check on both axes.
//! The detector is pure; the round controller decides when to run it and
//! what a confirmed hit mutates.

use glam::Vec2;

use super::state::{Projectile, Target};

/// An axis-aligned rectangle, positioned by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict overlap on both axes. Boxes that merely share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x + self.size.x > other.pos.x
            && self.pos.x < other.pos.x + other.size.x
            && self.pos.y + self.size.y > other.pos.y
            && self.pos.y < other.pos.y + other.size.y
    }
}

/// True iff the target is Alive and the two bounding boxes overlap.
/// Exploding targets never report a collision, which is what guards a single
/// impact from scoring twice.
pub fn projectile_hits_target(projectile: &Projectile, target: &Target) -> bool {
    target.is_alive() && projectile.hitbox().overlaps(&target.hitbox())
}
