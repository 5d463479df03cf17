//! Drawing-surface boundary
//!
//! The core never draws directly: a backend hands in a `DrawSurface` and the
//! round is walked once per render tick. No backend ships with this crate;
//! anything that can place a sprite in a 2D field qualifies.

use crate::consts::*;
use crate::sim::{HitState, Projectile, Round, Target};

/// Sprites the core knows how to place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Target,
    Explosion,
    Projectile,
}

/// A 2D drawing capability supplied by the embedding backend.
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_sprite(&mut self, kind: SpriteKind, x: f32, y: f32, w: f32, h: f32);
}

/// Draw one frame of the round: clear, then the projectile, then every
/// target.
pub fn draw_round(round: &Round, surface: &mut dyn DrawSurface) {
    surface.clear();
    draw_projectile(round.projectile(), surface);
    for target in round.targets() {
        draw_target(target, surface);
    }
}

pub fn draw_target(target: &Target, surface: &mut dyn DrawSurface) {
    let kind = match target.hit_state() {
        HitState::Alive => SpriteKind::Target,
        HitState::Exploding => SpriteKind::Explosion,
    };
    let pos = target.pos();
    surface.draw_sprite(kind, pos.x, pos.y, TARGET_WIDTH, TARGET_HEIGHT);
}

pub fn draw_projectile(projectile: &Projectile, surface: &mut dyn DrawSurface) {
    let pos = projectile.pos();
    surface.draw_sprite(
        SpriteKind::Projectile,
        pos.x,
        pos.y,
        PROJECTILE_WIDTH,
        PROJECTILE_HEIGHT,
    );
}
