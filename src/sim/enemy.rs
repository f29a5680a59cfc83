//! Enemy ships: archetype stats, drift, autonomous fire and the death-spiral

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::shapes::Shape;
use super::sprite::{Palette, Sprite, SpriteId};
use crate::consts::{DEATH_SPIN_RATE, DEATH_SPIRAL_MS};
use crate::forward;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Type1,
    Type2,
}

/// Fixed per-archetype stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    pub collision_damage: i32,
    /// Drift speed (units per ms)
    pub speed: f32,
    pub bounty: u64,
    /// Cooldown rate; zero means the archetype never fires
    pub fire_rate: f32,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Type1 => EnemyStats {
                health: 50,
                collision_damage: 50,
                speed: 0.2,
                bounty: 125,
                fire_rate: 0.0,
            },
            EnemyKind::Type2 => EnemyStats {
                health: 120,
                collision_damage: 80,
                speed: 0.1,
                bounty: 315,
                fire_rate: 0.07,
            },
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            EnemyKind::Type1 => Shape::EnemyType1,
            EnemyKind::Type2 => Shape::EnemyType2,
        }
    }

    /// Weighted draw: `type1_weight` out of 10 picks Type1
    pub fn random<R: Rng + ?Sized>(rng: &mut R, type1_weight: u32) -> Self {
        if rng.random_range(0..10) < type1_weight {
            EnemyKind::Type1
        } else {
            EnemyKind::Type2
        }
    }
}

/// A live (or dying) enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub sprite: Sprite,
    pub kind: EnemyKind,
    pub bounty: u64,
    /// Time since health reached zero (ms)
    pub death_spiral_ms: f32,
    /// Per-ms movement, derived from the rotation
    pub drift: Vec2,
}

impl Enemy {
    pub fn new(id: SpriteId, kind: EnemyKind, position: Vec2) -> Self {
        let stats = kind.stats();
        let mut sprite = Sprite::new(id, kind.shape(), position, stats.health, Palette::ENEMY);
        sprite.collision_damage = stats.collision_damage;
        sprite.speed = stats.speed;
        sprite.fire_rate = stats.fire_rate;
        sprite.is_firing = stats.fire_rate > 0.0;
        let drift = forward(sprite.rotation()) * stats.speed;
        Self {
            sprite,
            kind,
            bounty: stats.bounty,
            death_spiral_ms: 0.0,
            drift,
        }
    }

    /// Place a new enemy just past the arena's right edge at a random height,
    /// facing `target`
    pub fn spawn<R: Rng + ?Sized>(
        id: SpriteId,
        kind: EnemyKind,
        arena: &Rect,
        target: Vec2,
        rng: &mut R,
    ) -> Self {
        let mut enemy = Self::new(id, kind, Vec2::ZERO);
        let half_width = kind.shape().outline().bounds().width() / 2.0;
        let y = arena.min.y + rng.random_range(0.0..=arena.height());
        enemy.sprite.relocate(Vec2::new(arena.max.x + half_width, y));
        enemy.rotate_to_facing(target);
        enemy
    }

    /// Face `target` and head toward it
    pub fn rotate_to_facing(&mut self, target: Vec2) {
        self.sprite.rotate_to_facing(target);
        self.drift = forward(self.sprite.rotation()) * self.sprite.speed;
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.sprite.update(delta_ms);

        if !self.sprite.is_alive() {
            self.death_spiral_ms += delta_ms;
            let rotation = self.sprite.rotation() + delta_ms * DEATH_SPIN_RATE;
            self.sprite.set_rotation(rotation);
            let scale = (1.0 - self.death_spiral_ms / DEATH_SPIRAL_MS).max(0.0);
            self.sprite.set_scale(scale);
        }

        self.sprite.translate(self.drift * delta_ms);
    }

    /// Death animation finished; ready to be removed and scored
    pub fn requires_removal(&self) -> bool {
        !self.sprite.is_alive() && self.death_spiral_ms >= DEATH_SPIRAL_MS
    }

    /// Drifted off the arena's left edge
    pub fn escaped(&self, arena: &Rect) -> bool {
        self.sprite.position().x < arena.min.x
    }
}
