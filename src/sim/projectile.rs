//! Projectiles fired by the player and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::segment_hits_outline;
use super::outline::Transform;
use super::shapes::Shape;
use super::sprite::{Palette, Sprite, SpriteId};
use super::weapon::WeaponType;
use crate::consts::{LASER_GROWTH_RATE, LASER_MAX_WIDTH, LASER_START_WIDTH};
use crate::{forward, normalize_angle};

/// A shot in flight (or, for lasers, a beam on screen)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub sprite: Sprite,
    pub weapon: WeaponType,
    /// The sprite that fired this projectile. Identity only, never owned.
    pub creator: SpriteId,
    /// Per-ms movement
    pub velocity: Vec2,
}

impl Projectile {
    pub fn new(
        id: SpriteId,
        weapon: WeaponType,
        position: Vec2,
        rotation: f32,
        creator: SpriteId,
    ) -> Self {
        let mut sprite = Sprite::new(id, Shape::for_weapon(weapon), position, 1, Palette::PROJECTILE);
        sprite.collision_damage = weapon.damage();
        sprite.speed = weapon.speed();
        sprite.weapon = weapon;
        let rotation = normalize_angle(rotation);
        sprite.set_transform(Transform {
            position,
            rotation,
            scale: 1.0,
        });
        if weapon == WeaponType::Laser {
            sprite.line_width = LASER_START_WIDTH;
        }
        Self {
            sprite,
            weapon,
            creator,
            velocity: forward(rotation) * weapon.speed(),
        }
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.sprite.update(delta_ms);
        match self.weapon {
            WeaponType::Rapid | WeaponType::Spread => {
                self.sprite.translate(self.velocity * delta_ms);
            }
            WeaponType::Laser => self.grow_beam(delta_ms),
        }
    }

    // Beams stay put and widen until they reach full width, then expire
    fn grow_beam(&mut self, delta_ms: f32) {
        let width = (self.sprite.line_width + delta_ms * LASER_GROWTH_RATE).min(LASER_MAX_WIDTH);
        self.sprite.line_width = width;
        if width >= LASER_MAX_WIDTH {
            self.sprite.destroy();
        }
    }

    /// True if `sprite` fired this projectile
    pub fn is_creator(&self, sprite: &Sprite) -> bool {
        sprite.id == self.creator
    }

    /// Whether a hit consumes this projectile
    pub fn removes_on_collision(&self) -> bool {
        self.weapon.removes_on_collision()
    }

    /// Beam endpoints in arena space (origin, far end)
    pub fn beam(&self) -> (Vec2, Vec2) {
        let start = self.sprite.position();
        let end = self.sprite.outline().end_point().unwrap_or(start);
        (start, end)
    }

    /// Lasers test their beam segment against the target's edges; other
    /// projectiles use point sampling
    pub fn check_collision(&self, target: &Sprite) -> bool {
        match self.weapon {
            WeaponType::Laser => {
                let (start, end) = self.beam();
                segment_hits_outline(start, end, target.outline())
            }
            WeaponType::Rapid | WeaponType::Spread => self.sprite.check_collision(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LASER_LENGTH;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use std::f32::consts::FRAC_PI_2;

    fn enemy_at(pos: Vec2) -> Enemy {
        Enemy::new(SpriteId(50), EnemyKind::Type1, pos)
    }

    #[test]
    fn test_rapid_moves_along_facing() {
        let mut p = Projectile::new(SpriteId(1), WeaponType::Rapid, Vec2::ZERO, FRAC_PI_2, SpriteId(9));
        p.update(10.0);
        assert!((p.sprite.position() - Vec2::new(15.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_spread_speed() {
        let mut p = Projectile::new(SpriteId(1), WeaponType::Spread, Vec2::ZERO, 0.0, SpriteId(9));
        p.update(10.0);
        assert!((p.sprite.position() - Vec2::new(0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_laser_grows_then_expires() {
        let mut p = Projectile::new(SpriteId(1), WeaponType::Laser, Vec2::new(10.0, 10.0), 0.0, SpriteId(9));
        assert_eq!(p.sprite.line_width, LASER_START_WIDTH);
        p.update(100.0);
        assert!(p.sprite.is_alive());
        assert_eq!(p.sprite.position(), Vec2::new(10.0, 10.0));
        assert!((p.sprite.line_width - (LASER_START_WIDTH + 2.0)).abs() < 1e-4);
        p.update(10_000.0);
        assert_eq!(p.sprite.line_width, LASER_MAX_WIDTH);
        assert!(!p.sprite.is_alive());
    }

    #[test]
    fn test_removes_on_collision() {
        for (w, removes) in [
            (WeaponType::Rapid, true),
            (WeaponType::Spread, true),
            (WeaponType::Laser, false),
        ] {
            let p = Projectile::new(SpriteId(1), w, Vec2::ZERO, 0.0, SpriteId(9));
            assert_eq!(p.removes_on_collision(), removes);
            assert_eq!(p.sprite.collision_damage, w.damage());
        }
    }

    #[test]
    fn test_is_creator() {
        let enemy = enemy_at(Vec2::ZERO);
        let mine = Projectile::new(SpriteId(1), WeaponType::Rapid, Vec2::ZERO, 0.0, enemy.sprite.id);
        let theirs = Projectile::new(SpriteId(2), WeaponType::Rapid, Vec2::ZERO, 0.0, SpriteId(3));
        assert!(mine.is_creator(&enemy.sprite));
        assert!(!theirs.is_creator(&enemy.sprite));
    }

    #[test]
    fn test_rapid_hit_by_sampling() {
        let enemy = enemy_at(Vec2::new(500.0, 300.0));
        let on_target = Projectile::new(SpriteId(1), WeaponType::Rapid, Vec2::new(500.0, 300.0), 0.0, SpriteId(9));
        let off_target = Projectile::new(SpriteId(2), WeaponType::Rapid, Vec2::new(400.0, 300.0), 0.0, SpriteId(9));
        assert!(on_target.check_collision(&enemy.sprite));
        assert!(!off_target.check_collision(&enemy.sprite));
    }

    #[test]
    fn test_laser_beam_geometry() {
        let p = Projectile::new(SpriteId(1), WeaponType::Laser, Vec2::new(100.0, 300.0), FRAC_PI_2, SpriteId(9));
        let (start, end) = p.beam();
        assert_eq!(start, Vec2::new(100.0, 300.0));
        assert!((end - Vec2::new(100.0 + LASER_LENGTH, 300.0)).length() < 1e-2);
    }

    #[test]
    fn test_laser_hits_along_beam() {
        let p = Projectile::new(SpriteId(1), WeaponType::Laser, Vec2::new(100.0, 300.0), FRAC_PI_2, SpriteId(9));
        // Far along the beam, not near the origin
        assert!(p.check_collision(&enemy_at(Vec2::new(1500.0, 300.0)).sprite));
        // Off to the side
        assert!(!p.check_collision(&enemy_at(Vec2::new(1500.0, 400.0)).sprite));
        // Behind the origin
        assert!(!p.check_collision(&enemy_at(Vec2::new(20.0, 300.0)).sprite));
    }
}
