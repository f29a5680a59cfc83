//! Shared sprite state and behavior
//!
//! Player, Enemy and Projectile each embed a [`Sprite`] and layer their own
//! movement and lifecycle rules on top. The sprite owns the transformed copy
//! of its shape's reference outline and rebuilds it whenever the transform
//! changes, so the working outline always matches the current transform.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::outline_samples_inside;
use super::outline::{Outline, Transform};
use super::projectile::Projectile;
use super::rect::Rect;
use super::shapes::Shape;
use super::weapon::WeaponType;
use crate::consts::{SHIP_LINE_WIDTH, SPREAD_ANGLE};
use crate::facing_rotation;

/// Opaque identity of a sprite, used for self-hit exclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Allocates unique sprite ids for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next);
        self.next += 1;
        id
    }
}

/// Body and line colors (RGB, 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub body: Vec3,
    pub line: Vec3,
    /// Body color follows remaining health (green at full, red at zero)
    pub health_tinted: bool,
}

impl Palette {
    /// White line, health-tinted body
    pub const PLAYER: Palette = Palette::tinted(Vec3::ONE);
    /// Blue line, health-tinted body
    pub const ENEMY: Palette = Palette::tinted(Vec3::new(0.0, 0.0, 1.0));
    pub const PROJECTILE: Palette = Palette::fixed(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));

    pub const fn tinted(line: Vec3) -> Self {
        Self {
            body: Vec3::new(0.0, 1.0, 0.0),
            line,
            health_tinted: true,
        }
    }

    pub const fn fixed(body: Vec3, line: Vec3) -> Self {
        Self {
            body,
            line,
            health_tinted: false,
        }
    }
}

/// State shared by every sprite kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    pub id: SpriteId,
    pub shape: Shape,
    transform: Transform,
    /// The reference outline under the current transform
    outline: Outline,
    pub health: i32,
    pub max_health: i32,
    /// Damage dealt to whatever this sprite runs into
    pub collision_damage: i32,
    /// Movement speed (units per ms)
    pub speed: f32,
    pub weapon: WeaponType,
    /// Time left before the next shot (ms); fires once this reaches zero
    pub fire_cooldown: f32,
    /// Value the cooldown resets to after a shot
    pub fire_cooldown_reset: f32,
    /// Scales how fast the cooldown runs down
    pub fire_rate: f32,
    pub is_firing: bool,
    pub line_width: f32,
    pub palette: Palette,
}

impl Sprite {
    pub fn new(id: SpriteId, shape: Shape, position: Vec2, health: i32, palette: Palette) -> Self {
        let weapon = WeaponType::default();
        let transform = Transform::at(position);
        let mut sprite = Self {
            id,
            shape,
            transform,
            outline: shape.outline().transformed(&transform),
            health,
            max_health: health,
            collision_damage: 0,
            speed: 0.0,
            weapon,
            fire_cooldown: 0.0,
            fire_cooldown_reset: weapon.cooldown_ms(),
            fire_rate: 0.0,
            is_firing: false,
            line_width: SHIP_LINE_WIDTH,
            palette,
        };
        sprite.update_color();
        sprite
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// The outline in arena coordinates
    #[inline]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Replace the transform and rebuild the working outline
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh_outline();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.transform.rotation = crate::normalize_angle(rotation);
        self.refresh_outline();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.transform.scale = scale;
        self.refresh_outline();
    }

    fn refresh_outline(&mut self) {
        self.shape
            .outline()
            .transform_into(&self.transform, &mut self.outline);
    }

    /// Extent of the outline around the sprite's center at the current
    /// rotation and scale
    pub fn local_bounds(&self) -> Rect {
        self.outline.bounds().offset(-self.transform.position)
    }

    /// Run the fire cooldown down by `delta_ms` scaled by the fire rate
    pub fn update(&mut self, delta_ms: f32) {
        self.fire_cooldown -= delta_ms * self.fire_rate;
    }

    /// Translate without any bounds checks
    pub fn translate(&mut self, delta: Vec2) {
        self.transform.position += delta;
        self.refresh_outline();
    }

    /// Move to `position` without any bounds checks
    pub fn relocate(&mut self, position: Vec2) -> bool {
        self.transform.position = position;
        self.refresh_outline();
        true
    }

    /// Turn so the sprite's forward ("up") axis points at `target`
    pub fn rotate_to_facing(&mut self, target: Vec2) {
        self.transform.rotation = facing_rotation(self.transform.position, target);
        self.refresh_outline();
    }

    /// Change weapon; the next cooldown reset uses the new weapon's value
    pub fn switch_weapon(&mut self, weapon: WeaponType) {
        self.weapon = weapon;
        self.fire_cooldown_reset = weapon.cooldown_ms();
    }

    /// Whether a shot is allowed right now (no side effects)
    pub fn can_fire(&self) -> bool {
        self.is_firing && self.fire_cooldown <= 0.0
    }

    /// Start a new cooldown period
    pub fn consume_cooldown(&mut self) {
        self.fire_cooldown = self.fire_cooldown_reset;
    }

    /// Check-and-fire: true if the sprite fires this tick, in which case the
    /// cooldown has already been reset. Call at most once per tick.
    pub fn should_fire(&mut self) -> bool {
        if self.can_fire() {
            self.consume_cooldown();
            true
        } else {
            false
        }
    }

    /// Projectiles for one shot of the current weapon, fired from the
    /// sprite's center along its facing. Cooldown is not checked here.
    pub fn fire_projectiles(&self, ids: &mut EntityIds) -> Vec<Projectile> {
        let pos = self.position();
        let rot = self.rotation();
        match self.weapon {
            WeaponType::Rapid | WeaponType::Laser => {
                vec![Projectile::new(ids.next_id(), self.weapon, pos, rot, self.id)]
            }
            WeaponType::Spread => [rot - SPREAD_ANGLE, rot, rot + SPREAD_ANGLE]
                .into_iter()
                .map(|r| Projectile::new(ids.next_id(), WeaponType::Spread, pos, r, self.id))
                .collect(),
        }
    }

    /// Take contact damage from `other`
    pub fn hit_by(&mut self, other: &Sprite) {
        self.health -= other.collision_damage;
        self.update_color();
    }

    /// Set health to zero
    pub fn destroy(&mut self) {
        self.health = 0;
        self.update_color();
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Point-sampling collision: any of this outline's points inside `other`
    pub fn check_collision(&self, other: &Sprite) -> bool {
        outline_samples_inside(&self.outline, &other.outline)
    }

    /// Remaining health as a fraction of max, clamped to [0, 1]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    fn update_color(&mut self) {
        if self.palette.health_tinted {
            let m = self.health_fraction();
            self.palette.body = Vec3::new(1.0 - m, m, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn ship(health: i32) -> Sprite {
        let mut ids = EntityIds::default();
        Sprite::new(
            ids.next_id(),
            Shape::Player,
            Vec2::new(100.0, 100.0),
            health,
            Palette::PLAYER,
        )
    }

    #[test]
    fn test_ids_unique() {
        let mut ids = EntityIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hit_by_subtracts_damage() {
        let mut target = ship(100);
        let mut attacker = ship(10);
        attacker.collision_damage = 35;
        target.hit_by(&attacker);
        assert_eq!(target.health, 65);
        target.hit_by(&attacker);
        target.hit_by(&attacker);
        assert_eq!(target.health, -5);
        assert!(!target.is_alive());
    }

    #[test]
    fn test_destroy_sets_zero() {
        let mut s = ship(100);
        s.destroy();
        assert_eq!(s.health, 0);
        assert!(!s.is_alive());
        assert_eq!(s.palette.body, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_health_tint() {
        let mut s = ship(100);
        assert_eq!(s.palette.body, Vec3::new(0.0, 1.0, 0.0));
        let mut attacker = ship(1);
        attacker.collision_damage = 25;
        s.hit_by(&attacker);
        assert!((s.palette.body - Vec3::new(0.25, 0.75, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_should_fire_gating() {
        let mut s = ship(100);
        s.fire_rate = 1.0;
        assert!(!s.should_fire(), "not firing yet");
        s.is_firing = true;
        assert!(s.should_fire());
        assert_eq!(s.fire_cooldown, WeaponType::Rapid.cooldown_ms());
        assert!(!s.should_fire(), "cooldown just reset");
        s.update(79.0);
        assert!(!s.should_fire());
        s.update(1.0);
        assert!(s.should_fire());
    }

    #[test]
    fn test_can_fire_has_no_side_effects() {
        let mut s = ship(100);
        s.is_firing = true;
        assert!(s.can_fire());
        assert!(s.can_fire());
        assert_eq!(s.fire_cooldown, 0.0);
    }

    #[test]
    fn test_zero_fire_rate_never_cools() {
        let mut s = ship(100);
        s.is_firing = true;
        s.consume_cooldown();
        s.update(10_000.0);
        assert!(!s.should_fire());
    }

    #[test]
    fn test_switch_weapon_changes_reset() {
        let mut s = ship(100);
        s.is_firing = true;
        s.switch_weapon(WeaponType::Laser);
        assert!(s.should_fire());
        assert_eq!(s.fire_cooldown, 800.0);
    }

    #[test]
    fn test_spread_fan() {
        let mut s = ship(100);
        s.set_rotation(1.0);
        s.switch_weapon(WeaponType::Spread);
        let mut ids = EntityIds::default();
        let shots = s.fire_projectiles(&mut ids);
        assert_eq!(shots.len(), 3);
        let rots: Vec<f32> = shots.iter().map(|p| p.sprite.rotation()).collect();
        for (got, want) in rots.iter().zip([1.0 - SPREAD_ANGLE, 1.0, 1.0 + SPREAD_ANGLE]) {
            assert!((got - want).abs() < 1e-5);
        }
        assert!(shots.iter().all(|p| p.creator == s.id));
    }

    #[test]
    fn test_rapid_and_laser_single_shot() {
        let mut s = ship(100);
        let mut ids = EntityIds::default();
        assert_eq!(s.fire_projectiles(&mut ids).len(), 1);
        s.switch_weapon(WeaponType::Laser);
        let shots = s.fire_projectiles(&mut ids);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].weapon, WeaponType::Laser);
    }

    #[test]
    fn test_outline_follows_transform() {
        let mut s = ship(100);
        let before = s.outline().bounds();
        s.translate(Vec2::new(10.0, -5.0));
        let after = s.outline().bounds();
        assert!((after.min - before.min - Vec2::new(10.0, -5.0)).length() < 1e-4);
        s.rotate_to_facing(Vec2::new(200.0, 100.0));
        assert!(s.rotation() >= 0.0 && s.rotation() < TAU);
        assert_eq!(
            s.outline(),
            &Shape::Player.outline().transformed(s.transform())
        );
    }
}
