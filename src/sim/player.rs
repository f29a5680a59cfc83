//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::shapes::Shape;
use super::sprite::{Palette, Sprite, SpriteId};
use crate::consts::PLAYER_FIRE_RATE;

/// The player's ship: a sprite that must stay inside the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub sprite: Sprite,
}

impl Player {
    pub fn new(id: SpriteId, position: Vec2, health: i32, speed: f32) -> Self {
        let mut sprite = Sprite::new(id, Shape::Player, position, health, Palette::PLAYER);
        sprite.speed = speed;
        sprite.fire_rate = PLAYER_FIRE_RATE;
        Self { sprite }
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.sprite.update(delta_ms);
    }

    /// Translate, then pull the ship back inside the arena if any part of
    /// its outline left it. Returns false if a clamp was applied.
    pub fn move_by(&mut self, delta: Vec2, arena: &Rect) -> bool {
        self.sprite.translate(delta);
        self.clamp_into(arena)
    }

    /// Jump to `position`. If the ship would not fit there it is clamped into
    /// the arena and false is returned (used to end a pointer drag).
    pub fn relocate(&mut self, position: Vec2, arena: &Rect) -> bool {
        self.sprite.relocate(position);
        self.clamp_into(arena)
    }

    /// True if `point` lies inside the ship's outline
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.sprite.outline().contains(point)
    }

    fn clamp_into(&mut self, arena: &Rect) -> bool {
        let extent = self.sprite.local_bounds();
        let pos = self.sprite.position();
        let lo = arena.min - extent.min;
        let hi = arena.max - extent.max;
        let clamped = Vec2::new(clamp_axis(pos.x, lo.x, hi.x), clamp_axis(pos.y, lo.y, hi.y));
        if clamped == pos {
            return true;
        }
        self.sprite.relocate(clamped);
        false
    }
}

/// Clamp that centers the value when the range is inverted (ship larger
/// than the arena) instead of panicking
fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        v.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn arena() -> Rect {
        Rect::new(Vec2::new(0.0, 120.0), Vec2::new(1920.0, 1080.0))
    }

    fn player_at(pos: Vec2) -> Player {
        Player::new(SpriteId(1), pos, 300, 0.2)
    }

    fn inside(outer: &Rect, inner: &Rect) -> bool {
        inner.min.x >= outer.min.x - EPS
            && inner.min.y >= outer.min.y - EPS
            && inner.max.x <= outer.max.x + EPS
            && inner.max.y <= outer.max.y + EPS
    }

    #[test]
    fn test_free_move() {
        let mut p = player_at(Vec2::new(500.0, 600.0));
        assert!(p.move_by(Vec2::new(10.0, -20.0), &arena()));
        assert_eq!(p.sprite.position(), Vec2::new(510.0, 580.0));
    }

    #[test]
    fn test_move_clamps_at_right_edge() {
        let a = arena();
        let mut p = player_at(Vec2::new(1880.0, 600.0));
        assert!(!p.move_by(Vec2::new(100.0, 0.0), &a));
        // Outline spans ±25 in x when unrotated
        assert!((p.sprite.position().x - 1895.0).abs() < EPS);
        assert!(inside(&a, &p.sprite.outline().bounds()));
    }

    #[test]
    fn test_move_clamps_at_top_edge() {
        let a = arena();
        let mut p = player_at(Vec2::new(500.0, 200.0));
        assert!(!p.move_by(Vec2::new(0.0, -500.0), &a));
        // Nose control points reach 40 units above center
        assert!((p.sprite.position().y - 160.0).abs() < EPS);
    }

    #[test]
    fn test_relocate_outside_returns_false() {
        let a = arena();
        let mut p = player_at(a.center());
        let target = Vec2::new(a.max.x + 10.0, a.center().y);
        assert!(!p.relocate(target, &a));
        assert!(p.sprite.position().x < a.max.x);
        assert!(inside(&a, &p.sprite.outline().bounds()));
    }

    #[test]
    fn test_relocate_inside_returns_true() {
        let a = arena();
        let mut p = player_at(a.center());
        assert!(p.relocate(Vec2::new(300.0, 400.0), &a));
        assert_eq!(p.sprite.position(), Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_contains_point() {
        let p = player_at(Vec2::new(500.0, 600.0));
        assert!(p.contains_point(Vec2::new(500.0, 600.0)));
        assert!(!p.contains_point(Vec2::new(560.0, 600.0)));
    }

    proptest! {
        #[test]
        fn prop_move_stays_in_arena(
            x in 30.0f32..1890.0,
            y in 170.0f32..1170.0,
            dx in -3000.0f32..3000.0,
            dy in -3000.0f32..3000.0,
            target_x in -500.0f32..2500.0,
            target_y in -500.0f32..2000.0,
        ) {
            let a = arena();
            let mut p = player_at(Vec2::new(x, y));
            p.sprite.rotate_to_facing(Vec2::new(target_x, target_y));
            p.move_by(Vec2::new(dx, dy), &a);
            prop_assert!(inside(&a, &p.sprite.outline().bounds()));
        }
    }
}
