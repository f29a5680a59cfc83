//! Reference outlines for every sprite shape
//!
//! Each shape is built once and shared read-only by all sprites that use it.
//! Sprites only own their transformed working copy.

use std::sync::LazyLock;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::outline::Outline;
use super::weapon::WeaponType;
use crate::consts::LASER_LENGTH;

/// Every distinct outline in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Player,
    EnemyType1,
    EnemyType2,
    Rapid,
    Spread,
    Laser,
}

static PLAYER: LazyLock<Outline> = LazyLock::new(|| {
    Outline::new()
        .move_to(25.0, -6.0)
        .line_to(25.0, 6.0)
        .line_to(10.0, 6.0)
        .curve_to(3.0, 20.0, -3.0, 20.0, -10.0, 6.0)
        .line_to(-25.0, 6.0)
        .line_to(-25.0, -6.0)
        .line_to(-10.0, -10.0)
        .curve_to(-5.0, -40.0, 5.0, -40.0, 10.0, -10.0)
        .line_to(25.0, -6.0)
});

static ENEMY_TYPE1: LazyLock<Outline> = LazyLock::new(|| {
    Outline::new()
        .move_to(5.0, -30.0)
        .line_to(10.0, -10.0)
        .line_to(25.0, -6.0)
        .line_to(25.0, 6.0)
        .line_to(10.0, 6.0)
        .line_to(5.0, 12.0)
        .line_to(-5.0, 12.0)
        .line_to(-10.0, 6.0)
        .line_to(-25.0, 6.0)
        .line_to(-25.0, -6.0)
        .line_to(-10.0, -10.0)
        .line_to(-5.0, -30.0)
        .line_to(5.0, -30.0)
});

static ENEMY_TYPE2: LazyLock<Outline> = LazyLock::new(|| {
    Outline::new()
        .move_to(0.0, -25.0)
        .line_to(6.0, -20.0)
        .line_to(3.0, -15.0)
        .line_to(3.0, -3.0)
        .line_to(15.0, -3.0)
        .line_to(20.0, -30.0)
        .curve_to(25.0, -10.0, 25.0, 10.0, 20.0, 20.0)
        .line_to(15.0, 20.0)
        .line_to(15.0, 5.0)
        .line_to(-15.0, 5.0)
        .line_to(-15.0, 20.0)
        .line_to(-20.0, 20.0)
        .curve_to(-25.0, 10.0, -25.0, -10.0, -20.0, -30.0)
        .line_to(-15.0, -3.0)
        .line_to(-3.0, -3.0)
        .line_to(-3.0, -15.0)
        .line_to(-6.0, -20.0)
        .line_to(0.0, -25.0)
});

// Two parallel strokes
static RAPID: LazyLock<Outline> = LazyLock::new(|| {
    Outline::new()
        .move_to(5.0, -5.0)
        .line_to(5.0, 5.0)
        .move_to(-5.0, 5.0)
        .line_to(-5.0, -5.0)
});

static SPREAD: LazyLock<Outline> = LazyLock::new(|| {
    Outline::new()
        .move_to(2.0, -2.0)
        .line_to(2.0, 2.0)
        .line_to(-2.0, 2.0)
        .line_to(-2.0, -2.0)
        .line_to(2.0, -2.0)
});

// The beam runs from the origin far past any arena edge
static LASER: LazyLock<Outline> =
    LazyLock::new(|| Outline::new().move_to(0.0, 0.0).line_to(0.0, -LASER_LENGTH));

impl Shape {
    /// The shared reference outline for this shape
    pub fn outline(self) -> &'static Outline {
        match self {
            Shape::Player => &PLAYER,
            Shape::EnemyType1 => &ENEMY_TYPE1,
            Shape::EnemyType2 => &ENEMY_TYPE2,
            Shape::Rapid => &RAPID,
            Shape::Spread => &SPREAD,
            Shape::Laser => &LASER,
        }
    }

    /// Projectile shape for a weapon
    pub fn for_weapon(weapon: WeaponType) -> Self {
        match weapon {
            WeaponType::Rapid => Shape::Rapid,
            WeaponType::Spread => Shape::Spread,
            WeaponType::Laser => Shape::Laser,
        }
    }

    /// Local position of the engine exhaust, for ship shapes
    pub fn engine_anchor(self) -> Option<Vec2> {
        match self {
            Shape::Player => Some(Vec2::new(0.0, 18.0)),
            Shape::EnemyType1 => Some(Vec2::new(0.0, 12.0)),
            Shape::EnemyType2 => Some(Vec2::new(0.0, 5.0)),
            Shape::Rapid | Shape::Spread | Shape::Laser => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlines_are_shared() {
        let a = Shape::EnemyType1.outline() as *const Outline;
        let b = Shape::EnemyType1.outline() as *const Outline;
        assert_eq!(a, b);
    }

    #[test]
    fn test_ship_outlines_closed() {
        for shape in [Shape::Player, Shape::EnemyType1, Shape::EnemyType2, Shape::Spread] {
            let o = shape.outline();
            let first = o.sample_points().next();
            assert_eq!(first, o.end_point(), "{shape:?} should end where it starts");
        }
    }

    #[test]
    fn test_enemy_widths() {
        assert_eq!(Shape::EnemyType1.outline().bounds().width(), 50.0);
        assert_eq!(Shape::EnemyType2.outline().bounds().width(), 50.0);
    }

    #[test]
    fn test_laser_end_point() {
        assert_eq!(
            Shape::Laser.outline().end_point(),
            Some(Vec2::new(0.0, -LASER_LENGTH))
        );
    }
}
