//! Weapon types and their fixed characteristics

use serde::{Deserialize, Serialize};

/// The weapons a sprite can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponType {
    /// Single fast shot along the facing direction
    #[default]
    Rapid,
    /// Three-way fan
    Spread,
    /// Stationary beam that widens, then expires
    Laser,
}

impl WeaponType {
    pub const ALL: [WeaponType; 3] = [WeaponType::Rapid, WeaponType::Spread, WeaponType::Laser];

    /// Damage dealt by one projectile of this weapon
    pub const fn damage(self) -> i32 {
        match self {
            WeaponType::Rapid => 20,
            WeaponType::Spread => 25,
            WeaponType::Laser => 6,
        }
    }

    /// Minimum time between shots (ms)
    pub const fn cooldown_ms(self) -> f32 {
        match self {
            WeaponType::Rapid => 80.0,
            WeaponType::Spread => 220.0,
            WeaponType::Laser => 800.0,
        }
    }

    /// Projectile travel speed (units per ms)
    pub const fn speed(self) -> f32 {
        match self {
            WeaponType::Rapid => 1.5,
            WeaponType::Spread => 1.0,
            WeaponType::Laser => 0.0,
        }
    }

    /// Whether a hit consumes the projectile
    pub const fn removes_on_collision(self) -> bool {
        !matches!(self, WeaponType::Laser)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Rapid => "Rapid",
            WeaponType::Spread => "Spread",
            WeaponType::Laser => "Laser",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rapid" | "1" => Some(WeaponType::Rapid),
            "spread" | "2" => Some(WeaponType::Spread),
            "laser" | "3" => Some(WeaponType::Laser),
            _ => None,
        }
    }
}
