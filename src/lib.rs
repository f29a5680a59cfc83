//! Arena Shooter - a real-time single-player arcade shooter core
//!
//! Core modules:
//! - `sim`: Simulation (sprites, collisions, frame loop, session state)
//! - `renderer`: Render feed and vertex generation for the drawing layer
//! - `highscores`: Fixed-capacity high score table
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScoreEntry, HighScores};
pub use tuning::Tuning;

use std::f32::consts::TAU;

/// Game configuration constants
pub mod consts {
    /// Play screen cadence (~60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Menu screen cadence (~30 Hz)
    pub const MENU_FRAME_MS: f32 = 1000.0 / 30.0;

    /// Reference window size the arena layout is based on
    pub const WINDOW_WIDTH: f32 = 1920.0;
    pub const WINDOW_HEIGHT: f32 = 1200.0;
    /// Top menu bar takes this fraction of the window height
    pub const MENU_BAR_FRACTION: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_HEALTH: i32 = 300;
    pub const PLAYER_SPEED: f32 = 0.2; // units per ms
    pub const PLAYER_FIRE_RATE: f32 = 1.0;

    /// Spawning
    pub const SPAWN_INTERVAL_MS: f32 = 500.0;
    /// Out of 10 draws, this many produce a Type1 enemy
    pub const TYPE1_SPAWN_WEIGHT: u32 = 7;

    /// Enemy death animation
    pub const DEATH_SPIRAL_MS: f32 = 1000.0;
    pub const DEATH_SPIN_RATE: f32 = 0.015; // radians per ms

    /// Laser beam growth
    pub const LASER_START_WIDTH: f32 = 0.01;
    pub const LASER_GROWTH_RATE: f32 = 0.02; // width per ms
    pub const LASER_MAX_WIDTH: f32 = 12.0;
    /// Length of the beam in local coordinates
    pub const LASER_LENGTH: f32 = 4096.0;

    /// Stroke width of ship outlines
    pub const SHIP_LINE_WIDTH: f32 = 5.0;

    /// Spread fan half-angle (radians)
    pub const SPREAD_ANGLE: f32 = std::f32::consts::PI * 0.08;

    /// High score table
    pub const HIGH_SCORE_CAPACITY: usize = 15;
    pub const MAX_NAME_LEN: usize = 32;
    pub const DEFAULT_NAME: &str = "Your Name Here";
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Rotation that points a sprite's local "up" axis from `from` toward `to`
#[inline]
pub fn facing_rotation(from: glam::Vec2, to: glam::Vec2) -> f32 {
    let d = to - from;
    normalize_angle(d.y.atan2(d.x) + std::f32::consts::FRAC_PI_2)
}

/// Unit vector along a sprite's local "up" axis for a given rotation
#[inline]
pub fn forward(rotation: f32) -> glam::Vec2 {
    glam::Vec2::new(rotation.sin(), -rotation.cos())
}
