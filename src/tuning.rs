//! Session tuning
//!
//! Everything a session reads at startup that is not a per-weapon or
//! per-enemy constant. Loaded from JSON; missing fields take their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::rect::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Top-left of the play area; the menu bar sits above it
    pub arena_origin: Vec2,
    pub arena_size: Vec2,
    pub player_start: Vec2,
    pub player_health: i32,
    /// Units per ms
    pub player_speed: f32,
    pub spawn_interval_ms: f32,
    /// Out of 10; the rest are Type2
    pub type1_spawn_weight: u32,
    pub high_score_capacity: usize,
    pub max_name_len: usize,
    pub default_name: String,
}

impl Default for Tuning {
    fn default() -> Self {
        let bar = WINDOW_HEIGHT * MENU_BAR_FRACTION;
        Self {
            arena_origin: Vec2::new(0.0, bar),
            arena_size: Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT - bar),
            player_start: Vec2::new(WINDOW_WIDTH * 0.1, WINDOW_HEIGHT * 0.5),
            player_health: PLAYER_HEALTH,
            player_speed: PLAYER_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            type1_spawn_weight: TYPE1_SPAWN_WEIGHT,
            high_score_capacity: HIGH_SCORE_CAPACITY,
            max_name_len: MAX_NAME_LEN,
            default_name: DEFAULT_NAME.to_string(),
        }
    }
}

impl Tuning {
    pub fn arena(&self) -> Rect {
        Rect::new(self.arena_origin, self.arena_size)
    }

    /// Parse tuning JSON. An empty or inverted arena and a non-positive
    /// spawn interval are rejected; the spawn weight is capped at 10.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        use serde::de::Error;

        let positive = |v: f32| v > 0.0;
        let mut tuning: Self = serde_json::from_str(json)?;
        if !(positive(tuning.arena_size.x) && positive(tuning.arena_size.y)) {
            return Err(serde_json::Error::custom(format!(
                "arena_size must be positive, got {:?}",
                tuning.arena_size
            )));
        }
        if !positive(tuning.spawn_interval_ms) {
            return Err(serde_json::Error::custom(format!(
                "spawn_interval_ms must be positive, got {}",
                tuning.spawn_interval_ms
            )));
        }
        tuning.type1_spawn_weight = tuning.type1_spawn_weight.min(10);
        Ok(tuning)
    }

    /// Parse `json` if given, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Invalid tuning, using defaults: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }
}
