//! Game session state
//!
//! Everything a session needs between ticks lives here: the player, the live
//! enemies and projectiles, score, spawn timer and session phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::player::Player;
use super::projectile::Projectile;
use super::rect::Rect;
use super::sprite::{EntityIds, SpriteId};
use super::weapon::WeaponType;
use crate::highscores::{HighScoreEntry, NameEntry};
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    InPlay,
    /// Simulation frozen, pause menu showing
    Paused,
    /// Player died or quit; name entry until confirmed
    Ended,
}

/// Discrete actions reported by the menu layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    /// Weapon button on the in-game menu bar
    SelectWeapon(WeaponType),
    /// Pause button on the in-game menu bar
    Pause,
    /// "Return to Game" on the pause menu
    Resume,
    /// "Main Menu" on the pause menu: ends the session
    Quit,
    /// "Done" on the game-over menu: finalizes the session result
    Confirm,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: SpriteId, kind: EnemyKind },
    /// Death-spiral finished; bounty added to the score
    EnemyDestroyed { id: SpriteId, bounty: u64 },
    /// Drifted off the left edge; no score
    EnemyEscaped { id: SpriteId },
    PlayerHit { damage: i32, health: i32 },
    WeaponSwitched(WeaponType),
    PhaseChanged { from: GamePhase, to: GamePhase },
    GameOver { score: u64 },
    SessionComplete(HighScoreEntry),
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Play area all sprites are tested against
    pub arena: Rect,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Time accumulated toward the next spawn (ms)
    pub spawn_timer_ms: f32,
    /// Pointer drag of the player ship in progress
    pub dragging: bool,
    /// Name typed on the game-over screen
    pub name: NameEntry,
    /// Game-over screen confirmed; the shell should stop ticking
    pub finished: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total simulated time while in play (ms)
    pub elapsed_ms: f64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    ids: EntityIds,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        let mut ids = EntityIds::default();
        let player = Player::new(
            ids.next_id(),
            tuning.player_start,
            tuning.player_health,
            tuning.player_speed,
        );
        let name = NameEntry::new(&tuning.default_name, tuning.max_name_len);
        log::info!(
            "New session: arena {:?}, player at {:?}",
            tuning.arena(),
            tuning.player_start
        );
        Self {
            arena: tuning.arena(),
            tuning,
            phase: GamePhase::InPlay,
            score: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer_ms: 0.0,
            dragging: false,
            name,
            finished: false,
            time_ticks: 0,
            elapsed_ms: 0.0,
            events: Vec::new(),
            ids,
        }
    }

    /// Allocate a new sprite id
    pub fn next_entity_id(&mut self) -> SpriteId {
        self.ids.next_id()
    }

    pub(crate) fn ids_mut(&mut self) -> &mut EntityIds {
        &mut self.ids
    }

    /// Spawn the player's shots for the current weapon
    pub(crate) fn fire_player_weapon(&mut self) -> Vec<Projectile> {
        self.player.sprite.fire_projectiles(&mut self.ids)
    }

    /// The player's equipped weapon
    pub fn current_weapon(&self) -> WeaponType {
        self.player.sprite.weapon
    }

    /// Selected flag for each weapon button; exactly one is set
    pub fn weapon_indicators(&self) -> [(WeaponType, bool); 3] {
        let current = self.current_weapon();
        WeaponType::ALL.map(|w| (w, w == current))
    }

    /// Equip `weapon`; re-selecting the current weapon does nothing
    pub fn switch_weapon(&mut self, weapon: WeaponType) {
        if self.player.sprite.weapon == weapon {
            return;
        }
        log::debug!("Weapon switched to {}", weapon.as_str());
        self.player.sprite.switch_weapon(weapon);
        self.events.push(GameEvent::WeaponSwitched(weapon));
    }

    /// Add a freshly built enemy to the live set
    pub fn add_enemy(&mut self, kind: EnemyKind, position: Vec2) -> SpriteId {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, position));
        id
    }

    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        if to == GamePhase::Ended {
            self.dragging = false;
            self.player.sprite.is_firing = false;
            log::info!("Game over, final score {}", self.score);
            self.events.push(GameEvent::GameOver { score: self.score });
        }
    }

    /// Final score and name, once the session has ended
    pub fn session_result(&self) -> Option<HighScoreEntry> {
        (self.phase == GamePhase::Ended).then(|| HighScoreEntry {
            name: self.name.as_str().to_string(),
            score: self.score,
        })
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
