//! Frame-based simulation tick
//!
//! Advances the session by one frame of wall-clock `delta_ms`. Motion, timers
//! and cooldowns are all scaled by the delta, so the result depends on the
//! delta sequence but is deterministic for a given sequence and RNG seed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::player::Player;
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState, MenuAction};
use super::weapon::WeaponType;
use crate::highscores::NameEdit;

/// Logical input for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement direction; each component in -1..=1
    pub move_axis: Vec2,
    /// Pointer position, if a pointer is over the play screen
    pub pointer: Option<Vec2>,
    /// Primary pointer button went down this tick
    pub pointer_pressed: bool,
    /// Primary pointer button is held
    pub pointer_held: bool,
    /// Fire key is held
    pub fire_held: bool,
    /// Weapon hotkey pressed this tick
    pub select_weapon: Option<WeaponType>,
    /// Pause key pressed this tick (toggles)
    pub pause: bool,
    /// Menu button clicked this tick
    pub action: Option<MenuAction>,
    /// Name editing on the game-over screen
    pub name_edits: Vec<NameEdit>,
}

/// Advance the session by one frame
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    delta_ms: f32,
    rng: &mut R,
) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::InPlay => {
            apply_input(state, input, delta_ms);
            if state.phase == GamePhase::InPlay {
                step(state, delta_ms, rng);
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.set_phase(GamePhase::InPlay);
            }
        }
        GamePhase::Ended => {
            for edit in &input.name_edits {
                state.name.apply(*edit);
            }
        }
    }

    if let Some(action) = input.action {
        handle_action(state, action);
    }
}

/// Apply menu actions valid for the current phase; others are ignored
pub fn handle_action(state: &mut GameState, action: MenuAction) {
    match (state.phase, action) {
        (GamePhase::InPlay, MenuAction::SelectWeapon(w)) => state.switch_weapon(w),
        (GamePhase::InPlay, MenuAction::Pause) => state.set_phase(GamePhase::Paused),
        (GamePhase::Paused, MenuAction::Resume) => state.set_phase(GamePhase::InPlay),
        (GamePhase::Paused, MenuAction::Quit) => state.set_phase(GamePhase::Ended),
        (GamePhase::Ended, MenuAction::Confirm) => {
            if !state.finished {
                state.finished = true;
                if let Some(result) = state.session_result() {
                    log::info!("Session complete: {} scored {}", result.name, result.score);
                    state.events.push(GameEvent::SessionComplete(result));
                }
            }
        }
        _ => {}
    }
}

// Translate input intents into player state
fn apply_input(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    if input.pause {
        state.set_phase(GamePhase::Paused);
        return;
    }

    let arena = state.arena;
    let player = &mut state.player;

    // Pointer: start/stop dragging, drag or aim
    if input.pointer.is_none() || !input.pointer_held {
        state.dragging = false;
    }
    if let Some(pointer) = input.pointer {
        if input.pointer_pressed && player.contains_point(pointer) {
            state.dragging = true;
        }
        if state.dragging {
            if !player.relocate(pointer, &arena) {
                log::debug!("Drag left the play area at {:?}", pointer);
                state.dragging = false;
            }
        } else {
            player.sprite.rotate_to_facing(pointer);
        }
    }

    // Keyboard movement, one axis at a time
    let step = player.sprite.speed * delta_ms;
    let axis = input.move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    if axis.x != 0.0 {
        player.move_by(Vec2::new(axis.x * step, 0.0), &arena);
    }
    if axis.y != 0.0 {
        player.move_by(Vec2::new(0.0, axis.y * step), &arena);
    }

    player.sprite.is_firing = input.fire_held || (input.pointer_held && !state.dragging);

    if let Some(weapon) = input.select_weapon {
        state.switch_weapon(weapon);
    }
}

// One in-play simulation step
fn step<R: Rng + ?Sized>(state: &mut GameState, delta_ms: f32, rng: &mut R) {
    state.elapsed_ms += delta_ms as f64;
    let arena = state.arena;

    // Shots fired this tick join the live set after everything has moved
    let mut fired: Vec<Projectile> = Vec::new();

    // Player
    state.player.update(delta_ms);
    if state.player.sprite.should_fire() {
        fired.extend(state.fire_player_weapon());
    }

    // Projectiles: move, drop expired or off-arena, then resolve hits
    for proj in &mut state.projectiles {
        proj.update(delta_ms);
    }
    state
        .projectiles
        .retain(|p| p.sprite.is_alive() && arena.contains(p.sprite.position()));

    {
        let GameState {
            projectiles,
            enemies,
            player,
            events,
            ..
        } = state;
        projectiles.retain(|proj| {
            let collided = resolve_projectile(proj, enemies, player, events);
            !(collided && proj.removes_on_collision())
        });
    }

    // Enemies: drift/spiral, remove escaped or finished, fire
    update_enemies(state, delta_ms, &mut fired);

    // Ships ramming the player
    resolve_rams(state);

    // Spawning
    state.spawn_timer_ms += delta_ms;
    if state.spawn_timer_ms >= state.tuning.spawn_interval_ms {
        state.spawn_timer_ms -= state.tuning.spawn_interval_ms;
        spawn_enemy(state, rng);
    }

    state.projectiles.extend(fired);

    if !state.player.sprite.is_alive() {
        state.set_phase(GamePhase::Ended);
    }
}

/// Test one projectile against every live enemy it did not fire, then the
/// player. Applies damage and returns true if anything was hit.
///
/// All enemies hit in the same tick take damage, even for single-hit
/// weapons. The player is only tested when no enemy was hit.
pub fn resolve_projectile(
    proj: &Projectile,
    enemies: &mut [Enemy],
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut hits = 0;
    for enemy in enemies.iter_mut() {
        if proj.is_creator(&enemy.sprite) || !enemy.sprite.is_alive() {
            continue;
        }
        if proj.check_collision(&enemy.sprite) {
            enemy.sprite.hit_by(&proj.sprite);
            hits += 1;
        }
    }
    if hits > 0 {
        return true;
    }

    if proj.is_creator(&player.sprite) {
        return false;
    }
    if proj.check_collision(&player.sprite) {
        player.sprite.hit_by(&proj.sprite);
        events.push(GameEvent::PlayerHit {
            damage: proj.sprite.collision_damage,
            health: player.sprite.health,
        });
        return true;
    }
    false
}

fn update_enemies(state: &mut GameState, delta_ms: f32, fired: &mut Vec<Projectile>) {
    let arena = state.arena;
    let mut enemies = std::mem::take(&mut state.enemies);
    enemies.retain_mut(|enemy| {
        enemy.update(delta_ms);

        if enemy.escaped(&arena) {
            log::debug!("Enemy {:?} escaped", enemy.sprite.id);
            state.events.push(GameEvent::EnemyEscaped { id: enemy.sprite.id });
            return false;
        }
        if enemy.requires_removal() {
            state.score += enemy.bounty;
            log::debug!(
                "Enemy {:?} destroyed (+{}, score {})",
                enemy.sprite.id,
                enemy.bounty,
                state.score
            );
            state.events.push(GameEvent::EnemyDestroyed {
                id: enemy.sprite.id,
                bounty: enemy.bounty,
            });
            return false;
        }
        if enemy.sprite.is_alive() && enemy.sprite.should_fire() {
            fired.extend(enemy.sprite.fire_projectiles(state.ids_mut()));
        }
        true
    });
    state.enemies = enemies;
}

// Live enemies touching the player hurt it and are destroyed on impact
fn resolve_rams(state: &mut GameState) {
    let GameState {
        enemies,
        player,
        events,
        ..
    } = state;
    for enemy in enemies.iter_mut() {
        if enemy.sprite.is_alive() && player.sprite.check_collision(&enemy.sprite) {
            player.sprite.hit_by(&enemy.sprite);
            enemy.sprite.destroy();
            events.push(GameEvent::PlayerHit {
                damage: enemy.sprite.collision_damage,
                health: player.sprite.health,
            });
        }
    }
}

fn spawn_enemy<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    let kind = EnemyKind::random(rng, state.tuning.type1_spawn_weight);
    let id = state.next_entity_id();
    let target = state.player.sprite.position();
    let enemy = Enemy::spawn(id, kind, &state.arena, target, rng);
    log::debug!("Spawned {:?} {:?} at {:?}", kind, id, enemy.sprite.position());
    state.events.push(GameEvent::EnemySpawned { id, kind });
    state.enemies.push(enemy);
}
