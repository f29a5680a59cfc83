//! Headless driver: plays one session with a simple autopilot at 60 Hz and
//! prints the resulting high score table as JSON.
//!
//! Usage: `arena-shooter [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use arena_shooter::consts::FRAME_MS;
    use arena_shooter::renderer::RenderFeed;
    use arena_shooter::sim::{
        GameEvent, GamePhase, GameState, MenuAction, TickInput, WeaponType, tick,
    };
    use arena_shooter::{HighScores, Tuning};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Two minutes of play before the autopilot gives up
    const MAX_TICKS: u64 = 60 * 120;
    /// Weapon rotation period for the autopilot
    const WEAPON_CYCLE_TICKS: u64 = 60 * 10;

    /// Aim at the nearest live enemy, track its height, and hold fire
    fn autopilot(state: &GameState) -> TickInput {
        let me = state.player.sprite.position();
        let target = state
            .enemies
            .iter()
            .filter(|e| e.sprite.is_alive())
            .map(|e| e.sprite.position())
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

        let weapon = WeaponType::ALL[((state.time_ticks / WEAPON_CYCLE_TICKS) % 3) as usize];
        let select_weapon = (weapon != state.current_weapon()).then_some(weapon);

        match target {
            Some(t) => TickInput {
                move_axis: Vec2::new(0.0, (t.y - me.y).signum()),
                pointer: Some(t),
                fire_held: true,
                select_weapon,
                ..Default::default()
            },
            None => TickInput {
                select_weapon,
                ..Default::default()
            },
        }
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0x5eed);
        let tuning_json = args.next().and_then(|path| match std::fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                None
            }
        });
        let tuning = Tuning::load_or_default(tuning_json.as_deref());
        let capacity = tuning.high_score_capacity;

        log::info!("Arena Shooter (headless) starting with seed {}", seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(tuning);

        while state.phase == GamePhase::InPlay && state.time_ticks < MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input, FRAME_MS, &mut rng);
            for event in state.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        if state.phase != GamePhase::Ended {
            log::info!("Time limit reached, quitting");
            for action in [MenuAction::Pause, MenuAction::Quit] {
                let input = TickInput {
                    action: Some(action),
                    ..Default::default()
                };
                tick(&mut state, &input, FRAME_MS, &mut rng);
            }
        }

        let frame = RenderFeed::capture(&state);
        log::info!(
            "Final frame: {} enemies, {} projectiles, {} vertices",
            frame.enemies.len(),
            frame.projectiles.len(),
            frame.vertices(&mut rng).len()
        );

        let confirm = TickInput {
            action: Some(MenuAction::Confirm),
            ..Default::default()
        };
        tick(&mut state, &confirm, FRAME_MS, &mut rng);

        let mut scores = HighScores::with_placeholders(capacity);
        for event in state.drain_events() {
            if let GameEvent::SessionComplete(entry) = event {
                match scores.register(entry) {
                    Some(rank) => log::info!("Ranked #{}", rank + 1),
                    None => log::info!("No high score this time"),
                }
            }
        }

        match scores.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize high scores: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser frontend; the library is driven by the host page
}
