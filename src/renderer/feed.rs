//! Per-frame snapshot handed to the drawing layer
//!
//! The feed holds no references into the session, so it can be sent to
//! another thread or serialized for a remote viewer.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shapes;
use super::vertex::{Vertex, colors, rgba};
use crate::sim::enemy::EnemyKind;
use crate::sim::outline::Transform;
use crate::sim::rect::Rect;
use crate::sim::shapes::Shape;
use crate::sim::sprite::{Sprite, SpriteId};
use crate::sim::state::{GamePhase, GameState};
use crate::sim::weapon::WeaponType;

/// What to draw for one sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub id: SpriteId,
    pub shape: Shape,
    pub transform: Transform,
    pub body: Vec3,
    pub line: Vec3,
    pub line_width: f32,
    pub health_fraction: f32,
}

impl SpriteView {
    fn of(sprite: &Sprite) -> Self {
        Self {
            id: sprite.id,
            shape: sprite.shape,
            transform: *sprite.transform(),
            body: sprite.palette.body,
            line: sprite.palette.line,
            line_width: sprite.line_width,
            health_fraction: sprite.health_fraction(),
        }
    }

    /// Engine exhaust for ships, then the filled body and stroked outline
    fn push_vertices<R: Rng + ?Sized>(&self, out: &mut Vec<Vertex>, rng: &mut R) {
        let outline = self.shape.outline().transformed(&self.transform);
        if let Some(anchor) = self.shape.engine_anchor() {
            out.extend(shapes::exhaust(anchor, &self.transform, rng));
        }
        out.extend(shapes::fill_outline(
            &outline,
            self.transform.position,
            rgba(self.body),
        ));
        out.extend(shapes::stroke_outline(
            &outline,
            self.line_width * self.transform.scale,
            rgba(self.line),
        ));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub sprite: SpriteView,
    pub kind: EnemyKind,
    /// In its death spiral
    pub dying: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub sprite: SpriteView,
    pub weapon: WeaponType,
    /// Beam segment for lasers
    pub beam: Option<(Vec2, Vec2)>,
}

/// Everything visible on one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFeed {
    pub phase: GamePhase,
    pub arena: Rect,
    pub score: u64,
    pub player: SpriteView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub weapons: [(WeaponType, bool); 3],
    /// Name being typed, only on the game-over screen
    pub name: Option<String>,
}

impl RenderFeed {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            arena: state.arena,
            score: state.score,
            player: SpriteView::of(&state.player.sprite),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    sprite: SpriteView::of(&e.sprite),
                    kind: e.kind,
                    dying: !e.sprite.is_alive(),
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    sprite: SpriteView::of(&p.sprite),
                    weapon: p.weapon,
                    beam: (p.weapon == WeaponType::Laser).then(|| p.beam()),
                })
                .collect(),
            weapons: state.weapon_indicators(),
            name: (state.phase == GamePhase::Ended).then(|| state.name.as_str().to_string()),
        }
    }

    /// Build the frame's triangle list. The RNG only drives exhaust flicker.
    pub fn vertices<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vertex> {
        let mut out = Vec::new();

        // Menu bar strip above the arena with one indicator per weapon
        let bar = Rect {
            min: Vec2::new(self.arena.min.x, 0.0),
            max: Vec2::new(self.arena.max.x, self.arena.min.y),
        };
        out.extend(shapes::rect(&bar, colors::MENU_BAR));
        let slot = bar.height() * 0.5;
        for (i, (_, active)) in self.weapons.iter().enumerate() {
            let min = Vec2::new(bar.min.x + slot * (0.5 + 1.5 * i as f32), bar.min.y + slot * 0.5);
            let light = Rect::new(min, Vec2::splat(slot));
            let color = if *active {
                colors::INDICATOR_ON
            } else {
                colors::INDICATOR_OFF
            };
            out.extend(shapes::rect(&light, color));
        }

        for p in &self.projectiles {
            p.sprite.push_vertices(&mut out, rng);
        }
        for e in &self.enemies {
            e.sprite.push_vertices(&mut out, rng);
        }
        self.player.push_vertices(&mut out, rng);

        if self.phase == GamePhase::Paused {
            out.extend(shapes::rect(&self.arena, colors::PAUSE_SHADE));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::Projectile;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(Tuning::default());
        state.add_enemy(EnemyKind::Type2, Vec2::new(800.0, 400.0));
        state.switch_weapon(WeaponType::Laser);
        let id = state.next_entity_id();
        let creator = state.player.sprite.id;
        state.projectiles.push(Projectile::new(
            id,
            WeaponType::Laser,
            Vec2::new(300.0, 600.0),
            0.0,
            creator,
        ));

        let feed = RenderFeed::capture(&state);
        assert_eq!(feed.enemies.len(), 1);
        assert_eq!(feed.enemies[0].kind, EnemyKind::Type2);
        assert!(!feed.enemies[0].dying);
        assert!(feed.projectiles[0].beam.is_some());
        assert_eq!(feed.weapons[2], (WeaponType::Laser, true));
        assert_eq!(feed.name, None);
        assert_eq!(feed.player.health_fraction, 1.0);
    }

    #[test]
    fn test_name_shown_after_game_over() {
        let mut state = GameState::new(Tuning::default());
        state.set_phase(GamePhase::Ended);
        let feed = RenderFeed::capture(&state);
        assert_eq!(feed.name.as_deref(), Some("Your Name Here"));
    }

    #[test]
    fn test_vertices_are_triangles() {
        let mut state = GameState::new(Tuning::default());
        state.add_enemy(EnemyKind::Type1, Vec2::new(800.0, 400.0));
        let feed = RenderFeed::capture(&state);
        let mut rng = Pcg32::seed_from_u64(8);
        let verts = feed.vertices(&mut rng);
        assert!(!verts.is_empty());
        assert_eq!(verts.len() % 3, 0);
    }

    #[test]
    fn test_feed_serializes() {
        let state = GameState::new(Tuning::default());
        let feed = RenderFeed::capture(&state);
        let json = serde_json::to_string(&feed).unwrap();
        let back: RenderFeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, feed);
    }
}
