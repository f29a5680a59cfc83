//! Simulation module
//!
//! All gameplay logic lives here:
//! - Frame-based timestep; every rate is scaled by the frame delta
//! - RNG passed in by the caller, so a seed reproduces a session
//! - Stable iteration order (insertion order of enemies and projectiles)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod outline;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod shapes;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{outline_samples_inside, segment_hits_outline, segments_intersect};
pub use enemy::{Enemy, EnemyKind, EnemyStats};
pub use outline::{Outline, PathSegment, Transform};
pub use player::Player;
pub use projectile::Projectile;
pub use rect::Rect;
pub use shapes::Shape;
pub use sprite::{EntityIds, Palette, Sprite, SpriteId};
pub use state::{GameEvent, GamePhase, GameState, MenuAction};
pub use tick::{TickInput, handle_action, resolve_projectile, tick};
pub use weapon::WeaponType;
