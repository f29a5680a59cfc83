//! Drawing-layer support
//!
//! The simulation never draws. Each frame the host captures a `RenderFeed`
//! and turns it into colored triangles for whatever backend it uses.

pub mod feed;
pub mod shapes;
pub mod vertex;

pub use feed::{EnemyView, ProjectileView, RenderFeed, SpriteView};
pub use vertex::{Vertex, colors};
