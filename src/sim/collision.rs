//! Collision detection between transformed outlines
//!
//! Two tests are used in the game:
//! - Point sampling: one outline's vertices and control points are tested for
//!   containment in the other. This is an approximation: two outlines that
//!   cross edge-to-edge without either one's sample points falling inside the
//!   other are reported as a miss.
//! - Beam intersection: a line segment (the laser) against every edge of an
//!   outline, with curves approximated by their control polygon.

use glam::Vec2;

use super::outline::Outline;

/// True if any sample point of `sampler` lies inside `target`
pub fn outline_samples_inside(sampler: &Outline, target: &Outline) -> bool {
    sampler.sample_points().any(|p| target.contains(p))
}

/// True if the segment `start`→`end` crosses or touches any edge of `target`
pub fn segment_hits_outline(start: Vec2, end: Vec2, target: &Outline) -> bool {
    target
        .edges()
        .into_iter()
        .any(|(a, b)| segments_intersect(start, end, a, b))
}

/// Closed segment intersection test (touching endpoints and collinear
/// overlap both count)
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    relative_ccw(a1, a2, b1) * relative_ccw(a1, a2, b2) <= 0
        && relative_ccw(b1, b2, a1) * relative_ccw(b1, b2, a2) <= 0
}

/// Which side of the directed line a→b the point lies on: 1 for one side,
/// -1 for the other, 0 when it lies on the segment itself. Collinear points
/// beyond either end report the side of the nearer endpoint direction.
fn relative_ccw(a: Vec2, b: Vec2, p: Vec2) -> i32 {
    let dir = b - a;
    let mut rel = p - a;
    let mut ccw = rel.x * dir.y - rel.y * dir.x;
    if ccw == 0.0 {
        ccw = rel.dot(dir);
        if ccw > 0.0 {
            rel -= dir;
            ccw = rel.dot(dir);
            if ccw < 0.0 {
                ccw = 0.0;
            }
        }
    }
    if ccw < 0.0 {
        -1
    } else if ccw > 0.0 {
        1
    } else {
        0
    }
}
