//! Triangle generation for sprite outlines and engine exhaust

use glam::Vec2;
use rand::Rng;

use super::vertex::Vertex;
use crate::sim::outline::{Outline, Transform};
use crate::sim::rect::Rect;

/// Exhaust curves drawn per engine each frame
pub const EXHAUST_CURVES: usize = 5;
/// Stroke width of an exhaust curve
pub const EXHAUST_WIDTH: f32 = 6.0;

/// Generate vertices for a thick polyline, one quad per leg
pub fn stroke_polyline(points: &[Vec2], closed: bool, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width * 0.5;
    let legs = if closed { points.len() } else { points.len() - 1 };
    let mut vertices = Vec::with_capacity(legs * 6);

    for i in 0..legs {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];

        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let perp = dir.perp() * half;

        // Extend each leg by half the width so joints overlap
        let a = p1 - dir * half;
        let b = p2 + dir * half;

        let v1a = a + perp;
        let v1b = a - perp;
        let v2a = b + perp;
        let v2b = b - perp;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Stroke every subpath of an outline, closing each one
pub fn stroke_outline(outline: &Outline, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    outline
        .flattened()
        .iter()
        .flat_map(|poly| stroke_polyline(poly, true, width, color))
        .collect()
}

/// Fill an outline as a triangle fan around `center`.
///
/// Exact for shapes that are star-shaped around the center, which all the
/// ship hulls are.
pub fn fill_outline(outline: &Outline, center: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for poly in outline.flattened() {
        for i in 0..poly.len() {
            let p1 = poly[i];
            let p2 = poly[(i + 1) % poly.len()];
            vertices.push(Vertex::new(center.x, center.y, color));
            vertices.push(Vertex::new(p1.x, p1.y, color));
            vertices.push(Vertex::new(p2.x, p2.y, color));
        }
    }
    vertices
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (a, b) = (r.min, r.max);
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, a.y, color),
        Vertex::new(a.x, b.y, color),
        Vertex::new(a.x, b.y, color),
        Vertex::new(b.x, a.y, color),
        Vertex::new(b.x, b.y, color),
    ]
}

/// Flickering engine exhaust: a few random reddish-orange curves trailing
/// from `anchor` (sprite-local) in the sprite's frame.
pub fn exhaust<R: Rng + ?Sized>(anchor: Vec2, transform: &Transform, rng: &mut R) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for _ in 0..EXHAUST_CURVES {
        let mut x = anchor.x;
        let mut y = anchor.y;

        x += rng.random_range(-2.5..2.5);
        let start = (x, y);
        let mut pts = [(0.0, 0.0); 3];
        for p in &mut pts {
            x += rng.random_range(-2.5..2.5);
            y += rng.random_range(5.0..6.0);
            *p = (x, y);
        }

        let curve = Outline::new()
            .move_to(start.0, start.1)
            .curve_to(pts[0].0, pts[0].1, pts[1].0, pts[1].1, pts[2].0, pts[2].1)
            .transformed(transform);

        let color = [
            rng.random_range(100..255) as f32 / 255.0,
            rng.random_range(50..150) as f32 / 255.0,
            0.0,
            1.0,
        ];
        for poly in curve.flattened() {
            vertices.extend(stroke_polyline(&poly, false, EXHAUST_WIDTH, color));
        }
    }
    vertices
}
