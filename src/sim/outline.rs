//! Polygon outlines built from move/line/cubic-curve path segments
//!
//! Outlines are used both for drawing and for collision. A reference outline
//! lives in local coordinates (unrotated, unit scale); each sprite keeps a
//! transformed working copy that is rebuilt whenever its transform changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Number of line pieces a cubic curve is flattened into for containment
/// tests and stroking
pub const CURVE_FLATTEN_STEPS: usize = 12;

/// One element of an outline path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new subpath
    MoveTo(Vec2),
    /// Straight line from the current point
    LineTo(Vec2),
    /// Cubic bezier from the current point (two control points, then end)
    CurveTo(Vec2, Vec2, Vec2),
}

impl PathSegment {
    fn map(&self, f: impl Fn(Vec2) -> Vec2) -> PathSegment {
        match *self {
            PathSegment::MoveTo(p) => PathSegment::MoveTo(f(p)),
            PathSegment::LineTo(p) => PathSegment::LineTo(f(p)),
            PathSegment::CurveTo(c1, c2, p) => PathSegment::CurveTo(f(c1), f(c2), f(p)),
        }
    }
}

/// Position, rotation and uniform scale of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Center of the sprite in arena units
    pub position: Vec2,
    /// Clockwise rotation in radians, kept in [0, 2π)
    pub rotation: f32,
    /// Uniform scale (shrinks during the enemy death-spiral)
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Map a local-space point into arena space (scale, rotate, translate)
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.rotation).rotate(local * self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec2::ZERO)
    }
}

/// A path made of one or more subpaths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    segments: Vec<PathSegment>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(PathSegment::MoveTo(Vec2::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(PathSegment::LineTo(Vec2::new(x, y)));
        self
    }

    pub fn curve_to(mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> Self {
        self.segments.push(PathSegment::CurveTo(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            Vec2::new(x3, y3),
        ));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Rebuild `out` as this outline mapped through `transform`, reusing its storage
    pub fn transform_into(&self, transform: &Transform, out: &mut Outline) {
        out.segments.clear();
        out.segments
            .extend(self.segments.iter().map(|s| s.map(|p| transform.apply(p))));
    }

    /// This outline mapped through `transform`
    pub fn transformed(&self, transform: &Transform) -> Outline {
        let mut out = Outline::new();
        self.transform_into(transform, &mut out);
        out
    }

    /// Every vertex and bezier control point, in path order
    pub fn sample_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().flat_map(|s| {
            let pts: [Option<Vec2>; 3] = match *s {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => [Some(p), None, None],
                PathSegment::CurveTo(c1, c2, p) => [Some(c1), Some(c2), Some(p)],
            };
            pts.into_iter().flatten()
        })
    }

    /// The current point of the path (end of the last segment)
    pub fn end_point(&self) -> Option<Vec2> {
        self.segments.last().map(|s| match *s {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) | PathSegment::CurveTo(_, _, p) => p,
        })
    }

    /// Bounding box over all points, control points included
    pub fn bounds(&self) -> Rect {
        Rect::enclosing(self.sample_points())
    }

    /// Straight edges of the path; a curve contributes the three legs of its
    /// control polygon. Subpaths are not implicitly closed.
    pub fn edges(&self) -> Vec<(Vec2, Vec2)> {
        let mut edges = Vec::with_capacity(self.segments.len() + 4);
        let mut current: Option<Vec2> = None;
        for seg in &self.segments {
            match *seg {
                // A move starts a new subpath; no edge bridges the gap
                PathSegment::MoveTo(p) => current = Some(p),
                PathSegment::LineTo(p) => {
                    if let Some(prev) = current {
                        edges.push((prev, p));
                    }
                    current = Some(p);
                }
                PathSegment::CurveTo(c1, c2, p) => {
                    if let Some(prev) = current {
                        edges.push((prev, c1));
                        edges.push((c1, c2));
                        edges.push((c2, p));
                    }
                    current = Some(p);
                }
            }
        }
        edges
    }

    /// Subpaths as point lists with curves flattened into line pieces
    pub fn flattened(&self) -> Vec<Vec<Vec2>> {
        let mut polys: Vec<Vec<Vec2>> = Vec::new();
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) => polys.push(vec![p]),
                PathSegment::LineTo(p) => match polys.last_mut() {
                    Some(poly) => poly.push(p),
                    None => polys.push(vec![p]),
                },
                PathSegment::CurveTo(c1, c2, p) => {
                    let Some(poly) = polys.last_mut() else {
                        polys.push(vec![p]);
                        continue;
                    };
                    let p0 = poly.last().copied().unwrap_or(p);
                    for i in 1..=CURVE_FLATTEN_STEPS {
                        let t = i as f32 / CURVE_FLATTEN_STEPS as f32;
                        poly.push(cubic_point(p0, c1, c2, p, t));
                    }
                }
            }
        }
        polys
    }

    /// Point-in-outline test using the non-zero winding rule, with every
    /// subpath implicitly closed
    pub fn contains(&self, point: Vec2) -> bool {
        let mut winding = 0i32;
        for poly in self.flattened() {
            if poly.len() < 3 {
                continue;
            }
            for i in 0..poly.len() {
                let a = poly[i];
                let b = poly[(i + 1) % poly.len()];
                if a.y <= point.y {
                    if b.y > point.y && is_left(a, b, point) > 0.0 {
                        winding += 1;
                    }
                } else if b.y <= point.y && is_left(a, b, point) < 0.0 {
                    winding -= 1;
                }
            }
        }
        winding != 0
    }
}

/// Point on a cubic bezier at parameter `t`
pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Positive if `p` is left of the directed line a→b, negative if right
#[inline]
fn is_left(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}
