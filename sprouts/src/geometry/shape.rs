//! Resolved connection geometry.
//!
//! An [`EdgeShape`] is an edge or pending edge with its dot references replaced
//! by positions, which is all the geometry kernel needs. Straight, curved and
//! loop connections share one representation; a loop is simply a shape whose
//! endpoints coincide.

use crate::geometry::math::{distance_sq, lerp, midpoint};
use crate::geometry::quadratic::QuadBezier;
use crate::geometry::tolerance::SAMPLE_SEGMENTS;
use crate::model::{EdgeKind, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeShape {
    pub a: Vec2,
    pub b: Vec2,
    pub kind: EdgeKind,
}

impl EdgeShape {
    pub fn new(a: Vec2, b: Vec2, kind: EdgeKind) -> Self {
        EdgeShape { a, b, kind }
    }

    pub fn straight(a: Vec2, b: Vec2) -> Self {
        EdgeShape { a, b, kind: EdgeKind::Straight }
    }

    pub fn curve(a: Vec2, cp: Vec2, b: Vec2) -> Self {
        EdgeShape { a, b, kind: EdgeKind::Curve { cp } }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        match self.kind {
            EdgeKind::Straight => lerp(self.a, self.b, t),
            EdgeKind::Curve { cp } | EdgeKind::Loop { cp } => {
                QuadBezier::new(self.a, cp, self.b).eval(t)
            }
        }
    }

    pub fn endpoints(&self) -> [Vec2; 2] {
        [self.a, self.b]
    }

    /// Polyline approximation with `segments + 1` points, endpoints exact.
    pub fn samples(&self, segments: u32) -> Samples {
        Samples { shape: *self, segments: segments.max(1), next: 0 }
    }

    pub fn default_samples(&self) -> Samples {
        self.samples(SAMPLE_SEGMENTS)
    }

    /// Cut the shape at t = 0.5.
    ///
    /// Returns the two halves and the split point. Curve and loop halves get
    /// the de Casteljau control points `mid(a, cp)` and `mid(cp, b)`, so they
    /// retrace the unsplit path; a straight shape yields two straight halves.
    pub fn split_half(&self) -> (EdgeShape, EdgeShape, Vec2) {
        match self.kind {
            EdgeKind::Straight => {
                let m = midpoint(self.a, self.b);
                (EdgeShape::straight(self.a, m), EdgeShape::straight(m, self.b), m)
            }
            EdgeKind::Curve { cp } | EdgeKind::Loop { cp } => {
                let (first, second) = QuadBezier::new(self.a, cp, self.b).split_at(0.5);
                (
                    EdgeShape::curve(first.p0, first.p1, first.p2),
                    EdgeShape::curve(second.p0, second.p1, second.p2),
                    first.p2,
                )
            }
        }
    }

    /// Bounds that contain the whole shape (control polygon for curves).
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self.kind {
            EdgeKind::Straight => (
                self.a.x.min(self.b.x),
                self.a.y.min(self.b.y),
                self.a.x.max(self.b.x),
                self.a.y.max(self.b.y),
            ),
            EdgeKind::Curve { cp } | EdgeKind::Loop { cp } => {
                QuadBezier::new(self.a, cp, self.b).hull_bounds()
            }
        }
    }
}

/// Lazy sample sequence over a shape. Clone it to restart from the beginning.
#[derive(Clone, Debug)]
pub struct Samples {
    shape: EdgeShape,
    segments: u32,
    next: u32,
}

impl Iterator for Samples {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next > self.segments {
            return None;
        }
        let i = self.next;
        self.next += 1;
        // Pin the last sample to the exact endpoint.
        if i == self.segments {
            return Some(self.shape.b);
        }
        Some(self.shape.point_at(i as f32 / self.segments as f32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.segments + 1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Samples {}

/// True if any sampled point of `shape` lies within `tolerance` of `point`.
pub fn near_path(point: Vec2, shape: &EdgeShape, tolerance: f32, segments: u32) -> bool {
    let tol2 = tolerance * tolerance;
    shape.samples(segments).any(|p| distance_sq(p, point) < tol2)
}
