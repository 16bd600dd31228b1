//! Quadratic Bézier helpers used to evaluate and subdivide connections.
//!
//! Every curved connection in the game is a single quadratic segment. When a
//! move is committed the pending curve is cut in half with de Casteljau so the
//! two resulting connections trace exactly the same path as the unsplit curve.

use crate::geometry::math::{lerp, quad_point};
use crate::model::Vec2;

/// Control points of a quadratic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBezier {
    pub p0: Vec2, // Start point
    pub p1: Vec2, // Control point
    pub p2: Vec2, // End point
}

impl QuadBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Vec2 {
        quad_point(self.p0, self.p1, self.p2, t)
    }

    /// Split the curve at parameter t using de Casteljau subdivision.
    ///
    /// Returns two quadratic curves: the first from 0..t, the second from t..1.
    pub fn split_at(&self, t: f32) -> (QuadBezier, QuadBezier) {
        let p01 = lerp(self.p0, self.p1, t);
        let p12 = lerp(self.p1, self.p2, t);
        let p012 = lerp(p01, p12, t); // The split point

        (
            QuadBezier::new(self.p0, p01, p012),
            QuadBezier::new(p012, p12, self.p2),
        )
    }

    /// Axis-aligned bounds of the control polygon; the curve lies inside it.
    pub fn hull_bounds(&self) -> (f32, f32, f32, f32) {
        let xs = [self.p0.x, self.p1.x, self.p2.x];
        let ys = [self.p0.y, self.p1.y, self.p2.y];
        (
            xs.iter().copied().fold(f32::INFINITY, f32::min),
            ys.iter().copied().fold(f32::INFINITY, f32::min),
            xs.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            ys.iter().copied().fold(f32::NEG_INFINITY, f32::max),
        )
    }
}
