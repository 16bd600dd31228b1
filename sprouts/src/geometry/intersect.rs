// Sampled-polyline crossing tests between connection shapes.
// Orientation is evaluated in f64; touching and collinear configurations are
// not crossings, matching the strict CCW predicate.

use crate::geometry::math::distance;
use crate::geometry::shape::EdgeShape;
use crate::geometry::tolerance::{EPS_ENDPOINT, SAMPLE_SEGMENTS};
use crate::model::Vec2;

/// Sampling density and endpoint exemption radius for shape comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectOpts {
    pub segments: u32,
    pub endpoint_eps: f32,
}

impl Default for IntersectOpts {
    fn default() -> Self {
        IntersectOpts { segments: SAMPLE_SEGMENTS, endpoint_eps: EPS_ENDPOINT }
    }
}

#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (cx, cy) = (c.x as f64, c.y as f64);
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

#[inline]
fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    orient(a, b, c) > 0.0
}

/// Segments p1p2 and q1q2 cross when each one's endpoints fall on opposite
/// orientations of the other.
pub fn segments_intersect(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    ccw(p1, q1, q2) != ccw(p2, q1, q2) && ccw(p1, p2, q1) != ccw(p1, p2, q2)
}

/// True when the shapes have endpoints within `eps` of each other.
pub fn share_endpoint(a: &EdgeShape, b: &EdgeShape, eps: f32) -> bool {
    a.endpoints()
        .iter()
        .any(|&p| b.endpoints().iter().any(|&q| distance(p, q) < eps))
}

fn boxes_overlap(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3
}

/// Crossing test between two connection shapes.
///
/// Shapes that share an endpoint never cross: connections meeting at a dot
/// must not be flagged against each other.
pub fn shapes_intersect(a: &EdgeShape, b: &EdgeShape, opts: IntersectOpts) -> bool {
    if share_endpoint(a, b, opts.endpoint_eps) {
        return false;
    }
    if !boxes_overlap(a.bounds(), b.bounds()) {
        return false;
    }
    let pa: Vec<Vec2> = a.samples(opts.segments).collect();
    let pb: Vec<Vec2> = b.samples(opts.segments).collect();
    polylines_intersect(&pa, &pb)
}

pub fn polylines_intersect(pa: &[Vec2], pb: &[Vec2]) -> bool {
    for sa in pa.windows(2) {
        for sb in pb.windows(2) {
            if segments_intersect(sa[0], sa[1], sb[0], sb[1]) {
                return true;
            }
        }
    }
    false
}
