use crate::model::Vec2;

/// Playable region predicate. New dots must land inside it.
pub trait Boundary {
    fn contains(&self, p: Vec2) -> bool;
}

/// Whole plane.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl Boundary for Unbounded {
    fn contains(&self, _p: Vec2) -> bool {
        true
    }
}

/// Axis-aligned rectangle, edges inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectBoundary {
    pub min: Vec2,
    pub max: Vec2,
}

impl RectBoundary {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        RectBoundary { min: Vec2::new(x, y), max: Vec2::new(x + w, y + h) }
    }
}

impl Boundary for RectBoundary {
    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Arbitrary shape supplied by the layout, e.g. a circle or a letter mask.
pub struct MaskBoundary<F>(pub F);

impl<F: Fn(Vec2) -> bool> Boundary for MaskBoundary<F> {
    fn contains(&self, p: Vec2) -> bool {
        (self.0)(p)
    }
}
