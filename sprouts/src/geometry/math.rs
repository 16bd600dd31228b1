use crate::model::Vec2;

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[inline]
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x; let dy = a.y - b.y;
    dx*dx + dy*dy
}

#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: 0.5 * (a.x + b.x), y: 0.5 * (a.y + b.y) }
}

#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2 { x: a.x + t * (b.x - a.x), y: a.y + t * (b.y - a.y) }
}

/// Quadratic Bézier point: (1-t)²a + 2(1-t)t·cp + t²b.
pub fn quad_point(a: Vec2, cp: Vec2, b: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    let uu = u*u; let ut2 = 2.0*u*t; let tt = t*t;
    Vec2 {
        x: uu*a.x + ut2*cp.x + tt*b.x,
        y: uu*a.y + ut2*cp.y + tt*b.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_point_hits_endpoints_and_midpoint() {
        let a = Vec2::new(0.0, 0.0);
        let cp = Vec2::new(50.0, 100.0);
        let b = Vec2::new(100.0, 0.0);
        assert_eq!(quad_point(a, cp, b, 0.0), a);
        assert_eq!(quad_point(a, cp, b, 1.0), b);
        let m = quad_point(a, cp, b, 0.5);
        assert!((m.x - 50.0).abs() < 1e-4);
        assert!((m.y - 50.0).abs() < 1e-4);
    }
}
