// Caps applied to caller-supplied game parameters

pub const MAX_DOTS: usize = 2_000;
pub const MAX_SAMPLE_SEGMENTS: u32 = 1_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn dot_count_ok(n: usize) -> bool { n > 0 && n <= MAX_DOTS }
