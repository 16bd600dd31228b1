// Centralized tolerances for sampled-curve geometry

pub const SAMPLE_SEGMENTS: u32 = 50;      // 0.02 parameter step -> 51 points
pub const EPS_ENDPOINT: f32 = 0.1;        // shared-endpoint exemption distance (px)
pub const NEAR_PATH_TOL: f32 = 5.0;       // "place the dot here" click slack (px)
