//! Game tunables.
//!
//! Defaults reproduce the classic board: 1000×600 logical pixels, degree cap
//! of three, loops costing two connection ends and curves sampled at a 0.02
//! parameter step.

use crate::board::SPLIT_DOT_DEGREE;
use crate::error::ConfigError;
use crate::geometry::intersect::IntersectOpts;
use crate::geometry::limits::MAX_SAMPLE_SEGMENTS;
use crate::geometry::tolerance::{EPS_ENDPOINT, NEAR_PATH_TOL, SAMPLE_SEGMENTS};
use crate::model::Vec2;
use serde::{Deserialize, Serialize};

/// Control-point offsets tried by the terminal search.
pub const DEFAULT_CANDIDATE_OFFSETS: [Vec2; 6] = [
    Vec2::new(30.0, -30.0),
    Vec2::new(-30.0, 30.0),
    Vec2::new(40.0, 0.0),
    Vec2::new(0.0, 40.0),
    Vec2::new(-40.0, 0.0),
    Vec2::new(0.0, -40.0),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_degree: u8,
    pub loop_cost: u8,
    pub sample_segments: u32,
    pub endpoint_eps: f32,
    pub near_path_tolerance: f32,
    pub pick_radius: f32,
    pub grab_radius: f32,
    /// Offset from the endpoints' midpoint for a fresh curve's control point.
    pub initial_offset: Vec2,
    /// Offset from the dot for a fresh loop's control point.
    pub initial_loop_offset: Vec2,
    pub candidate_offsets: Vec<Vec2>,
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub min_dot_spacing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_degree: 3,
            loop_cost: 2,
            sample_segments: SAMPLE_SEGMENTS,
            endpoint_eps: EPS_ENDPOINT,
            near_path_tolerance: NEAR_PATH_TOL,
            pick_radius: 10.0,
            grab_radius: 10.0,
            initial_offset: Vec2::new(30.0, -30.0),
            initial_loop_offset: Vec2::new(0.0, -60.0),
            candidate_offsets: DEFAULT_CANDIDATE_OFFSETS.to_vec(),
            width: 1000.0,
            height: 600.0,
            margin: 40.0,
            min_dot_spacing: 28.0,
        }
    }
}

impl GameConfig {
    pub fn from_json_value(v: serde_json::Value) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_value(v)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_degree < SPLIT_DOT_DEGREE {
            return Err(ConfigError::MaxDegree { got: self.max_degree, min: SPLIT_DOT_DEGREE });
        }
        if self.loop_cost > self.max_degree {
            return Err(ConfigError::LoopCost { loop_cost: self.loop_cost, max_degree: self.max_degree });
        }
        if self.sample_segments == 0 {
            return Err(ConfigError::NotPositive { param: "sample_segments" });
        }
        if self.sample_segments > MAX_SAMPLE_SEGMENTS {
            return Err(ConfigError::OutOfRange {
                param: "sample_segments",
                got: self.sample_segments,
                max: MAX_SAMPLE_SEGMENTS,
            });
        }
        let positive = [
            ("endpoint_eps", self.endpoint_eps),
            ("near_path_tolerance", self.near_path_tolerance),
            ("pick_radius", self.pick_radius),
            ("grab_radius", self.grab_radius),
            ("width", self.width),
            ("height", self.height),
        ];
        for (param, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(ConfigError::NotPositive { param });
            }
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ConfigError::NotPositive { param: "margin" });
        }
        if !(self.min_dot_spacing.is_finite() && self.min_dot_spacing >= 0.0) {
            return Err(ConfigError::NotPositive { param: "min_dot_spacing" });
        }
        if self.candidate_offsets.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    pub fn intersect_opts(&self) -> IntersectOpts {
        IntersectOpts { segments: self.sample_segments, endpoint_eps: self.endpoint_eps }
    }
}
