//! Rejections surfaced by the engine.
//!
//! Every error here is a rejected command: the board is never touched before
//! a move is fully validated, so callers only need to show the message and
//! carry on.

use crate::model::DotId;
use serde::Serialize;

/// Why a command arrived in a state that cannot accept it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum SelectionFault {
    #[error("no dot with id {id}")]
    UnknownDot { id: DotId },
    #[error("no dot is selected")]
    NoSelection,
    #[error("no connection is being shaped")]
    NoPendingEdge,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("a connection needs two different dots unless it is a loop")]
    DegenerateEdge,
    #[error("the game is over")]
    GameOver,
    #[error("no game has been started")]
    NotStarted,
    #[error("the control point is not under the pointer")]
    MissControlPoint,
    #[error("a connection is already being shaped")]
    ShapeInProgress,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum MoveError {
    #[error("Dot already has {max_degree} connections.")]
    SaturatedDot { dot: DotId, max_degree: u8 },
    #[error("Line crosses another line.")]
    CrossingViolation { edge: u32 },
    #[error("New dot would fall outside the board.")]
    OutOfBounds { x: f32, y: f32 },
    #[error("{0}")]
    InvalidSelectionState(SelectionFault),
    #[error("Double-click on the curve to place a new dot.")]
    OffPath,
}

impl MoveError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::SaturatedDot { .. } => "saturated_dot",
            MoveError::CrossingViolation { .. } => "crossing_violation",
            MoveError::OutOfBounds { .. } => "out_of_bounds",
            MoveError::InvalidSelectionState(_) => "invalid_selection_state",
            MoveError::OffPath => "off_path",
        }
    }

    /// Whether the rejection came from the rules rather than the command flow.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            MoveError::SaturatedDot { .. }
                | MoveError::CrossingViolation { .. }
                | MoveError::OutOfBounds { .. }
        )
    }
}

impl From<SelectionFault> for MoveError {
    fn from(f: SelectionFault) -> Self {
        MoveError::InvalidSelectionState(f)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("dot count {got} must be between 1 and {max}")]
    DotCount { got: usize, max: usize },
    #[error("parameter '{param}' must be finite and positive")]
    NotPositive { param: &'static str },
    #[error("parameter '{param}' out of range: {got} (max {max})")]
    OutOfRange { param: &'static str, got: u32, max: u32 },
    #[error("maximum degree {got} cannot hold a split dot (needs at least {min})")]
    MaxDegree { got: u8, min: u8 },
    #[error("loop cost {loop_cost} exceeds the maximum degree {max_degree}")]
    LoopCost { loop_cost: u8, max_degree: u8 },
    #[error("no candidate offsets configured")]
    EmptyPalette,
    #[error("layout placed {placed} of {requested} dots")]
    LayoutShort { placed: usize, requested: usize },
    #[error("no game to restart")]
    NotStarted,
    #[error("invalid config json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}
