use crate::board::Board;
use crate::error::{MoveError, SelectionFault};
use crate::geometry::shape::EdgeShape;
use crate::model::{DotId, EdgeKind, PendingEdge, Vec2};

/// Where a move spawns its dot and the shapes of the two resulting halves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    pub position: Vec2,
    pub first: EdgeKind,
    pub second: EdgeKind,
}

/// De Casteljau cut at t = 0.5, so the halves continue smoothly through the
/// new dot instead of kinking at it.
pub fn plan_split(shape: &EdgeShape) -> Split {
    let (first, second, position) = shape.split_half();
    Split { position, first: first.kind, second: second.kind }
}

/// Commit an already validated pending edge. Returns the spawned dot.
pub fn execute(board: &mut Board, pending: &PendingEdge) -> Result<DotId, MoveError> {
    let shape = board
        .pending_shape(pending)
        .ok_or(SelectionFault::UnknownDot { id: pending.a.max(pending.b) })?;
    let split = plan_split(&shape);
    let dot = board.commit_split(pending, &split);
    tracing::info!(
        a = pending.a,
        b = pending.b,
        new_dot = dot,
        x = split.position.x,
        y = split.position.y,
        "connection committed"
    );
    Ok(dot)
}
