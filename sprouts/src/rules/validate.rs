use crate::board::Board;
use crate::boundary::Boundary;
use crate::error::{MoveError, SelectionFault};
use crate::geometry::intersect::{shapes_intersect, IntersectOpts};
use crate::geometry::shape::EdgeShape;
use crate::model::{PendingEdge, Vec2};

/// Read-only move checks against a board.
pub struct MoveValidator<'a> {
    opts: IntersectOpts,
    boundary: &'a dyn Boundary,
}

impl<'a> MoveValidator<'a> {
    pub fn new(opts: IntersectOpts, boundary: &'a dyn Boundary) -> Self {
        Self { opts, boundary }
    }

    /// Degree, crossing and containment guards, in that order.
    pub fn validate(&self, board: &Board, pending: &PendingEdge) -> Result<(), MoveError> {
        self.check_degree(board, pending)?;
        let shape = board
            .pending_shape(pending)
            .ok_or(SelectionFault::UnknownDot { id: pending.a.max(pending.b) })?;
        self.check_crossing(board, &shape)?;
        let (_, _, split) = shape.split_half();
        self.check_containment(split)
    }

    pub fn check_degree(&self, board: &Board, pending: &PendingEdge) -> Result<(), MoveError> {
        for id in [pending.a, pending.b] {
            if board.dot(id).is_none() {
                return Err(SelectionFault::UnknownDot { id }.into());
            }
        }
        if pending.is_loop() {
            if pending.a != pending.b {
                return Err(SelectionFault::DegenerateEdge.into());
            }
            if !board.can_loop(pending.a) {
                return Err(MoveError::SaturatedDot { dot: pending.a, max_degree: board.max_degree() });
            }
            return Ok(());
        }
        if pending.a == pending.b {
            return Err(SelectionFault::DegenerateEdge.into());
        }
        for id in [pending.a, pending.b] {
            if board.is_saturated(id) {
                return Err(MoveError::SaturatedDot { dot: id, max_degree: board.max_degree() });
            }
        }
        Ok(())
    }

    /// Rejects with the index of the first committed edge the shape crosses.
    pub fn check_crossing(&self, board: &Board, shape: &EdgeShape) -> Result<(), MoveError> {
        match self.first_crossing(board, shape) {
            Some(edge) => Err(MoveError::CrossingViolation { edge }),
            None => Ok(()),
        }
    }

    pub fn first_crossing(&self, board: &Board, shape: &EdgeShape) -> Option<u32> {
        board
            .edge_shapes()
            .find(|(_, existing)| shapes_intersect(shape, existing, self.opts))
            .map(|(i, _)| i)
    }

    pub fn check_containment(&self, p: Vec2) -> Result<(), MoveError> {
        if self.boundary.contains(p) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds { x: p.x, y: p.y })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{RectBoundary, Unbounded};
    use crate::config::GameConfig;
    use crate::rules::execute::plan_split;

    fn board_with(positions: &[(f32, f32)]) -> Board {
        let pts: Vec<Vec2> = positions.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        Board::from_positions(&pts, &GameConfig::default())
    }

    fn commit(board: &mut Board, pending: PendingEdge) {
        let split = plan_split(&board.pending_shape(&pending).unwrap());
        board.commit_split(&pending, &split);
    }

    #[test]
    fn degree_guard_runs_before_crossing_guard() {
        let mut b = board_with(&[(0.0, 0.0), (100.0, 0.0), (50.0, -50.0), (50.0, 50.0)]);
        commit(&mut b, PendingEdge::straight(0, 1));
        b.dots[2].connections = 3;
        let v = MoveValidator::new(IntersectOpts::default(), &Unbounded);
        // Would also cross edge 0, but saturation is reported first
        assert_eq!(v.validate(&b, &PendingEdge::straight(2, 3)), Err(MoveError::SaturatedDot { dot: 2, max_degree: 3 }));
        b.dots[2].connections = 0;
        assert_eq!(v.validate(&b, &PendingEdge::straight(2, 3)), Err(MoveError::CrossingViolation { edge: 0 }));
    }

    #[test]
    fn loop_needs_room_for_two_ends() {
        let mut b = board_with(&[(0.0, 0.0)]);
        b.dots[0].connections = 2;
        let v = MoveValidator::new(IntersectOpts::default(), &Unbounded);
        let lp = PendingEdge::self_loop(0, Vec2::new(0.0, -60.0));
        assert_eq!(v.validate(&b, &lp), Err(MoveError::SaturatedDot { dot: 0, max_degree: 3 }));
        b.dots[0].connections = 1;
        assert_eq!(v.validate(&b, &lp), Ok(()));
    }

    #[test]
    fn self_pair_without_loop_kind_is_degenerate() {
        let b = board_with(&[(0.0, 0.0)]);
        let v = MoveValidator::new(IntersectOpts::default(), &Unbounded);
        assert_eq!(
            v.validate(&b, &PendingEdge::straight(0, 0)),
            Err(MoveError::InvalidSelectionState(SelectionFault::DegenerateEdge))
        );
    }

    #[test]
    fn containment_checks_the_split_point() {
        let b = board_with(&[(10.0, 10.0), (90.0, 10.0)]);
        let rect = RectBoundary::new(0.0, 0.0, 100.0, 100.0);
        let v = MoveValidator::new(IntersectOpts::default(), &rect);
        // Bulges above the top edge: split point at y = -20
        let out = PendingEdge::curve(0, 1, Vec2::new(50.0, -50.0));
        assert!(matches!(v.validate(&b, &out), Err(MoveError::OutOfBounds { .. })));
        let inside = PendingEdge::curve(0, 1, Vec2::new(50.0, 60.0));
        assert_eq!(v.validate(&b, &inside), Ok(()));
    }

    #[test]
    fn validation_never_mutates() {
        let mut b = board_with(&[(0.0, 0.0), (100.0, 0.0), (50.0, -50.0), (50.0, 50.0)]);
        commit(&mut b, PendingEdge::straight(0, 1));
        let before = (b.dots.clone(), b.edges.clone(), b.current_player());
        let v = MoveValidator::new(IntersectOpts::default(), &Unbounded);
        let _ = v.validate(&b, &PendingEdge::straight(2, 3));
        assert_eq!(before, (b.dots.clone(), b.edges.clone(), b.current_player()));
    }
}
