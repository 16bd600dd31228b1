//! Detects positions where no legal move remains.
//!
//! The search tries every non-saturated dot pair (and every dot that can still
//! take a loop) with a fixed palette of control-point offsets. A candidate is
//! open when both halves it would produce cross nothing and its split point
//! lies on the board. Shapes outside the palette are never tried, so an
//! exotic winding path can be missed; the palette is configurable.

use crate::board::Board;
use crate::boundary::Boundary;
use crate::config::GameConfig;
use crate::geometry::math::midpoint;
use crate::model::PendingEdge;
use crate::rules::validate::MoveValidator;

/// Lazily enumerate the palette candidates that would be legal right now.
pub fn candidate_moves<'a>(
    board: &'a Board,
    config: &'a GameConfig,
    boundary: &'a dyn Boundary,
) -> impl Iterator<Item = PendingEdge> + 'a {
    let n = board.dot_count();
    let offsets = &config.candidate_offsets;
    let validator = MoveValidator::new(config.intersect_opts(), boundary);
    (0..n)
        .filter(move |&i| !board.is_saturated(i))
        .flat_map(move |i| {
            let a = board.dots[i as usize].pos();
            let loops = board
                .can_loop(i)
                .then_some(())
                .into_iter()
                .flat_map(move |_| offsets.iter().map(move |&o| PendingEdge::self_loop(i, a.offset(o))));
            let pairs = (i + 1..n)
                .filter(move |&j| !board.is_saturated(j))
                .flat_map(move |j| {
                    let m = midpoint(a, board.dots[j as usize].pos());
                    offsets.iter().map(move |&o| PendingEdge::curve(i, j, m.offset(o)))
                });
            loops.chain(pairs)
        })
        .filter(move |p| is_open(board, &validator, p))
}

fn is_open(board: &Board, validator: &MoveValidator<'_>, pending: &PendingEdge) -> bool {
    let Some(shape) = board.pending_shape(pending) else {
        return false;
    };
    let (first, second, split) = shape.split_half();
    validator.check_containment(split).is_ok()
        && validator.first_crossing(board, &first).is_none()
        && validator.first_crossing(board, &second).is_none()
}

pub fn has_any_legal_move(board: &Board, config: &GameConfig, boundary: &dyn Boundary) -> bool {
    match candidate_moves(board, config, boundary).next() {
        Some(found) => {
            tracing::trace!(a = found.a, b = found.b, "legal move remains");
            true
        }
        None => {
            tracing::debug!(dots = board.dot_count(), edges = board.edge_count(), "no legal move remains");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{RectBoundary, Unbounded};
    use crate::model::Vec2;

    fn board_with(positions: &[(f32, f32)]) -> Board {
        let pts: Vec<Vec2> = positions.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
        Board::from_positions(&pts, &GameConfig::default())
    }

    #[test]
    fn single_fresh_dot_can_still_loop() {
        let b = board_with(&[(500.0, 300.0)]);
        assert!(has_any_legal_move(&b, &GameConfig::default(), &Unbounded));
        let first = candidate_moves(&b, &GameConfig::default(), &Unbounded).next().unwrap();
        assert!(first.is_loop());
    }

    #[test]
    fn saturated_board_has_no_moves() {
        let mut b = board_with(&[(100.0, 100.0), (300.0, 100.0)]);
        b.dots[0].connections = 3;
        b.dots[1].connections = 3;
        assert!(!has_any_legal_move(&b, &GameConfig::default(), &Unbounded));
    }

    #[test]
    fn lone_dot_with_two_connections_is_terminal() {
        let mut b = board_with(&[(100.0, 100.0)]);
        b.dots[0].connections = 2;
        assert!(!has_any_legal_move(&b, &GameConfig::default(), &Unbounded));
    }

    #[test]
    fn pairs_are_tried_when_loops_are_exhausted() {
        let mut b = board_with(&[(100.0, 100.0), (300.0, 100.0)]);
        b.dots[0].connections = 2;
        b.dots[1].connections = 2;
        let moves: Vec<PendingEdge> = candidate_moves(&b, &GameConfig::default(), &Unbounded).collect();
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|m| (m.a, m.b) == (0, 1)));
    }

    #[test]
    fn boundary_rules_out_candidates() {
        let b = board_with(&[(5.0, 5.0)]);
        // Loop splits land halfway to the control point, well outside this box
        let tiny = RectBoundary::new(4.0, 4.0, 2.0, 2.0);
        assert!(!has_any_legal_move(&b, &GameConfig::default(), &tiny));
    }

    #[test]
    fn search_does_not_mutate() {
        let b = board_with(&[(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)]);
        let before = (b.dots.clone(), b.edges.clone());
        let _ = candidate_moves(&b, &GameConfig::default(), &Unbounded).count();
        assert_eq!(before, (b.dots.clone(), b.edges.clone()));
    }
}
