//! Read-only view of a game for rendering and persistence.

use crate::controller::{GameController, Phase, Status};
use crate::model::{DotId, EdgeKind, PendingEdge, Vec2};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DotView {
    pub id: DotId,
    pub x: f32,
    pub y: f32,
    pub connections: u8,
    pub saturated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeView {
    pub a: DotId,
    pub b: DotId,
    pub kind: &'static str,
    pub cp: Option<Vec2>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PendingView {
    pub a: DotId,
    pub b: DotId,
    pub kind: &'static str,
    pub cp: Option<Vec2>,
    pub locked: bool,
    pub dragging: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub dots: Vec<DotView>,
    pub edges: Vec<EdgeView>,
    pub pending: Option<PendingView>,
    pub selection: Vec<DotId>,
    pub phase: &'static str,
    pub current_player: u8,
    pub status: Status,
    pub message: String,
    pub game_over: bool,
    pub winner: Option<u8>,
}

fn kind_name(kind: &EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Straight => "straight",
        EdgeKind::Curve { .. } => "curve",
        EdgeKind::Loop { .. } => "loop",
    }
}

fn pending_view(pending: &PendingEdge, locked: bool, dragging: bool) -> PendingView {
    PendingView {
        a: pending.a,
        b: pending.b,
        kind: kind_name(&pending.kind),
        cp: pending.control_point(),
        locked,
        dragging,
    }
}

impl GameSnapshot {
    pub fn capture(game: &GameController) -> Self {
        let board = game.board();
        let dots = board
            .dots()
            .iter()
            .enumerate()
            .map(|(i, d)| DotView {
                id: i as DotId,
                x: d.x,
                y: d.y,
                connections: d.connections,
                saturated: d.connections >= board.max_degree(),
            })
            .collect();
        let edges = board
            .edges()
            .iter()
            .map(|e| EdgeView { a: e.a, b: e.b, kind: kind_name(&e.kind), cp: e.kind.control_point() })
            .collect();
        let pending = match game.phase() {
            Phase::Shaping { pending } => Some(pending_view(pending, false, false)),
            Phase::Locked { pending, dragging } => Some(pending_view(pending, true, *dragging)),
            _ => None,
        };
        GameSnapshot {
            dots,
            edges,
            pending,
            selection: game.selection(),
            phase: game.phase().name(),
            current_player: board.current_player().number(),
            status: game.status(),
            message: game.status_text(),
            game_over: board.is_over(),
            winner: board.winner().map(|w| w.number()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::controller::GameController;
    use crate::layout::FixedLayout;
    use crate::model::Vec2;

    #[test]
    fn json_view_lists_dots_edges_and_pending() {
        let mut g = GameController::new(GameConfig::default()).unwrap();
        g.start_game(2, FixedLayout(vec![Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)])).unwrap();
        g.select_dot(0).unwrap();
        g.select_dot(1).unwrap();
        let v = g.to_json_value();
        assert_eq!(v["dots"].as_array().unwrap().len(), 2);
        assert_eq!(v["pending"]["kind"], "curve");
        assert_eq!(v["pending"]["locked"], false);
        assert_eq!(v["selection"], serde_json::json!([0, 1]));
        assert_eq!(v["phase"], "shaping");
        assert_eq!(v["current_player"], 1);

        g.attempt_commit(Vec2::new(165.0, 85.0)).unwrap();
        let v = g.to_json_value();
        assert_eq!(v["edges"].as_array().unwrap().len(), 2);
        assert_eq!(v["edges"][0]["kind"], "curve");
        assert_eq!(v["dots"][2]["connections"], 2);
        assert!(v["pending"].is_null());
        assert_eq!(v["message"], "Player 2's turn");
        assert_eq!(v["status"]["status"], "turn");
    }
}
