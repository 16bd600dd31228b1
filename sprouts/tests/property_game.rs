use proptest::prelude::*;
use sprouts::{FixedLayout, GameConfig, GameController, Player, Vec2};

#[derive(Clone, Debug)]
enum Op {
    Select { idx: u16 },
    Straight { on: bool },
    MoveControl { x: i16, y: i16 },
    Lock,
    Grab { dx: i8, dy: i8 },
    Release,
    CommitAtSplit,
    CommitAt { x: i16, y: i16 },
    Undo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u16>().prop_map(|idx| Op::Select { idx }),
        1 => any::<bool>().prop_map(|on| Op::Straight { on }),
        2 => (0i16..1000, 0i16..600).prop_map(|(x, y)| Op::MoveControl { x, y }),
        1 => Just(Op::Lock),
        1 => (any::<i8>(), any::<i8>()).prop_map(|(dx, dy)| Op::Grab { dx, dy }),
        1 => Just(Op::Release),
        3 => Just(Op::CommitAtSplit),
        1 => (0i16..1000, 0i16..600).prop_map(|(x, y)| Op::CommitAt { x, y }),
        1 => Just(Op::Undo),
    ]
}

fn apply_op(g: &mut GameController, op: Op) -> bool {
    let count = g.board().dot_count();
    match op {
        Op::Select { idx } => {
            let _ = g.select_dot(idx as u32 % (count + 1));
        }
        Op::Straight { on } => {
            let _ = g.set_pending_straight(on);
        }
        Op::MoveControl { x, y } => {
            let _ = g.update_pending_control_point(Vec2::new(x as f32, y as f32));
        }
        Op::Lock => {
            let _ = g.lock_pending_shape();
        }
        Op::Grab { dx, dy } => {
            if let Some(cp) = g.pending().and_then(|p| p.control_point()) {
                let _ = g.grab_control_point(Vec2::new(cp.x + dx as f32 * 0.1, cp.y + dy as f32 * 0.1));
            }
        }
        Op::Release => g.release_control_point(),
        Op::CommitAtSplit => {
            let split = g
                .pending()
                .copied()
                .and_then(|p| g.board().pending_shape(&p))
                .map(|s| s.split_half().2);
            if let Some(split) = split {
                return g.attempt_commit(split).is_ok();
            }
        }
        Op::CommitAt { x, y } => {
            return g.attempt_commit(Vec2::new(x as f32, y as f32)).is_ok();
        }
        Op::Undo => {
            let _ = g.undo();
        }
    }
    false
}

fn assert_invariants(g: &GameController, initial_dots: u32, commits: u32) {
    let board = g.board();
    for (i, d) in board.dots().iter().enumerate() {
        assert!(d.connections <= 3, "dot {} has {} connections", i, d.connections);
    }
    assert_eq!(board.edge_count(), 2 * commits);
    assert_eq!(board.dot_count(), initial_dots + commits);
    // Each move adds two ends to old dots and a fresh dot carrying two more.
    assert_eq!(board.total_degree(), 4 * commits);
    for e in board.edges() {
        assert!(board.dot(e.a).is_some() && board.dot(e.b).is_some());
    }
    let expected = if commits % 2 == 0 { Player::One } else { Player::Two };
    if !board.is_over() {
        assert_eq!(board.current_player(), expected);
    }
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..60)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn command_sequences_keep_board_invariants(seq in sequence_strategy()) {
        let positions = vec![
            Vec2::new(200.0, 150.0),
            Vec2::new(700.0, 180.0),
            Vec2::new(450.0, 420.0),
            Vec2::new(820.0, 460.0),
        ];
        let mut g = GameController::new(GameConfig::default()).unwrap();
        g.start_game(positions.len(), FixedLayout(positions)).unwrap();
        let initial = g.board().dot_count();
        let mut commits = 0u32;
        for op in seq {
            let before = g.board().edge_count();
            let player = g.board().current_player();
            if apply_op(&mut g, op) {
                commits += 1;
            } else {
                // Rejected or non-committing commands never touch the board.
                prop_assert_eq!(g.board().edge_count(), before);
                prop_assert_eq!(g.board().current_player(), player);
            }
            assert_invariants(&g, initial, commits);
        }
    }
}
