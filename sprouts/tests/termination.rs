use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprouts::rules::terminal::candidate_moves;
use sprouts::{GameConfig, GameController, Player, ScatterLayout};

/// Plays random legal moves until the controller declares the game over.
/// Returns (commits, last mover).
fn play_out(dots: usize, seed: u64) -> (usize, Option<Player>) {
    let mut g = GameController::new(GameConfig::default()).unwrap();
    g.start_game(dots, ScatterLayout::new(seed)).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut commits = 0usize;
    let mut last = None;
    while !g.board().is_over() {
        let mut options: Vec<_> = candidate_moves(g.board(), g.config(), g.boundary()).take(12).collect();
        assert!(!options.is_empty(), "open game without a candidate move");
        let start = rng.gen_range(0..options.len());
        options.rotate_left(start);
        let mover = g.board().current_player();
        let committed = options.iter().any(|pick| {
            let split = g.board().pending_shape(pick).unwrap().split_half().2;
            g.select_dot(pick.a).unwrap();
            g.select_dot(pick.b).unwrap();
            if let Some(cp) = pick.control_point() {
                g.update_pending_control_point(cp).unwrap();
            }
            g.attempt_commit(split).is_ok()
        });
        assert!(committed, "no candidate move could be committed");
        commits += 1;
        last = Some(mover);
        assert!(commits <= 3 * dots, "game did not terminate");
    }
    assert_eq!(g.board().winner(), last);
    (commits, last)
}

#[test]
fn random_games_end_within_the_move_bound() {
    for dots in 1..=4 {
        for seed in 0..4u64 {
            let (commits, last) = play_out(dots, seed * 31 + dots as u64);
            // Each move uses one unit of free capacity and at least one unit
            // always remains on the newest dot.
            assert!(commits >= 1);
            assert!(commits <= 3 * dots - 1, "{} commits with {} dots", commits, dots);
            let expected = if commits % 2 == 1 { Player::One } else { Player::Two };
            assert_eq!(last, Some(expected));
        }
    }
}
