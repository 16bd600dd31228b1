use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprouts::rules::terminal::candidate_moves;
use sprouts::{GameConfig, GameController, ScatterLayout};
use std::time::Instant;

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

/// Plays one seeded random game to the end. Returns per-commit times (ms),
/// which include the terminal search, and the number of commits.
fn play(dots: usize, seed: u64) -> Result<(Vec<f64>, usize), String> {
    let mut game = GameController::new(GameConfig::default()).map_err(|e| e.to_string())?;
    game.start_game(dots, ScatterLayout::new(seed)).map_err(|e| e.to_string())?;
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut times = Vec::new();
    let mut rejected = 0usize;
    while !game.board().is_over() {
        let options: Vec<_> = candidate_moves(game.board(), game.config(), game.boundary()).take(64).collect();
        if options.is_empty() { return Err("open position with no candidate".into()); }
        let pick = options[rng.gen_range(0..options.len())];
        let Some(shape) = game.board().pending_shape(&pick) else { return Err("candidate names a missing dot".into()); };
        let (_, _, split) = shape.split_half();
        game.select_dot(pick.a).map_err(|e| e.to_string())?;
        game.select_dot(pick.b).map_err(|e| e.to_string())?;
        if let Some(cp) = pick.control_point() { game.update_pending_control_point(cp).map_err(|e| e.to_string())?; }
        let t0 = Instant::now();
        match game.attempt_commit(split) {
            Ok(_) => times.push(t0.elapsed().as_secs_f64() * 1000.0),
            // The search samples the two halves, the validator the whole curve.
            Err(e) if rejected < 100 => { rejected += 1; tracing::debug!(%e, "candidate rejected on commit"); }
            Err(e) => return Err(format!("{} candidates rejected, last: {}", rejected, e)),
        }
    }
    let commits = times.len();
    Ok((times, commits))
}

fn main() {
    sprouts::init_tracing("warn");
    let args: Vec<String> = std::env::args().collect();
    let mut games = 20usize;
    let mut dots = 8usize;
    let mut seed = 1u64;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--games=") { if let Ok(v)=val.parse() { games=v; } }
        else if let Some(val)=a.strip_prefix("--dots=") { if let Ok(v)=val.parse() { dots=v; } }
        else if let Some(val)=a.strip_prefix("--seed=") { if let Ok(v)=val.parse() { seed=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut times_ms: Vec<f64> = Vec::new();
    let mut total_commits = 0usize;
    let start_all = Instant::now();
    for g in 0..games {
        match play(dots, seed + g as u64) {
            Ok((t, commits)) => { times_ms.extend(t); total_commits += commits; }
            Err(e) => { eprintln!("FAIL: game {} (seed {}): {}", g, seed + g as u64, e); std::process::exit(1); }
        }
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("games={} dots={} commits={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", games, dots, total_commits, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
