//! Sprouts: a two-player connection game on dots.
//!
//! Players take turns drawing a curve between two dots (or a loop on one
//! dot) and placing a new dot on it. Curves may not cross, and no dot may
//! carry more than three ends. The last player able to move wins.

pub mod board;
pub mod boundary;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod model;
pub mod snapshot;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod quadratic;
    pub mod shape;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod picking;
}
pub mod rules {
    pub mod execute;
    pub mod terminal;
    pub mod validate;
}

pub use board::Board;
pub use boundary::{Boundary, MaskBoundary, RectBoundary, Unbounded};
pub use config::GameConfig;
pub use controller::{GameController, Phase, Status};
pub use error::{ConfigError, MoveError, SelectionFault};
pub use layout::{FixedLayout, GridLayout, Layout, ScatterLayout};
pub use model::{Dot, DotId, Edge, EdgeKind, PendingEdge, Player, Vec2};
pub use snapshot::GameSnapshot;

/// Install a `tracing` subscriber that honours `RUST_LOG`, falling back to
/// `default_filter`. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
