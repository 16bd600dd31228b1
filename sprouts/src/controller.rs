//! Turn and selection state machine.
//!
//! The controller is the only owner of the board. Inbound commands move it
//! between phases; a rejected command leaves the committed board untouched and
//! records a [`Status`] for the UI.

use crate::algorithms::picking::pick_selectable;
use crate::board::Board;
use crate::boundary::{Boundary, Unbounded};
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError, SelectionFault};
use crate::geometry::limits::{dot_count_ok, in_coord_bounds, MAX_DOTS};
use crate::geometry::math::{distance, midpoint};
use crate::geometry::shape::near_path;
use crate::layout::Layout;
use crate::model::{DotId, EdgeKind, PendingEdge, Player, Vec2};
use crate::rules::execute::execute;
use crate::rules::terminal::has_any_legal_move;
use crate::rules::validate::MoveValidator;
use crate::snapshot::GameSnapshot;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    OneSelected { first: DotId },
    Shaping { pending: PendingEdge },
    /// Shape frozen; the control point only moves while `dragging`.
    Locked { pending: PendingEdge, dragging: bool },
    GameOver { winner: Player },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::OneSelected { .. } => "one_selected",
            Phase::Shaping { .. } => "shaping",
            Phase::Locked { .. } => "locked",
            Phase::GameOver { .. } => "game_over",
        }
    }

    pub fn pending(&self) -> Option<&PendingEdge> {
        match self {
            Phase::Shaping { pending } | Phase::Locked { pending, .. } => Some(pending),
            _ => None,
        }
    }
}

/// What the status line should say.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    Turn { player: Player },
    ChooseSecondDot { player: Player },
    PlaceDot { player: Player },
    SelectionUndone { player: Player },
    Rejected { player: Player, error: MoveError },
    GameOver { winner: Player },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStarted => write!(f, "Click \"Start\" to begin"),
            Status::Turn { player } => write!(f, "{player}'s turn"),
            Status::ChooseSecondDot { player } => {
                write!(f, "{player}'s turn: Choose a second dot, or the same dot again for a loop.")
            }
            Status::PlaceDot { player } => {
                write!(f, "{player}'s turn: Double-click on the curve to place a new dot.")
            }
            Status::SelectionUndone { player } => write!(f, "{player}'s turn: Selection undone."),
            Status::Rejected { error, .. } if error.is_rule_violation() => write!(f, "Invalid move: {error}"),
            Status::Rejected { player, error } => write!(f, "{player}'s turn: {error}"),
            Status::GameOver { winner } => write!(f, "Game Over! {winner} wins! (No valid moves remain)"),
        }
    }
}

pub struct GameController {
    config: GameConfig,
    boundary: Box<dyn Boundary>,
    layout: Option<Box<dyn Layout>>,
    dot_count: usize,
    board: Board,
    phase: Phase,
    status: Status,
}

impl Default for GameController {
    fn default() -> Self {
        GameController::with_valid_config(GameConfig::default())
    }
}

impl GameController {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameController::with_valid_config(config))
    }

    fn with_valid_config(config: GameConfig) -> Self {
        let board = Board::new(config.max_degree, config.loop_cost);
        GameController {
            config,
            boundary: Box::new(Unbounded),
            layout: None,
            dot_count: 0,
            board,
            phase: Phase::Idle,
            status: Status::NotStarted,
        }
    }

    /// Region new dots must land in. Applies from the next validation on.
    pub fn set_boundary(&mut self, boundary: Box<dyn Boundary>) {
        self.boundary = boundary;
    }

    pub fn with_boundary(mut self, boundary: impl Boundary + 'static) -> Self {
        self.boundary = Box::new(boundary);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn phase(&self) -> &Phase {
        &self.phase
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }
    pub fn is_started(&self) -> bool {
        self.layout.is_some()
    }
    pub fn pending(&self) -> Option<&PendingEdge> {
        self.phase.pending()
    }
    pub fn boundary(&self) -> &dyn Boundary {
        self.boundary.as_ref()
    }

    /// Dots currently highlighted: the first pick, or both ends of the pending edge.
    pub fn selection(&self) -> Vec<DotId> {
        match self.phase {
            Phase::OneSelected { first } => vec![first],
            Phase::Shaping { pending } | Phase::Locked { pending, .. } if pending.is_loop() => vec![pending.a],
            Phase::Shaping { pending } | Phase::Locked { pending, .. } => vec![pending.a, pending.b],
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }

    // ---- lifecycle ----

    /// Lay out a fresh board. The layout is kept for [`restart_game`](Self::restart_game).
    pub fn start_game(&mut self, dot_count: usize, layout: impl Layout + 'static) -> Result<(), ConfigError> {
        if !dot_count_ok(dot_count) {
            return Err(ConfigError::DotCount { got: dot_count, max: MAX_DOTS });
        }
        let mut layout: Box<dyn Layout> = Box::new(layout);
        self.lay_out(dot_count, layout.as_mut())?;
        self.layout = Some(layout);
        self.dot_count = dot_count;
        Ok(())
    }

    /// Same dot count and layout strategy as the last start.
    pub fn restart_game(&mut self) -> Result<(), ConfigError> {
        let mut layout = self.layout.take().ok_or(ConfigError::NotStarted)?;
        let res = self.lay_out(self.dot_count, layout.as_mut());
        self.layout = Some(layout);
        res
    }

    fn lay_out(&mut self, dot_count: usize, layout: &mut dyn Layout) -> Result<(), ConfigError> {
        let positions: Vec<Vec2> = layout
            .place(dot_count, &self.config)
            .into_iter()
            .filter(|p| in_coord_bounds(p.x) && in_coord_bounds(p.y))
            .collect();
        if positions.is_empty() {
            return Err(ConfigError::LayoutShort { placed: 0, requested: dot_count });
        }
        if positions.len() < dot_count {
            tracing::warn!(requested = dot_count, placed = positions.len(), "layout placed fewer dots");
        }
        self.board = Board::from_positions(&positions, &self.config);
        self.phase = Phase::Idle;
        self.status = Status::Turn { player: self.board.current_player() };
        tracing::info!(dots = positions.len(), "game started");
        Ok(())
    }

    // ---- selection ----

    /// Select the non-saturated dot nearest to `p`. Clicking empty space is a
    /// no-op and yields `None`.
    pub fn select_at(&mut self, p: Vec2) -> Result<Option<DotId>, MoveError> {
        self.ensure_active()?;
        match pick_selectable(&self.board, p, self.config.pick_radius) {
            Some(id) => self.select_dot(id).map(|_| Some(id)),
            None => Ok(None),
        }
    }

    /// First pick selects, a second distinct pick opens a curve, picking the
    /// same dot twice opens a loop.
    pub fn select_dot(&mut self, id: DotId) -> Result<(), MoveError> {
        tracing::debug!(id, phase = self.phase.name(), "select_dot");
        self.ensure_active()?;
        if self.board.dot(id).is_none() {
            return self.reject(SelectionFault::UnknownDot { id }.into());
        }
        match self.phase {
            Phase::Idle => {
                if self.board.is_saturated(id) {
                    return self.reject(MoveError::SaturatedDot { dot: id, max_degree: self.board.max_degree() });
                }
                self.phase = Phase::OneSelected { first: id };
                self.status = Status::ChooseSecondDot { player: self.board.current_player() };
                Ok(())
            }
            Phase::OneSelected { first } if first == id => self.begin_loop_on_selected_dot(),
            Phase::OneSelected { first } => {
                if self.board.is_saturated(id) {
                    return self.reject(MoveError::SaturatedDot { dot: id, max_degree: self.board.max_degree() });
                }
                let (Some(a), Some(b)) = (self.board.dot_pos(first), self.board.dot_pos(id)) else {
                    return self.reject(SelectionFault::UnknownDot { id: first }.into());
                };
                let cp = midpoint(a, b).offset(self.config.initial_offset);
                self.open_pending(PendingEdge::curve(first, id, cp));
                Ok(())
            }
            Phase::Shaping { .. } | Phase::Locked { .. } => self.reject(SelectionFault::ShapeInProgress.into()),
            Phase::GameOver { .. } => self.reject(SelectionFault::GameOver.into()),
        }
    }

    pub fn begin_loop_on_selected_dot(&mut self) -> Result<(), MoveError> {
        self.ensure_active()?;
        let first = match self.phase {
            Phase::OneSelected { first } => first,
            Phase::Shaping { .. } | Phase::Locked { .. } => {
                return self.reject(SelectionFault::ShapeInProgress.into())
            }
            _ => return self.reject(SelectionFault::NoSelection.into()),
        };
        if !self.board.can_loop(first) {
            return self.reject(MoveError::SaturatedDot { dot: first, max_degree: self.board.max_degree() });
        }
        let Some(a) = self.board.dot_pos(first) else {
            return self.reject(SelectionFault::UnknownDot { id: first }.into());
        };
        self.open_pending(PendingEdge::self_loop(first, a.offset(self.config.initial_loop_offset)));
        Ok(())
    }

    fn open_pending(&mut self, pending: PendingEdge) {
        tracing::debug!(a = pending.a, b = pending.b, kind = pending.kind.code(), "pending edge opened");
        self.phase = Phase::Shaping { pending };
        self.status = Status::PlaceDot { player: self.board.current_player() };
    }

    // ---- shaping ----

    /// Switch the pending edge between straight and curved. Loops stay curved.
    pub fn set_pending_straight(&mut self, straight: bool) -> Result<(), MoveError> {
        self.ensure_active()?;
        let initial_offset = self.config.initial_offset;
        let Some((a, b, is_loop)) = self.pending().map(|p| (p.a, p.b, p.is_loop())) else {
            return self.reject(SelectionFault::NoPendingEdge.into());
        };
        if is_loop {
            return if straight { self.reject(SelectionFault::DegenerateEdge.into()) } else { Ok(()) };
        }
        let mid = match (self.board.dot_pos(a), self.board.dot_pos(b)) {
            (Some(pa), Some(pb)) => midpoint(pa, pb),
            _ => return self.reject(SelectionFault::UnknownDot { id: a.max(b) }.into()),
        };
        if let Some(pending) = self.pending_mut() {
            match (straight, pending.kind) {
                (true, _) => pending.kind = EdgeKind::Straight,
                (false, EdgeKind::Straight) => pending.kind = EdgeKind::Curve { cp: mid.offset(initial_offset) },
                (false, _) => {}
            }
        }
        Ok(())
    }

    /// Pointer tracking. Moves the control point while shaping or while the
    /// locked handle is being dragged; otherwise ignored. Never touches the
    /// status line, since pointer moves arrive continuously. Pointers outside
    /// the coordinate bounds are dropped like the layout's out-of-range dots.
    pub fn update_pending_control_point(&mut self, p: Vec2) -> Result<(), MoveError> {
        if !(in_coord_bounds(p.x) && in_coord_bounds(p.y)) {
            tracing::warn!(x = p.x, y = p.y, "pointer outside coordinate bounds ignored");
            return Ok(());
        }
        match &mut self.phase {
            Phase::Shaping { pending } | Phase::Locked { pending, dragging: true } => {
                pending.set_control_point(p);
                Ok(())
            }
            Phase::Locked { dragging: false, .. } => Ok(()),
            _ => Err(SelectionFault::NoPendingEdge.into()),
        }
    }

    /// Freeze the shape so it stops following the pointer.
    pub fn lock_pending_shape(&mut self) -> Result<(), MoveError> {
        self.ensure_active()?;
        match self.phase {
            Phase::Shaping { pending } => {
                self.phase = Phase::Locked { pending, dragging: false };
                Ok(())
            }
            Phase::Locked { .. } => Ok(()),
            _ => self.reject(SelectionFault::NoPendingEdge.into()),
        }
    }

    /// Start dragging the control point if `p` is on its handle.
    pub fn grab_control_point(&mut self, p: Vec2) -> Result<(), MoveError> {
        self.ensure_active()?;
        let Some(pending) = self.pending().copied() else {
            return self.reject(SelectionFault::NoPendingEdge.into());
        };
        match pending.control_point() {
            Some(cp) if distance(cp, p) < self.config.grab_radius => {
                self.phase = Phase::Locked { pending, dragging: true };
                Ok(())
            }
            _ => self.reject(SelectionFault::MissControlPoint.into()),
        }
    }

    pub fn release_control_point(&mut self) {
        if let Phase::Locked { dragging, .. } = &mut self.phase {
            *dragging = false;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Locked { dragging: true, .. })
    }

    fn pending_mut(&mut self) -> Option<&mut PendingEdge> {
        match &mut self.phase {
            Phase::Shaping { pending } | Phase::Locked { pending, .. } => Some(pending),
            _ => None,
        }
    }

    // ---- commit ----

    /// Commit the pending edge when `p` is on its path.
    ///
    /// Off-path clicks keep the pending edge (now locked) so the player can
    /// try again. A rule violation discards it and returns to idle. On
    /// success the turn passes and the terminal search runs; when nothing is
    /// left the player who just moved wins.
    pub fn attempt_commit(&mut self, p: Vec2) -> Result<DotId, MoveError> {
        tracing::debug!(x = p.x, y = p.y, phase = self.phase.name(), "attempt_commit");
        self.ensure_active()?;
        let Some(pending) = self.pending().copied() else {
            return self.reject(SelectionFault::NoPendingEdge.into());
        };
        self.phase = Phase::Locked { pending, dragging: false };
        let Some(shape) = self.board.pending_shape(&pending) else {
            self.phase = Phase::Idle;
            return self.reject(SelectionFault::UnknownDot { id: pending.a.max(pending.b) }.into());
        };
        if !near_path(p, &shape, self.config.near_path_tolerance, self.config.sample_segments) {
            return self.reject(MoveError::OffPath);
        }
        let validator = MoveValidator::new(self.config.intersect_opts(), self.boundary.as_ref());
        if let Err(e) = validator.validate(&self.board, &pending) {
            self.phase = Phase::Idle;
            return self.reject(e);
        }
        let mover = self.board.current_player();
        let new_dot = match execute(&mut self.board, &pending) {
            Ok(id) => id,
            Err(e) => {
                self.phase = Phase::Idle;
                return self.reject(e);
            }
        };
        if has_any_legal_move(&self.board, &self.config, self.boundary.as_ref()) {
            self.phase = Phase::Idle;
            self.status = Status::Turn { player: self.board.current_player() };
        } else {
            self.board.declare_winner(mover);
            self.phase = Phase::GameOver { winner: mover };
            self.status = Status::GameOver { winner: mover };
            tracing::info!(winner = mover.number(), edges = self.board.edge_count(), "game over");
        }
        Ok(new_dot)
    }

    /// Step back one selection stage. Committed moves are never undone.
    pub fn undo(&mut self) -> Result<(), MoveError> {
        self.ensure_active()?;
        match self.phase {
            Phase::Shaping { pending } | Phase::Locked { pending, .. } => {
                self.phase = Phase::OneSelected { first: pending.a };
            }
            Phase::OneSelected { .. } => self.phase = Phase::Idle,
            _ => return self.reject(SelectionFault::NothingToUndo.into()),
        }
        self.status = Status::SelectionUndone { player: self.board.current_player() };
        Ok(())
    }

    fn ensure_active(&mut self) -> Result<(), MoveError> {
        if !self.is_started() {
            return Err(SelectionFault::NotStarted.into());
        }
        if matches!(self.phase, Phase::GameOver { .. }) {
            return Err(SelectionFault::GameOver.into());
        }
        Ok(())
    }

    fn reject<T>(&mut self, error: MoveError) -> Result<T, MoveError> {
        tracing::debug!(code = error.code(), %error, phase = self.phase.name(), "command rejected");
        self.status = Status::Rejected { player: self.board.current_player(), error };
        Err(error)
    }
}
