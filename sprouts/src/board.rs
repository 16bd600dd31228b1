//! The committed game state: dots, connections and whose turn it is.

use crate::config::GameConfig;
use crate::geometry::shape::EdgeShape;
use crate::model::{Dot, DotId, Edge, PendingEdge, Player, Vec2};
use crate::rules::execute::Split;

/// Connections a split dot is born with: one to each half.
pub const SPLIT_DOT_DEGREE: u8 = 2;

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) dots: Vec<Dot>,   // id is index
    pub(crate) edges: Vec<Edge>, // append-only
    pub(crate) current: Player,
    pub(crate) winner: Option<Player>,
    max_degree: u8,
    loop_cost: u8,
}

impl Board {
    pub fn new(max_degree: u8, loop_cost: u8) -> Self {
        Board {
            dots: Vec::new(),
            edges: Vec::new(),
            current: Player::One,
            winner: None,
            max_degree,
            loop_cost,
        }
    }

    pub fn from_positions(positions: &[Vec2], config: &GameConfig) -> Self {
        let mut board = Board::new(config.max_degree, config.loop_cost);
        for &p in positions {
            board.add_dot(p);
        }
        board
    }

    fn add_dot(&mut self, p: Vec2) -> DotId {
        self.push_dot(p, 0)
    }

    fn push_dot(&mut self, p: Vec2, connections: u8) -> DotId {
        let id = self.dots.len() as DotId;
        self.dots.push(Dot { x: p.x, y: p.y, connections });
        id
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn dot(&self, id: DotId) -> Option<&Dot> {
        self.dots.get(id as usize)
    }
    pub fn dot_pos(&self, id: DotId) -> Option<Vec2> {
        self.dot(id).map(Dot::pos)
    }
    pub fn dot_count(&self) -> u32 {
        self.dots.len() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.edges.len() as u32
    }
    pub fn current_player(&self) -> Player {
        self.current
    }
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
    pub fn max_degree(&self) -> u8 {
        self.max_degree
    }
    pub fn loop_cost(&self) -> u8 {
        self.loop_cost
    }

    pub fn is_saturated(&self, id: DotId) -> bool {
        self.dot(id).map_or(false, |d| d.connections >= self.max_degree)
    }

    /// Whether a loop may still start and end on this dot.
    pub fn can_loop(&self, id: DotId) -> bool {
        self.dot(id)
            .map_or(false, |d| d.connections as u16 + self.loop_cost as u16 <= self.max_degree as u16)
    }

    pub fn total_degree(&self) -> u32 {
        self.dots.iter().map(|d| d.connections as u32).sum()
    }

    /// Connection ends still available across all dots.
    pub fn free_capacity(&self) -> u32 {
        self.dots
            .iter()
            .map(|d| self.max_degree.saturating_sub(d.connections) as u32)
            .sum()
    }

    pub fn edge_shape(&self, edge: &Edge) -> Option<EdgeShape> {
        Some(EdgeShape::new(self.dot_pos(edge.a)?, self.dot_pos(edge.b)?, edge.kind))
    }

    /// Committed connections resolved to geometry, paired with their index.
    pub fn edge_shapes(&self) -> impl Iterator<Item = (u32, EdgeShape)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| self.edge_shape(e).map(|s| (i as u32, s)))
    }

    pub fn pending_shape(&self, pending: &PendingEdge) -> Option<EdgeShape> {
        Some(EdgeShape::new(self.dot_pos(pending.a)?, self.dot_pos(pending.b)?, pending.kind))
    }

    /// Apply a validated move.
    ///
    /// Charges the endpoints (a loop pays `loop_cost` on its single dot),
    /// spawns the split dot with two connections, appends the two halves and
    /// hands the turn over. Returns the new dot.
    pub fn commit_split(&mut self, pending: &PendingEdge, split: &Split) -> DotId {
        if pending.is_loop() {
            self.charge(pending.a, self.loop_cost);
        } else {
            debug_assert_ne!(pending.a, pending.b, "non-loop edge with equal endpoints");
            self.charge(pending.a, 1);
            self.charge(pending.b, 1);
        }
        let new_dot = self.push_dot(split.position, SPLIT_DOT_DEGREE);
        self.edges.push(Edge { a: pending.a, b: new_dot, kind: split.first });
        self.edges.push(Edge { a: new_dot, b: pending.b, kind: split.second });
        self.current = self.current.other();
        new_dot
    }

    fn charge(&mut self, id: DotId, n: u8) {
        let max = self.max_degree;
        if let Some(d) = self.dots.get_mut(id as usize) {
            debug_assert!(d.connections + n <= max, "dot {} over degree", id);
            d.connections = d.connections.saturating_add(n).min(max);
        }
    }

    pub(crate) fn declare_winner(&mut self, winner: Player) {
        self.winner = Some(winner);
    }
}
