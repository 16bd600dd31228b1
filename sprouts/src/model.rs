use serde::{Deserialize, Serialize};
use std::fmt;

/// Dots are addressed by their placement index.
pub type DotId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn offset(self, d: Vec2) -> Vec2 {
        Vec2 { x: self.x + d.x, y: self.y + d.y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub connections: u8,
}

impl Dot {
    pub fn pos(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }
}

/// Geometry of a connection. A loop starts and ends on the same dot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EdgeKind {
    Straight,
    Curve { cp: Vec2 },
    Loop { cp: Vec2 },
}

impl EdgeKind {
    pub fn control_point(&self) -> Option<Vec2> {
        match *self {
            EdgeKind::Straight => None,
            EdgeKind::Curve { cp } | EdgeKind::Loop { cp } => Some(cp),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            EdgeKind::Straight => 0,
            EdgeKind::Curve { .. } => 1,
            EdgeKind::Loop { .. } => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: DotId,
    pub b: DotId,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// An in-progress connection owned by the controller until commit or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingEdge {
    pub a: DotId,
    pub b: DotId,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

impl PendingEdge {
    pub fn curve(a: DotId, b: DotId, cp: Vec2) -> Self {
        PendingEdge { a, b, kind: EdgeKind::Curve { cp } }
    }

    pub fn straight(a: DotId, b: DotId) -> Self {
        PendingEdge { a, b, kind: EdgeKind::Straight }
    }

    pub fn self_loop(dot: DotId, cp: Vec2) -> Self {
        PendingEdge { a: dot, b: dot, kind: EdgeKind::Loop { cp } }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self.kind, EdgeKind::Loop { .. })
    }

    pub fn control_point(&self) -> Option<Vec2> {
        self.kind.control_point()
    }

    /// Moves the control point; straight shapes have none and are left as-is.
    pub fn set_control_point(&mut self, p: Vec2) {
        match &mut self.kind {
            EdgeKind::Straight => {}
            EdgeKind::Curve { cp } | EdgeKind::Loop { cp } => *cp = p,
        }
    }
}
