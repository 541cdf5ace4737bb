//! Domain entities: core data structures

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Opaque identifier shared by nodes and edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Free-form 2D coordinate on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift by an offset.
    pub fn translate(self, offset: Offset) -> Self {
        Self::new(self.x + offset.dx, self.y + offset.dy)
    }
}

impl Sub for Position {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Displacement between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    /// Where new and pasted content lands relative to its parent: below-left.
    pub const RELOCATION: Offset = Offset::new(-250.0, 120.0);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Self) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Node of the account hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Identity,
    pub position: Position,
    pub label: String,
}

impl Node {
    pub fn new(id: impl Into<Identity>, position: Position, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            label: label.into(),
        }
    }
}

/// Directed parent -> child relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: Identity,
    pub source: Identity,
    pub target: Identity,
}

impl Edge {
    pub fn new(
        id: impl Into<Identity>,
        source: impl Into<Identity>,
        target: impl Into<Identity>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Self-contained node/edge set rooted at its first node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subtree {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Subtree {
    /// The subtree root; cloned subtrees always list it first.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }
}

/// Authoritative full state handed to the renderer after every mutation.
pub type Snapshot = Subtree;
