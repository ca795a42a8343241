//! Stable identities for global vertices and edges.
//!
//! A vertex is named after the first tile (in index order) that touches it,
//! together with that tile's local corner: `h3v2`. An edge is named by its
//! two endpoints in sorted order: `h0v0-h0v1`. Both serialize as these
//! strings so they can key JSON objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a vertex or edge identity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("malformed vertex id {0:?}, expected h<tile>v<corner>")]
    Vertex(String),

    #[error("corner index {0} out of range 0..6")]
    Corner(u8),

    #[error("malformed edge id {0:?}, expected <vertex>-<vertex>")]
    Edge(String),
}

/// Identity of a global vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VertexId {
    /// Tile that first touched this vertex
    pub tile: usize,
    /// Local corner on that tile (0..6)
    pub corner: u8,
}

impl VertexId {
    pub const fn new(tile: usize, corner: u8) -> Self {
        Self { tile, corner }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}v{}", self.tile, self.corner)
    }
}

impl FromStr for VertexId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IdParseError::Vertex(s.to_string());
        let (tile, corner) = s
            .strip_prefix('h')
            .and_then(|rest| rest.split_once('v'))
            .ok_or_else(malformed)?;
        let tile: usize = tile.parse().map_err(|_| malformed())?;
        let corner: u8 = corner.parse().map_err(|_| malformed())?;
        if corner >= 6 {
            return Err(IdParseError::Corner(corner));
        }
        Ok(Self::new(tile, corner))
    }
}

impl From<VertexId> for String {
    fn from(id: VertexId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for VertexId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Identity of a global edge: an unordered pair of distinct vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EdgeId {
    low: VertexId,
    high: VertexId,
}

impl EdgeId {
    /// Create an edge identity; endpoint order does not matter
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, smaller first
    pub fn endpoints(&self) -> [VertexId; 2] {
        [self.low, self.high]
    }

    pub fn touches(&self, vertex: VertexId) -> bool {
        self.low == vertex || self.high == vertex
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for EdgeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::Edge(s.to_string()))?;
        let (a, b): (VertexId, VertexId) = (a.parse()?, b.parse()?);
        if a == b {
            return Err(IdParseError::Edge(s.to_string()));
        }
        Ok(Self::new(a, b))
    }
}

impl From<EdgeId> for String {
    fn from(id: EdgeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EdgeId {
    type Error = IdParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
