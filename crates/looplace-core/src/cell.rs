use crate::{Direction, EdgeId};

/// One grid square, optionally hinted with its required line count (0-3).
///
/// A cell only stores its hint and the ids of its four bounding edges; the
/// edge states themselves live in the board's edge arena so that each edge
/// is shared with the adjacent cell and both endpoint junctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub(crate) hint: Option<u8>,
    pub(crate) edges: [EdgeId; 4],
}

impl Cell {
    /// Returns the hint, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<u8> {
        self.hint
    }

    /// Returns the id of the bounding edge in `dir`.
    #[must_use]
    pub fn edge(&self, dir: Direction) -> EdgeId {
        self.edges[dir.index()]
    }

    /// Returns all four bounding edge ids in slot order (N, S, W, E).
    #[must_use]
    pub const fn edges(&self) -> [EdgeId; 4] {
        self.edges
    }
}
