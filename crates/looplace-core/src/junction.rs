use tinyvec::ArrayVec;

use crate::{Direction, EdgeId, XorPair};

/// Maximum number of distinct unordered direction pairs at a junction.
pub const MAX_INFERENCES: usize = 6;

/// Stable index of a junction in the board's junction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionId(pub(crate) u32);

impl JunctionId {
    /// Returns the raw table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One lattice intersection, connecting up to four edges.
///
/// Boundary junctions have fewer incident edges; the missing slots are
/// `None`, never a dangling id. The junction also carries the solver's
/// pending exclusive-or inferences, a small duplicate-checked set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junction {
    pub(crate) edges: [Option<EdgeId>; 4],
    pub(crate) inferences: ArrayVec<[XorPair; MAX_INFERENCES]>,
}

impl Junction {
    /// Returns the id of the incident edge in `dir`, if present.
    #[must_use]
    pub fn edge(&self, dir: Direction) -> Option<EdgeId> {
        self.edges[dir.index()]
    }

    /// Returns all four edge slots in slot order (N, S, W, E).
    #[must_use]
    pub const fn edges(&self) -> [Option<EdgeId>; 4] {
        self.edges
    }

    /// Returns the number of incident edges (2 at corners, 3 on borders,
    /// 4 in the interior).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// Returns the pending exclusive-or inferences.
    #[must_use]
    pub fn inferences(&self) -> &[XorPair] {
        &self.inferences
    }

    /// Returns `true` if a pending inference matches the direction pair
    /// (order-insensitive).
    #[must_use]
    pub fn has_inference(&self, d1: Direction, d2: Direction) -> bool {
        self.inferences.iter().any(|inf| inf.matches(d1, d2))
    }
}
