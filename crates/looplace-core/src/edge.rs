use crate::JunctionId;

/// The tri-state assignment of a single board edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EdgeState {
    /// Not yet decided either way.
    #[default]
    #[display("?")]
    Undetermined,
    /// Part of the solution loop.
    #[display("-")]
    Line,
    /// Definitely not part of the loop ("x" in pencil-and-paper notation).
    #[display("x")]
    Cross,
}

impl EdgeState {
    /// Returns `true` when the edge has been decided either way.
    #[must_use]
    pub const fn is_determined(self) -> bool {
        !matches!(self, Self::Undetermined)
    }

    /// Returns `true` for [`EdgeState::Line`].
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, Self::Line)
    }

    /// Returns `true` for [`EdgeState::Cross`].
    #[must_use]
    pub const fn is_cross(self) -> bool {
        matches!(self, Self::Cross)
    }
}

/// Stable index of an edge in the board's edge arena.
///
/// The same id is referenced by the two cells bordering the edge and by its
/// two endpoint junctions, so a single state write is visible to all four
/// viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single grid segment between two adjacent junctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub(crate) state: EdgeState,
    pub(crate) vertical: bool,
    pub(crate) endpoints: [JunctionId; 2],
}

impl Edge {
    /// Returns the current tri-state assignment.
    #[must_use]
    pub const fn state(&self) -> EdgeState {
        self.state
    }

    /// Returns `true` for vertical edges (used only for display).
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        self.vertical
    }

    /// Returns the two endpoint junctions, ordered north/west first.
    #[must_use]
    pub const fn endpoints(&self) -> [JunctionId; 2] {
        self.endpoints
    }

    /// Returns the endpoint opposite to `junction`.
    ///
    /// # Panics
    ///
    /// Panics if `junction` is not an endpoint of this edge.
    #[must_use]
    pub fn other_endpoint(&self, junction: JunctionId) -> JunctionId {
        if self.endpoints[0] == junction {
            self.endpoints[1]
        } else {
            assert_eq!(self.endpoints[1], junction, "junction is not an endpoint");
            self.endpoints[0]
        }
    }
}
