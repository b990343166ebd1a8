use looplace_core::{Direction, EdgeState};

/// A rejected edge mark.
///
/// Every variant is raised before the mark is recorded, and the board is
/// left exactly as it was. Coordinates identify the mark site (or the
/// violated cell/junction) so callers can point at the conflict.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum MoveError {
    /// The edge is already determined and override protection is on.
    #[display("edge at r:{row} c:{column} {direction} is already marked '{current}'")]
    OverwriteConflict {
        /// Cell row of the mark site.
        row: usize,
        /// Cell column of the mark site.
        column: usize,
        /// Direction of the marked edge relative to the cell.
        direction: Direction,
        /// The determined state already on the edge.
        current: EdgeState,
    },
    /// A bordering hinted cell already has all the lines its hint allows.
    #[display("cell at r:{row} c:{column} h:{hint} already has enough lines")]
    HintOverflow {
        /// Row of the violated cell.
        row: usize,
        /// Column of the violated cell.
        column: usize,
        /// The cell's hint.
        hint: u8,
    },
    /// Crossing this edge would leave a bordering hinted cell unable to
    /// reach its hint.
    #[display("cell at r:{row} c:{column} h:{hint} would not have enough lines left")]
    HintUnderflow {
        /// Row of the violated cell.
        row: usize,
        /// Column of the violated cell.
        column: usize,
        /// The cell's hint.
        hint: u8,
    },
    /// An endpoint junction already carries two lines.
    #[display("junction at r:{row} c:{column} already has two lines")]
    JunctionOverflow {
        /// Lattice row of the violated junction.
        row: usize,
        /// Lattice column of the violated junction.
        column: usize,
    },
    /// The line would close a cycle before the puzzle is solved.
    #[display("line at r:{row} c:{column} {direction} would close a loop before the puzzle is solved")]
    PrematureLoop {
        /// Cell row of the mark site.
        row: usize,
        /// Cell column of the mark site.
        column: usize,
        /// Direction of the marked edge relative to the cell.
        direction: Direction,
    },
}
