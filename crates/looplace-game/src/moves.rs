use looplace_core::{Direction, EdgeState};

/// One recorded edge mark, sufficient to undo or redo it.
///
/// Junction-addressed marks are translated to cell coordinates before
/// recording, so a move always names the edge by a bordering cell and a
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Cell row of the mark site.
    pub row: usize,
    /// Cell column of the mark site.
    pub column: usize,
    /// Direction of the marked edge relative to the cell.
    pub direction: Direction,
    /// Edge state before the mark.
    pub from: EdgeState,
    /// Edge state after the mark.
    pub to: EdgeState,
}
