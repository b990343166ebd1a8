use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "threes in a corner";

/// A rule for a 3 whose cell sits in a corner.
///
/// The loop cannot pass the corner junction from outside, so the 3 must
/// take both of its corner edges. The third line leaves through the
/// opposite corner junction, one edge in and one edge out.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreesInACorner;

impl ThreesInACorner {
    /// Creates a new `ThreesInACorner` rule.
    #[must_use]
    pub const fn new() -> Self {
        ThreesInACorner
    }
}

impl Rule for ThreesInACorner {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(*self)
    }

    fn apply(&self, pass: &mut Pass<'_>) -> Result<bool, SolverError> {
        let mut changed = false;
        for row in 0..pass.board().rows() {
            for column in 0..pass.board().columns() {
                changed |= check_cell(pass, row, column)?;
            }
        }
        Ok(changed)
    }
}

/// Applies the corner deduction to cell `(row, column)` if it holds a 3.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    if board.hint(row, column) != Some(3) || board.cell_undetermined(row, column) == 0 {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    let corners = [
        (North, East, (row + 1, column)),
        (South, East, (row, column)),
        (South, West, (row, column + 1)),
        (North, West, (row + 1, column + 1)),
    ];
    let mut changed = false;
    for (dir1, dir2, (jr, jc)) in corners {
        if support::is_corner(pass.board(), row, column, dir1, dir2) {
            changed |= pass.mark_cell_edge(row, column, dir1, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(row, column, dir2, EdgeState::Line)?;
            changed |= support::infer_junction_xor(pass, jr, jc, dir1, dir2)?;
            changed |=
                support::infer_junction_xor(pass, jr, jc, dir1.opposite(), dir2.opposite())?;
        }
    }
    Ok(changed)
}
