use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "ones in a corner";

/// A rule for a 1 whose cell sits in a corner.
///
/// A line entering the corner junction of a 1 would have to leave along
/// the cell's other corner edge, giving the cell two lines. Both corner
/// edges are crossed, and the single line the 1 does get must pass the
/// opposite corner junction, one edge in and one edge out.
#[derive(Debug, Default, Clone, Copy)]
pub struct OnesInACorner;

impl OnesInACorner {
    /// Creates a new `OnesInACorner` rule.
    #[must_use]
    pub const fn new() -> Self {
        OnesInACorner
    }
}

impl Rule for OnesInACorner {
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

/// Applies the corner deduction to cell `(row, column)` if it holds a 1.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    if pass.board().hint(row, column) != Some(1) {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    // Each corner pair with the junction at the opposite corner.
    let corners = [
        (North, East, (row + 1, column)),
        (South, East, (row, column)),
        (South, West, (row, column + 1)),
        (North, West, (row + 1, column + 1)),
    ];
    let mut changed = false;
    for (dir1, dir2, (jr, jc)) in corners {
        if support::is_corner(pass.board(), row, column, dir1, dir2) {
            changed |= pass.mark_cell_edge(row, column, dir1, EdgeState::Cross)?;
            changed |= pass.mark_cell_edge(row, column, dir2, EdgeState::Cross)?;
            changed |= support::infer_junction_xor(pass, jr, jc, dir1, dir2)?;
            changed |=
                support::infer_junction_xor(pass, jr, jc, dir1.opposite(), dir2.opposite())?;
        }
    }
    Ok(changed)
}
