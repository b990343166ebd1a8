use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "infer ones";

/// Exclusive-or deductions around a 1 that has no line yet.
///
/// A line committed to one corner junction of a 1 must enter the cell
/// there, so the two far edges are crossed and the single line leaves
/// through that same junction. Independently, when only one corner of the
/// cell still has both of its edges open, the line must turn there.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferOnes;

impl InferOnes {
    /// Creates a new `InferOnes` rule.
    #[must_use]
    pub const fn new() -> Self {
        InferOnes
    }
}

impl Rule for InferOnes {
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

/// Applies the deductions to cell `(row, column)` if it holds a lineless 1.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    if board.hint(row, column) != Some(1) || board.cell_lines(row, column) > 0 {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    let (r, c) = (row, column);
    let mut changed = false;

    // A committed line at a corner junction enters the cell there.
    let corners = [
        ((r, c), North, West, East, South),
        ((r, c + 1), North, East, West, South),
        ((r + 1, c), South, West, East, North),
        ((r + 1, c + 1), South, East, North, West),
    ];
    for ((jr, jc), out1, out2, far1, far2) in corners {
        if support::junction_has_one_outward_line(pass.board(), jr, jc, out1, out2, false) {
            changed |= pass.mark_cell_edge(r, c, far1, EdgeState::Cross)?;
            changed |= pass.mark_cell_edge(r, c, far2, EdgeState::Cross)?;
            changed |= support::infer_junction_xor(pass, jr, jc, out1.opposite(), out2.opposite())?;
        }
    }

    // Only one corner still has both of its edges open.
    if let Some((jr, jc, dir1, dir2)) = sole_open_corner(pass, r, c) {
        changed |= support::infer_junction_xor(pass, jr, jc, dir1, dir2)?;
        changed |= support::infer_junction_xor(pass, jr, jc, dir1.opposite(), dir2.opposite())?;
    }

    Ok(changed)
}

/// The one corner of the cell whose two edges are both undetermined, if
/// exactly one corner qualifies. Returns the corner junction and the pair
/// of directions naming the cell's edges there, as seen from the junction.
fn sole_open_corner(
    pass: &Pass<'_>,
    row: usize,
    column: usize,
) -> Option<(usize, usize, Direction, Direction)> {
    use Direction::{East, North, South, West};
    let board = pass.board();
    let open =
        |dir: Direction| board.cell_edge_state(row, column, dir) == EdgeState::Undetermined;

    let candidates = [
        (North, East, (row, column + 1)),
        (South, East, (row + 1, column + 1)),
        (South, West, (row + 1, column)),
        (North, West, (row, column)),
    ];
    let mut found = None;
    for (dir1, dir2, (jr, jc)) in candidates {
        if open(dir1) && open(dir2) {
            if found.is_some() {
                return None;
            }
            found = Some((jr, jc, dir1, dir2));
        }
    }
    found
}
