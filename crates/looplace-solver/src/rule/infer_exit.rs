use looplace_core::{Board, Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "infer exit";

/// A rule that keeps an arriving line from exiting past a tight cell.
///
/// A line leaving through the outward pair of a corner junction crosses
/// both of the cell's edges there. If the cell cannot spare two edges, the
/// line must enter instead, so the junction's outward pair becomes an
/// exclusive-or. For a 2 the loss of exactly two edges corners the cell
/// and pushes the same constraint diagonally onward; the chain is followed
/// until it hits a 3 or an already arriving line.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferExit;

impl InferExit {
    /// Creates a new `InferExit` rule.
    #[must_use]
    pub const fn new() -> Self {
        InferExit
    }
}

impl Rule for InferExit {
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

/// Applies the exit deductions to cell `(row, column)`.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    let hint = match board.hint(row, column) {
        None | Some(0) => return Ok(false),
        Some(hint) => usize::from(hint),
    };
    use Direction::{East, North, South, West};
    let (r, c) = (row, column);
    let corners = [
        ((r, c), North, West),
        ((r, c + 1), North, East),
        ((r + 1, c), South, West),
        ((r + 1, c + 1), South, East),
    ];
    let mut changed = false;

    if board.cell_undetermined(r, c) + board.cell_lines(r, c) < hint + 2 {
        for ((jr, jc), dir1, dir2) in corners {
            if exiting_eliminates_too_many(pass.board(), jr, jc, dir1, dir2) {
                changed |= support::infer_junction_xor(pass, jr, jc, dir1, dir2)?;
            }
        }
    }

    // Losing exactly two edges corners a 2 and cascades diagonally.
    if hint == 2 && pass.board().cell_undetermined(r, c) >= 2 {
        for ((jr, jc), dir1, dir2) in corners {
            if two_cascade(pass.board(), r, c, jr, jc, dir1, dir2) {
                changed |= support::infer_junction_xor(pass, jr, jc, dir1, dir2)?;
            }
        }
    }

    Ok(changed)
}

/// One line in, three edges open, and the line could leave through the
/// outward pair.
fn exiting_eliminates_too_many(
    board: &Board,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
) -> bool {
    board.junction_edge_count(row, column) == 4
        && board.junction_lines(row, column) == 1
        && board.junction_unknown(row, column) == 3
        && (board.junction_edge_state(row, column, dir1) == Some(EdgeState::Line)
            || board.junction_edge_state(row, column, dir2) == Some(EdgeState::Line))
}

/// Whether a line exiting outward at the `(dir1, dir2)` corner of the 2 at
/// `(row, column)` runs into a diagonal chain that forbids it.
fn two_cascade(
    board: &Board,
    row: usize,
    column: usize,
    jr: usize,
    jc: usize,
    dir1: Direction,
    dir2: Direction,
) -> bool {
    if !(board.junction_edge_count(jr, jc) == 4
        && board.junction_lines(jr, jc) == 1
        && board.junction_unknown(jr, jc) >= 2
        && (board.junction_edge_state(jr, jc, dir1) == Some(EdgeState::Line)
            || board.junction_edge_state(jr, jc, dir2) == Some(EdgeState::Line)))
    {
        return false;
    }
    // Exiting here corners the 2 toward the opposite diagonal.
    let dir3 = dir1.opposite();
    let dir4 = dir2.opposite();
    match diagonal_hint(board, row, column, dir3, dir4) {
        None => false,
        Some((_, _, 3)) => true,
        Some((next_r, next_c, 2)) => {
            let (njr, njc) = support::corner_junction(row, column, dir3, dir4);
            cascade_recursive(board, next_r, next_c, njr, njc, dir3, dir4)
        }
        Some(_) => false,
    }
}

fn cascade_recursive(
    board: &Board,
    row: usize,
    column: usize,
    jr: usize,
    jc: usize,
    dir1: Direction,
    dir2: Direction,
) -> bool {
    if board.junction_edge_count(jr, jc) != 4 {
        return false;
    }
    // A line already arriving at the passed-on corner conflicts with it.
    if board.junction_edge_state(jr, jc, dir1) == Some(EdgeState::Line)
        || board.junction_edge_state(jr, jc, dir2) == Some(EdgeState::Line)
    {
        return true;
    }
    match diagonal_hint(board, row, column, dir1, dir2) {
        None => false,
        Some((_, _, 3)) => true,
        Some((next_r, next_c, 2)) => {
            let (njr, njc) = support::corner_junction(row, column, dir1, dir2);
            cascade_recursive(board, next_r, next_c, njr, njc, dir1, dir2)
        }
        Some(_) => false,
    }
}

/// The hinted cell one diagonal step from `(row, column)`, together with
/// its coordinates.
fn diagonal_hint(
    board: &Board,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
) -> Option<(usize, usize, u8)> {
    let step = |r: usize, c: usize, dir: Direction| -> Option<(usize, usize)> {
        match dir {
            Direction::North => Some((r.checked_sub(1)?, c)),
            Direction::South => Some((r + 1, c)),
            Direction::West => Some((r, c.checked_sub(1)?)),
            Direction::East => Some((r, c + 1)),
        }
    };
    let (r, c) = step(row, column, dir1)?;
    let (r, c) = step(r, c, dir2)?;
    if r >= board.rows() || c >= board.columns() {
        return None;
    }
    board.hint(r, c).map(|hint| (r, c, hint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_tight_cell_keeps_the_line_in() {
        // The 3 has one edge crossed; exiting at the corner would cross
        // two more and leave only two for the hint.
        RuleTester::from_str("...\n.3.\n...")
            .mark_cell_edge(1, 1, Direction::North, EdgeState::Cross)
            .mark_junction_edge(2, 2, Direction::South, EdgeState::Line)
            .apply_once(&InferExit::new())
            .assert_progress()
            .assert_inference(2, 2, Direction::South, Direction::East);
    }

    #[test]
    fn test_two_cascades_into_a_three() {
        // Exiting at the 2's south-east corner would corner the 2 toward
        // the 3, which cannot lose two edges.
        RuleTester::from_str("...\n.2.\n..3")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .apply_once(&InferExit::new())
            .assert_progress()
            .assert_inference(1, 1, Direction::North, Direction::West);
    }

    #[test]
    fn test_loose_cell_lets_the_line_pass() {
        RuleTester::from_str("...\n.2.\n...")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .apply_once(&InferExit::new())
            .assert_no_progress();
    }
}
