use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "infer twos";

/// Exclusive-or deductions around a 2.
///
/// A line committed to a corner junction of a 2 takes one cell edge there,
/// leaving one line for the far half of the cell; the far corner and its
/// two neighbours each pass exactly one of their pair. When lines touch
/// both junctions of a diagonal from outside, each must enter the cell,
/// and both diagonal corners become turns.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferTwos;

impl InferTwos {
    /// Creates a new `InferTwos` rule.
    #[must_use]
    pub const fn new() -> Self {
        InferTwos
    }
}

impl Rule for InferTwos {
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

/// Applies the deductions to cell `(row, column)` if it holds a 2 with at
/// most one line.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    if board.hint(row, column) != Some(2) || board.cell_lines(row, column) > 1 {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    let (r, c) = (row, column);
    let mut changed = false;

    if support::junction_has_one_outward_line(pass.board(), r, c, North, West, false) {
        changed |= support::infer_junction_xor(pass, r, c, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, North, West)?;
    }
    if support::junction_has_one_outward_line(pass.board(), r, c + 1, North, East, false) {
        changed |= support::infer_junction_xor(pass, r, c + 1, South, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, North, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, South, West)?;
    }
    if support::junction_has_one_outward_line(pass.board(), r + 1, c, South, West, false) {
        changed |= support::infer_junction_xor(pass, r + 1, c, North, East)?;
        changed |= support::infer_junction_xor(pass, r, c + 1, South, West)?;
        changed |= support::infer_junction_xor(pass, r, c + 1, North, East)?;
    }
    if support::junction_has_one_outward_line(pass.board(), r + 1, c + 1, South, East, false) {
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, North, West)?;
        changed |= support::infer_junction_xor(pass, r, c, North, West)?;
        changed |= support::infer_junction_xor(pass, r, c, South, East)?;
    }

    if opposite_corners_have_lines(pass, (r, c), (r + 1, c + 1), North, West) {
        changed |= support::infer_junction_xor(pass, r, c, North, West)?;
        changed |= support::infer_junction_xor(pass, r, c, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, North, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, South, East)?;
    }
    if opposite_corners_have_lines(pass, (r, c + 1), (r + 1, c), North, East) {
        changed |= support::infer_junction_xor(pass, r, c + 1, North, East)?;
        changed |= support::infer_junction_xor(pass, r, c + 1, South, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, North, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, South, West)?;
    }

    Ok(changed)
}

/// Whether a line arrives at each end of the cell diagonal from outside,
/// with the partner edge present but not a line.
fn opposite_corners_have_lines(
    pass: &Pass<'_>,
    j1: (usize, usize),
    j2: (usize, usize),
    dir1: Direction,
    dir2: Direction,
) -> bool {
    let board = pass.board();
    let half = |j: (usize, usize), d1: Direction, d2: Direction| {
        let e1 = board.junction_edge_state(j.0, j.1, d1);
        let e2 = board.junction_edge_state(j.0, j.1, d2);
        e1 == Some(EdgeState::Line) && e2.is_some() && e2 != Some(EdgeState::Line)
            || e2 == Some(EdgeState::Line) && e1.is_some() && e1 != Some(EdgeState::Line)
    };
    half(j1, dir1, dir2) && half(j2, dir1.opposite(), dir2.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_committed_corner_line_chains_across() {
        RuleTester::from_str("...\n.2.\n...")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::West, EdgeState::Cross)
            .apply_once(&InferTwos::new())
            .assert_progress()
            .assert_inference(1, 1, Direction::South, Direction::East)
            .assert_inference(2, 2, Direction::South, Direction::East)
            .assert_inference(2, 2, Direction::North, Direction::West);
    }

    #[test]
    fn test_lines_at_both_diagonal_corners() {
        RuleTester::from_str("...\n.2.\n...")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(2, 2, Direction::South, EdgeState::Line)
            .apply_once(&InferTwos::new())
            .assert_progress()
            .assert_inference(1, 1, Direction::North, Direction::West)
            .assert_inference(1, 1, Direction::South, Direction::East)
            .assert_inference(2, 2, Direction::North, Direction::West)
            .assert_inference(2, 2, Direction::South, Direction::East);
    }

    #[test]
    fn test_near_settled_two_is_skipped() {
        RuleTester::from_str("...\n.2.\n...")
            .mark_cell_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_cell_edge(1, 1, Direction::West, EdgeState::Line)
            .apply_once(&InferTwos::new())
            .assert_no_progress();
    }
}
