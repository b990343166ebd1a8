use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "twos in a corner";

/// A rule for a 2 whose cell sits in a corner.
///
/// The two lines of a cornered 2 run from the opposite corner junction
/// through the two junctions adjacent to the corner, so each adjacent
/// junction passes exactly one line in and one out. When the opposite
/// corner is spoken for, by a diagonal 3 or by a line already arriving
/// there, the 2 must take both of its corner edges instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwosInACorner;

impl TwosInACorner {
    /// Creates a new `TwosInACorner` rule.
    #[must_use]
    pub const fn new() -> Self {
        TwosInACorner
    }
}

impl Rule for TwosInACorner {
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

/// Applies the corner deduction to cell `(row, column)` if it holds a 2.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    if pass.board().hint(row, column) != Some(2) {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    let (r, c) = (row, column);
    let mut changed = false;

    if support::is_corner(pass.board(), r, c, North, East) {
        changed |= support::infer_junction_xor(pass, r, c, North, West)?;
        changed |= support::infer_junction_xor(pass, r, c, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, North, West)?;
        changed |=
            support::mark_outgoing_single_line(pass, r + 1, c, South, West, EdgeState::Cross)?;
        if support::hint_offset(pass.board(), r, c, 1, -1) == Some(3)
            || support::junction_has_one_outward_line(pass.board(), r + 1, c, South, West, true)
        {
            changed |= pass.mark_cell_edge(r, c, North, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(r, c, East, EdgeState::Line)?;
        }
    }

    if support::is_corner(pass.board(), r, c, South, East) {
        changed |= support::infer_junction_xor(pass, r, c + 1, North, East)?;
        changed |= support::infer_junction_xor(pass, r, c + 1, South, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, South, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, North, East)?;
        changed |= support::mark_outgoing_single_line(pass, r, c, North, West, EdgeState::Cross)?;
        if support::hint_offset(pass.board(), r, c, -1, -1) == Some(3)
            || support::junction_has_one_outward_line(pass.board(), r, c, North, West, true)
        {
            changed |= pass.mark_cell_edge(r, c, South, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(r, c, East, EdgeState::Line)?;
        }
    }

    if support::is_corner(pass.board(), r, c, South, West) {
        changed |= support::infer_junction_xor(pass, r, c, North, West)?;
        changed |= support::infer_junction_xor(pass, r, c, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, South, East)?;
        changed |= support::infer_junction_xor(pass, r + 1, c + 1, North, West)?;
        changed |=
            support::mark_outgoing_single_line(pass, r, c + 1, North, East, EdgeState::Cross)?;
        if support::hint_offset(pass.board(), r, c, -1, 1) == Some(3)
            || support::junction_has_one_outward_line(pass.board(), r, c + 1, North, East, true)
        {
            changed |= pass.mark_cell_edge(r, c, South, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(r, c, West, EdgeState::Line)?;
        }
    }

    if support::is_corner(pass.board(), r, c, North, West) {
        changed |= support::infer_junction_xor(pass, r, c + 1, North, East)?;
        changed |= support::infer_junction_xor(pass, r, c + 1, South, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, South, West)?;
        changed |= support::infer_junction_xor(pass, r + 1, c, North, East)?;
        changed |=
            support::mark_outgoing_single_line(pass, r + 1, c + 1, South, East, EdgeState::Cross)?;
        if support::hint_offset(pass.board(), r, c, 1, 1) == Some(3)
            || support::junction_has_one_outward_line(pass.board(), r + 1, c + 1, South, East, true)
        {
            changed |= pass.mark_cell_edge(r, c, North, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(r, c, West, EdgeState::Line)?;
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_two_in_the_board_corner_records_turns() {
        // Cell (0, 0) is a 2 in the north-west board corner. The border
        // half of each adjacent junction's turn collapses to a line, the
        // interior half stays an exclusive-or constraint.
        RuleTester::from_str("2..\n...\n...")
            .apply_once(&TwosInACorner::new())
            .assert_progress()
            .assert_junction_edge(0, 1, Direction::East, EdgeState::Line)
            .assert_junction_edge(1, 0, Direction::South, EdgeState::Line)
            .assert_inference(0, 1, Direction::South, Direction::West)
            .assert_inference(1, 0, Direction::North, Direction::East);
    }

    #[test]
    fn test_diagonal_three_forces_the_corner() {
        // The 3 diagonally beyond the opposite corner claims that corner,
        // so the 2 takes both of its own corner edges.
        RuleTester::from_str("2..\n.3.\n...")
            .apply_once(&TwosInACorner::new())
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Line)
            .assert_cell_edge(0, 0, Direction::West, EdgeState::Line);
    }

    #[test]
    fn test_line_into_the_opposite_corner_forces_the_corner() {
        RuleTester::from_str("2..\n...\n...")
            .mark_junction_edge(1, 1, Direction::South, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::East, EdgeState::Cross)
            .apply_once(&TwosInACorner::new())
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Line)
            .assert_cell_edge(0, 0, Direction::West, EdgeState::Line);
    }

    #[test]
    fn test_plain_two_is_left_alone() {
        RuleTester::from_str("...\n.2.\n...")
            .apply_once(&TwosInACorner::new())
            .assert_no_progress();
    }
}
