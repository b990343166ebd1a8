use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule};
use crate::{Pass, SolverError};

const NAME: &str = "extend lines";

/// A rule that extends a line with only one way to continue.
///
/// A junction with one line and one undetermined edge must route the line
/// through that edge.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtendLines;

impl ExtendLines {
    /// Creates a new `ExtendLines` rule.
    #[must_use]
    pub const fn new() -> Self {
        ExtendLines
    }
}

impl Rule for ExtendLines {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(*self)
    }

    fn apply(&self, pass: &mut Pass<'_>) -> Result<bool, SolverError> {
        let mut changed = false;
        for row in 0..=pass.board().rows() {
            for column in 0..=pass.board().columns() {
                changed |= extend_line(pass, row, column)?;
            }
        }
        Ok(changed)
    }
}

/// Continues the line through junction `(row, column)` when only one edge
/// is left for it.
pub(crate) fn extend_line(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    if board.junction_lines(row, column) != 1 || board.junction_unknown(row, column) != 1 {
        return Ok(false);
    }
    for direction in Direction::ALL {
        if pass.board().junction_edge_state(row, column, direction)
            == Some(EdgeState::Undetermined)
        {
            return pass.mark_junction_edge(row, column, direction, EdgeState::Line);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_single_continuation_becomes_a_line() {
        // Junction (1, 1): one line in, two edges crossed, East is forced.
        RuleTester::from_str("..\n..")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::South, EdgeState::Cross)
            .mark_junction_edge(1, 1, Direction::West, EdgeState::Cross)
            .apply_once(&ExtendLines::new())
            .assert_progress()
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Line);
    }

    #[test]
    fn test_two_continuations_stay_open() {
        RuleTester::from_str("..\n..")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::South, EdgeState::Cross)
            .apply_once(&ExtendLines::new())
            .assert_no_progress()
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Undetermined);
    }
}
