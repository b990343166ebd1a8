use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule};
use crate::{Pass, SolverError};

const NAME: &str = "hint saturation";

/// A rule that completes cells whose hint leaves no freedom.
///
/// When the undetermined edges of a hinted cell are exactly the lines still
/// missing, they all become lines; when the hint is already met, they all
/// become crosses. This is the workhorse deduction: most marks made by other
/// rules cascade through it.
///
/// # Examples
///
/// ```
/// use looplace_core::{Direction, EdgeState};
/// use looplace_game::Puzzle;
/// use looplace_solver::{Pass, rule::{HintSaturation, Rule}};
///
/// let mut puzzle: Puzzle = "0".parse()?;
/// let mut pass = Pass::new(&mut puzzle);
/// assert!(HintSaturation::new().apply(&mut pass)?);
/// assert_eq!(
///     pass.board().cell_edge_state(0, 0, Direction::North),
///     EdgeState::Cross
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HintSaturation;

impl HintSaturation {
    /// Creates a new `HintSaturation` rule.
    #[must_use]
    pub const fn new() -> Self {
        HintSaturation
    }
}

impl Rule for HintSaturation {
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
                changed |= saturate_cell(pass, row, column)?;
            }
        }
        Ok(changed)
    }
}

/// Fills the undetermined edges of cell `(row, column)` when its hint
/// forces them all one way.
pub(crate) fn saturate_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    let Some(hint) = board.hint(row, column) else {
        return Ok(false);
    };
    let undetermined = board.cell_undetermined(row, column);
    if undetermined == 0 {
        return Ok(false);
    }
    let lines = board.cell_lines(row, column);
    let hint = usize::from(hint);

    let state = if lines + undetermined == hint {
        EdgeState::Line
    } else if lines == hint {
        EdgeState::Cross
    } else {
        return Ok(false);
    };

    let mut changed = false;
    for direction in Direction::ALL {
        if pass.board().cell_edge_state(row, column, direction) == EdgeState::Undetermined {
            changed |= pass.mark_cell_edge(row, column, direction, state)?;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_zero_crosses_all_edges() {
        RuleTester::from_str("0.\n..")
            .apply_once(&HintSaturation::new())
            .assert_progress()
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Cross)
            .assert_cell_edge(0, 0, Direction::South, EdgeState::Cross)
            .assert_cell_edge(0, 0, Direction::West, EdgeState::Cross)
            .assert_cell_edge(0, 0, Direction::East, EdgeState::Cross);
    }

    #[test]
    fn test_remaining_edges_become_lines_when_exactly_needed() {
        // A 3 with one crossed edge needs all three remaining edges.
        RuleTester::from_str("3.\n..")
            .mark_cell_edge(0, 0, Direction::East, EdgeState::Cross)
            .apply_once(&HintSaturation::new())
            .assert_progress()
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Line)
            .assert_cell_edge(0, 0, Direction::South, EdgeState::Line)
            .assert_cell_edge(0, 0, Direction::West, EdgeState::Line);
    }

    #[test]
    fn test_met_hint_crosses_the_rest() {
        RuleTester::from_str("1.\n..")
            .mark_cell_edge(0, 0, Direction::North, EdgeState::Line)
            .apply_once(&HintSaturation::new())
            .assert_progress()
            .assert_cell_edge(0, 0, Direction::South, EdgeState::Cross)
            .assert_cell_edge(0, 0, Direction::West, EdgeState::Cross)
            .assert_cell_edge(0, 0, Direction::East, EdgeState::Cross);
    }

    #[test]
    fn test_loose_hint_is_left_alone() {
        RuleTester::from_str("2.\n..")
            .apply_once(&HintSaturation::new())
            .assert_no_progress()
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Undetermined);
    }
}
