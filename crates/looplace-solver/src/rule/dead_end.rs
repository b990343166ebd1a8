use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule};
use crate::{Pass, SolverError};

const NAME: &str = "dead ends";

/// A rule that crosses edges a line can never use.
///
/// A junction passes the loop through or not at all, so it has zero or two
/// line edges. A junction whose only remaining edge would be a dead-end
/// stub gets that edge crossed, and a junction that already has its two
/// lines gets every other edge crossed.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeadEnds;

impl DeadEnds {
    /// Creates a new `DeadEnds` rule.
    #[must_use]
    pub const fn new() -> Self {
        DeadEnds
    }
}

impl Rule for DeadEnds {
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
                changed |= close_dead_ends(pass, row, column)?;
            }
        }
        Ok(changed)
    }
}

/// Crosses the unusable edges of junction `(row, column)`.
pub(crate) fn close_dead_ends(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    let unknown = board.junction_unknown(row, column);
    if unknown == 0 || unknown > 2 {
        return Ok(false);
    }
    let lines = board.junction_lines(row, column);

    let mut changed = false;
    if lines + unknown == 1 {
        // A lone undetermined edge with nothing to connect to.
        for direction in Direction::ALL {
            if pass.board().junction_edge_state(row, column, direction)
                == Some(EdgeState::Undetermined)
            {
                changed |= pass.mark_junction_edge(row, column, direction, EdgeState::Cross)?;
                break;
            }
        }
    } else if lines == 2 {
        for direction in Direction::ALL {
            if pass.board().junction_edge_state(row, column, direction)
                == Some(EdgeState::Undetermined)
            {
                changed |= pass.mark_junction_edge(row, column, direction, EdgeState::Cross)?;
            }
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_lone_stub_is_crossed() {
        // Junction (1, 1) keeps only its East edge; a line there could
        // never continue.
        RuleTester::from_str("..\n..")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Cross)
            .mark_junction_edge(1, 1, Direction::South, EdgeState::Cross)
            .mark_junction_edge(1, 1, Direction::West, EdgeState::Cross)
            .apply_once(&DeadEnds::new())
            .assert_progress()
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Cross);
    }

    #[test]
    fn test_full_junction_crosses_the_rest() {
        RuleTester::from_str("..\n..")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::West, EdgeState::Line)
            .apply_once(&DeadEnds::new())
            .assert_progress()
            .assert_junction_edge(1, 1, Direction::South, EdgeState::Cross)
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Cross);
    }

    #[test]
    fn test_open_junction_is_left_alone() {
        RuleTester::from_str("..\n..")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .apply_once(&DeadEnds::new())
            .assert_no_progress();
    }
}
