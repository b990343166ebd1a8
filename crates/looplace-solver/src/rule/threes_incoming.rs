use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "threes with incoming lines";

/// A rule for a 3 with a line arriving at one of its corners.
///
/// A line that reaches a corner junction of a 3 from outside either enters
/// the cell there or is forced around it; both cases require the two cell
/// edges away from that corner to be lines. A recorded exclusive-or
/// constraint at the corner counts as an arriving line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreesWithIncomingLines;

impl ThreesWithIncomingLines {
    /// Creates a new `ThreesWithIncomingLines` rule.
    #[must_use]
    pub const fn new() -> Self {
        ThreesWithIncomingLines
    }
}

impl Rule for ThreesWithIncomingLines {
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

/// Lines the far edges of a 3 at `(row, column)` for each corner with an
/// incoming line.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    if pass.board().hint(row, column) != Some(3) {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    // Corner junction, its outward pair, and the far cell edges.
    let corners = [
        ((row, column), North, West, East, South),
        ((row, column + 1), North, East, South, West),
        ((row + 1, column + 1), South, East, North, West),
        ((row + 1, column), South, West, East, North),
    ];
    let mut changed = false;
    for ((jr, jc), out1, out2, far1, far2) in corners {
        if support::junction_has_one_outward_line(pass.board(), jr, jc, out1, out2, true) {
            changed |= pass.mark_cell_edge(row, column, far1, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(row, column, far2, EdgeState::Line)?;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_line_into_the_north_west_corner() {
        RuleTester::from_str("...\n.3.\n...")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::West, EdgeState::Cross)
            .apply_once(&ThreesWithIncomingLines::new())
            .assert_progress()
            .assert_cell_edge(1, 1, Direction::East, EdgeState::Line)
            .assert_cell_edge(1, 1, Direction::South, EdgeState::Line);
    }

    #[test]
    fn test_xor_constraint_counts_as_incoming() {
        RuleTester::from_str("...\n.3.\n...")
            .add_inference(1, 1, Direction::North, Direction::West)
            .apply_once(&ThreesWithIncomingLines::new())
            .assert_progress()
            .assert_cell_edge(1, 1, Direction::East, EdgeState::Line)
            .assert_cell_edge(1, 1, Direction::South, EdgeState::Line);
    }

    #[test]
    fn test_line_passing_the_corner_is_not_incoming() {
        // Both outward edges carry the line, so it passes by without
        // touching the cell.
        RuleTester::from_str("...\n.3.\n...")
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::West, EdgeState::Line)
            .apply_once(&ThreesWithIncomingLines::new())
            .assert_no_progress();
    }
}
