use looplace_core::EdgeState;
use looplace_game::MoveError;

use super::{BoxedRule, Rule};
use crate::{Pass, SolverError};

const NAME: &str = "resolve inferences";

/// A rule that discharges recorded exclusive-or constraints.
///
/// Once one edge of a constrained pair is determined, the other follows: a
/// line forces a cross, a cross or a missing edge forces a line. A
/// constraint over two determined edges that agree is a contradiction and
/// surfaces as a rejected mark.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolveInferences;

impl ResolveInferences {
    /// Creates a new `ResolveInferences` rule.
    #[must_use]
    pub const fn new() -> Self {
        ResolveInferences
    }
}

impl Rule for ResolveInferences {
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
                changed |= resolve_junction(pass, row, column)?;
            }
        }
        Ok(changed)
    }
}

/// Discharges the resolvable constraints of junction `(row, column)`.
pub(crate) fn resolve_junction(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let pairs: Vec<_> = pass.board().junction(row, column).inferences().to_vec();
    let mut changed = false;
    for pair in pairs {
        let (dir1, dir2) = (pair.first(), pair.second());
        let forced = |partner: Option<EdgeState>| match partner {
            Some(EdgeState::Line) => EdgeState::Cross,
            _ => EdgeState::Line,
        };

        let edge1 = pass.board().junction_edge_state(row, column, dir1);
        let edge2 = pass.board().junction_edge_state(row, column, dir2);
        if edge1 != Some(EdgeState::Undetermined) && edge2.is_some() {
            changed |= pass.mark_junction_edge(row, column, dir2, forced(edge1))?;
        }

        let edge1 = pass.board().junction_edge_state(row, column, dir1);
        let edge2 = pass.board().junction_edge_state(row, column, dir2);
        if edge2 != Some(EdgeState::Undetermined) && edge1.is_some() {
            changed |= pass.mark_junction_edge(row, column, dir1, forced(edge2))?;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use looplace_core::Direction;

    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_line_forces_the_partner_cross() {
        RuleTester::from_str("..\n..")
            .add_inference(1, 1, Direction::North, Direction::East)
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .apply_once(&ResolveInferences::new())
            .assert_progress()
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Cross);
    }

    #[test]
    fn test_cross_forces_the_partner_line() {
        RuleTester::from_str("..\n..")
            .add_inference(1, 1, Direction::North, Direction::East)
            .mark_junction_edge(1, 1, Direction::North, EdgeState::Cross)
            .apply_once(&ResolveInferences::new())
            .assert_progress()
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Line);
    }

    #[test]
    fn test_missing_partner_forces_a_line() {
        // Junction (0, 1) sits on the border, so the northern half of the
        // pair does not exist and the eastern edge must be the line.
        RuleTester::from_str("..\n..")
            .add_inference(0, 1, Direction::North, Direction::East)
            .apply_once(&ResolveInferences::new())
            .assert_progress()
            .assert_junction_edge(0, 1, Direction::East, EdgeState::Line);
    }

    #[test]
    fn test_open_pair_is_left_alone() {
        RuleTester::from_str("..\n..")
            .add_inference(1, 1, Direction::North, Direction::East)
            .apply_once(&ResolveInferences::new())
            .assert_no_progress()
            .assert_junction_edge(1, 1, Direction::North, EdgeState::Undetermined)
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Undetermined);
    }
}
