use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "infer threes";

/// Corner deductions between a 3 and a diagonal hint.
///
/// If routing the loop around a corner of the 3 would eat two edges of the
/// diagonal cell and leave it short of its own hint, the loop cannot pass
/// outside that corner. The 3 then takes the two edges away from it, and
/// the corner junction passes one line in and one out.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferThrees;

impl InferThrees {
    /// Creates a new `InferThrees` rule.
    #[must_use]
    pub const fn new() -> Self {
        InferThrees
    }
}

impl Rule for InferThrees {
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

/// Applies the diagonal deduction to cell `(row, column)` if it holds an
/// unfinished 3.
pub(crate) fn check_cell(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
) -> Result<bool, MoveError> {
    let board = pass.board();
    if board.hint(row, column) != Some(3) || board.cell_lines(row, column) > 2 {
        return Ok(false);
    }
    use Direction::{East, North, South, West};
    let (r, c) = (row, column);
    // Corner junction, the cell's edges there as seen from the junction,
    // the diagonal offset, and the two far cell edges to line.
    let corners = [
        ((r, c), South, East, (-1, -1), South, East),
        ((r, c + 1), South, West, (-1, 1), South, West),
        ((r + 1, c + 1), North, West, (1, 1), North, West),
        ((r + 1, c), North, East, (1, -1), North, East),
    ];
    let mut changed = false;
    for ((jr, jc), in1, in2, (dr, dc), far1, far2) in corners {
        if !is_corner_available(pass, jr, jc, in1, in2) {
            continue;
        }
        let Some(hint) = support::hint_offset(pass.board(), r, c, dr, dc) else {
            continue;
        };
        let Some(diag_r) = r.checked_add_signed(dr) else {
            continue;
        };
        let Some(diag_c) = c.checked_add_signed(dc) else {
            continue;
        };
        let board = pass.board();
        let supply = board.cell_lines(diag_r, diag_c) + board.cell_undetermined(diag_r, diag_c);
        if supply < usize::from(hint) + 2 {
            changed |= support::infer_junction_xor(pass, jr, jc, in1.opposite(), in2.opposite())?;
            changed |= support::infer_junction_xor(pass, jr, jc, in1, in2)?;
            changed |= pass.mark_cell_edge(r, c, far1, EdgeState::Line)?;
            changed |= pass.mark_cell_edge(r, c, far2, EdgeState::Line)?;
        }
    }
    Ok(changed)
}

/// Whether the junction could still become a corner of the cell: both
/// outward edges exist and are undetermined, and of the cell's two edges
/// at the junction at least one is undetermined and neither is crossed.
fn is_corner_available(
    pass: &Pass<'_>,
    row: usize,
    column: usize,
    in1: Direction,
    in2: Direction,
) -> bool {
    let board = pass.board();
    let edge1 = board.junction_edge_state(row, column, in1);
    let edge2 = board.junction_edge_state(row, column, in2);
    let out1 = board.junction_edge_state(row, column, in1.opposite());
    let out2 = board.junction_edge_state(row, column, in2.opposite());
    if out1 != Some(EdgeState::Undetermined) || out2 != Some(EdgeState::Undetermined) {
        return false;
    }
    edge1 == Some(EdgeState::Undetermined) && edge2 != Some(EdgeState::Cross)
        || edge2 == Some(EdgeState::Undetermined) && edge1 != Some(EdgeState::Cross)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_diagonal_three_claims_the_far_edges() {
        // Two 3s on a diagonal: each would starve the other by cornering
        // toward it, so both take their outer edges.
        RuleTester::from_str("3..\n.3.\n...")
            .apply_once(&InferThrees::new())
            .assert_progress()
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Line)
            .assert_cell_edge(0, 0, Direction::West, EdgeState::Line)
            .assert_cell_edge(1, 1, Direction::South, EdgeState::Line)
            .assert_cell_edge(1, 1, Direction::East, EdgeState::Line)
            .assert_inference(1, 1, Direction::North, Direction::West)
            .assert_inference(1, 1, Direction::South, Direction::East);
    }

    #[test]
    fn test_roomy_diagonal_changes_nothing() {
        // The diagonal 1 keeps enough edges even if the corner turns
        // outward.
        RuleTester::from_str("3..\n.1.\n...")
            .apply_once(&InferThrees::new())
            .assert_no_progress();
    }
}
