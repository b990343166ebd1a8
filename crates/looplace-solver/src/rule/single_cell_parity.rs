use looplace_core::{Board, Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule, support};
use crate::{Pass, SolverError};

const NAME: &str = "single cell parity";

/// A parity argument over the four corner junctions of one cell.
///
/// Every open line end at a corner junction must eventually leave the
/// cell's neighbourhood through an undetermined outward edge. When all
/// such exits sit at a single junction, an odd number of line ends forces
/// the exit through it and an even number with one determined outward
/// edge settles the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleCellParity;

impl SingleCellParity {
    /// Creates a new `SingleCellParity` rule.
    #[must_use]
    pub const fn new() -> Self {
        SingleCellParity
    }
}

impl Rule for SingleCellParity {
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

fn check_cell(pass: &mut Pass<'_>, row: usize, column: usize) -> Result<bool, MoveError> {
    use Direction::{East, North, South, West};
    let board = pass.board();
    if board.cell_undetermined(row, column) == 0 {
        return Ok(false);
    }
    let (r, c) = (row, column);
    let corners = [
        ((r, c), North, West),
        ((r, c + 1), North, East),
        ((r + 1, c + 1), South, East),
        ((r + 1, c), South, West),
    ];

    let line_ends: usize = corners
        .iter()
        .map(|&((jr, jc), _, _)| incomplete_lines(board, jr, jc))
        .sum();
    if line_ends == 0 {
        return Ok(false);
    }

    let available: Vec<usize> = corners
        .iter()
        .map(|&((jr, jc), dir1, dir2)| available_exits(board, jr, jc, dir1, dir2))
        .collect();
    let exits: usize = available.iter().sum();
    if !(1..=2).contains(&exits) {
        return Ok(false);
    }

    // All exits must sit at one junction.
    let Some(index) = available.iter().position(|&count| count == exits) else {
        return Ok(false);
    };
    let ((jr, jc), dir1, dir2) = corners[index];

    let even = line_ends % 2 == 0;
    let mut changed = false;
    if exits == 2 {
        if !even {
            changed |= support::infer_junction_xor(pass, jr, jc, dir1, dir2)?;
            changed |=
                support::infer_junction_xor(pass, jr, jc, dir1.opposite(), dir2.opposite())?;
        }
    } else {
        let state = if even { EdgeState::Cross } else { EdgeState::Line };
        let edge1 = pass.board().junction_edge_state(jr, jc, dir1);
        let edge2 = pass.board().junction_edge_state(jr, jc, dir2);
        if edge1 == Some(EdgeState::Undetermined) && matches!(edge2, Some(e) if e.is_determined())
        {
            changed |= pass.mark_junction_edge(jr, jc, dir1, state)?;
        } else if matches!(edge1, Some(e) if e.is_determined())
            && edge2 == Some(EdgeState::Undetermined)
        {
            changed |= pass.mark_junction_edge(jr, jc, dir2, state)?;
        }
    }
    Ok(changed)
}

/// 1 when the junction holds an unfinished line end, 0 otherwise.
fn incomplete_lines(board: &Board, row: usize, column: usize) -> usize {
    match board.junction_lines(row, column) {
        1 => 1,
        _ => 0,
    }
}

/// Number of undetermined outward edges at the junction.
fn available_exits(
    board: &Board,
    row: usize,
    column: usize,
    dir1: Direction,
    dir2: Direction,
) -> usize {
    [dir1, dir2]
        .into_iter()
        .filter(|&dir| board.junction_edge_state(row, column, dir) == Some(EdgeState::Undetermined))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_odd_ends_with_one_exit_leave_as_a_line() {
        // Around cell (0, 0): one open line end at junction (0, 1), and
        // the only undetermined outward edge is East at junction (1, 1),
        // whose partner is already crossed. The line end must get out
        // through it.
        RuleTester::from_str("..\n..")
            .mark_junction_edge(0, 1, Direction::East, EdgeState::Line)
            .mark_junction_edge(1, 1, Direction::South, EdgeState::Cross)
            .mark_junction_edge(1, 0, Direction::South, EdgeState::Cross)
            .apply_once(&SingleCellParity::new())
            .assert_progress()
            .assert_junction_edge(1, 1, Direction::East, EdgeState::Line);
    }

    #[test]
    fn test_odd_ends_with_a_double_exit_record_a_turn() {
        // Both exits sit at junction (1, 1); an odd number of line ends
        // must leave through exactly one of them.
        RuleTester::from_str("..\n..")
            .mark_junction_edge(0, 1, Direction::East, EdgeState::Line)
            .mark_junction_edge(1, 0, Direction::South, EdgeState::Cross)
            .apply_once(&SingleCellParity::new())
            .assert_progress()
            .assert_inference(1, 1, Direction::South, Direction::East)
            .assert_inference(1, 1, Direction::North, Direction::West);
    }

    #[test]
    fn test_no_line_ends_changes_nothing() {
        RuleTester::from_str("..\n..")
            .apply_once(&SingleCellParity::new())
            .assert_no_progress();
    }
}
