use looplace_core::{Direction, EdgeState};
use looplace_game::MoveError;

use super::{BoxedRule, Rule};
use crate::{Pass, SolverError};

const NAME: &str = "preempt loops";

/// A rule that crosses edges whose line would close the loop early.
///
/// An undetermined edge joining the two ends of one open chain would close
/// a cycle; unless that solves the puzzle the edge can never be a line.
/// Only East and South edges are probed so each edge is visited once.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreemptLoops;

impl PreemptLoops {
    /// Creates a new `PreemptLoops` rule.
    #[must_use]
    pub const fn new() -> Self {
        PreemptLoops
    }
}

impl Rule for PreemptLoops {
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
                if pass.board().junction_lines(row, column) != 1 {
                    continue;
                }
                for direction in [Direction::East, Direction::South] {
                    changed |= preempt_loop(pass, row, column, direction)?;
                }
            }
        }
        Ok(changed)
    }
}

/// Crosses the junction's `direction` edge when a line there would join
/// the two ends of the same chain.
fn preempt_loop(
    pass: &mut Pass<'_>,
    row: usize,
    column: usize,
    direction: Direction,
) -> Result<bool, MoveError> {
    let board = pass.board();
    let Some(edge) = board.junction_edge(row, column, direction) else {
        return Ok(false);
    };
    if board.edge_state(edge) != EdgeState::Undetermined {
        return Ok(false);
    }
    let [start, end] = board.edge(edge).endpoints();
    let (start_r, start_c) = board.junction_coords(start);
    let (end_r, end_c) = board.junction_coords(end);
    if board.junction_lines(start_r, start_c) != 1 || board.junction_lines(end_r, end_c) != 1 {
        return Ok(false);
    }
    if board.line_path_connects(start, end, None) {
        return pass.mark_junction_edge(row, column, direction, EdgeState::Cross);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_chain_closing_edge_is_crossed() {
        // A U of lines around cell (0, 0); joining its open ends along the
        // north edge would close a one-cell loop on an unsolved board.
        RuleTester::from_str("..\n..")
            .mark_cell_edge(0, 0, Direction::West, EdgeState::Line)
            .mark_cell_edge(0, 0, Direction::South, EdgeState::Line)
            .mark_cell_edge(0, 0, Direction::East, EdgeState::Line)
            .apply_once(&PreemptLoops::new())
            .assert_progress()
            .assert_cell_edge(0, 0, Direction::North, EdgeState::Cross);
    }

    #[test]
    fn test_separate_chains_may_join() {
        RuleTester::from_str("..\n..")
            .mark_cell_edge(0, 0, Direction::West, EdgeState::Line)
            .mark_cell_edge(0, 1, Direction::East, EdgeState::Line)
            .apply_once(&PreemptLoops::new())
            .assert_no_progress();
    }
}
