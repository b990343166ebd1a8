use super::{
    BoxedRule, Rule, dead_end, extend_line, hint_saturation, infer_ones, infer_threes,
    infer_twos, ones_in_corner, resolve_inferences, threes_in_corner, twos_in_corner,
};
use crate::{Pass, SolverError};

const CELLS_NAME: &str = "recent cells";
const JUNCTIONS_NAME: &str = "recent junctions";

/// A rule that re-checks cells touched by recent marks.
///
/// Every mark routed through the [`Pass`] enqueues the cells around it.
/// Draining the queue runs the cell-local deductions only where something
/// changed, which is where they can still fire. Cells whose edges are all
/// determined are retired from the queue for the rest of the pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecentCells;

impl RecentCells {
    /// Creates a new `RecentCells` rule.
    #[must_use]
    pub const fn new() -> Self {
        RecentCells
    }
}

impl Rule for RecentCells {
    fn name(&self) -> &'static str {
        CELLS_NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(*self)
    }

    fn apply(&self, pass: &mut Pass<'_>) -> Result<bool, SolverError> {
        let mut changed = false;
        while let Some((row, column)) = pass.pop_dirty_cell() {
            if pass.board().cell_undetermined(row, column) == 0 {
                pass.finish_cell(row, column);
                continue;
            }
            changed |= hint_saturation::saturate_cell(pass, row, column)?;
            changed |= ones_in_corner::check_cell(pass, row, column)?;
            changed |= threes_in_corner::check_cell(pass, row, column)?;
            changed |= twos_in_corner::check_cell(pass, row, column)?;
            changed |= infer_ones::check_cell(pass, row, column)?;
            changed |= infer_twos::check_cell(pass, row, column)?;
            changed |= infer_threes::check_cell(pass, row, column)?;
        }
        Ok(changed)
    }
}

/// A rule that re-checks junctions touched by recent marks.
///
/// The junction counterpart of [`RecentCells`]: drains the junction queue
/// and runs the junction-local deductions there.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecentJunctions;

impl RecentJunctions {
    /// Creates a new `RecentJunctions` rule.
    #[must_use]
    pub const fn new() -> Self {
        RecentJunctions
    }
}

impl Rule for RecentJunctions {
    fn name(&self) -> &'static str {
        JUNCTIONS_NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(*self)
    }

    fn apply(&self, pass: &mut Pass<'_>) -> Result<bool, SolverError> {
        let mut changed = false;
        while let Some((row, column)) = pass.pop_dirty_junction() {
            if pass.board().junction_unknown(row, column) == 0 {
                pass.finish_junction(row, column);
                continue;
            }
            changed |= dead_end::close_dead_ends(pass, row, column)?;
            changed |= extend_line::extend_line(pass, row, column)?;
            changed |= resolve_inferences::resolve_junction(pass, row, column)?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use looplace_core::{Direction, EdgeState};
    use looplace_game::Puzzle;

    use super::*;

    #[test]
    fn test_recent_cells_cascades_from_a_mark() {
        // Crossing one edge of the 3 through the pass queues the cell;
        // draining the queue saturates it.
        let mut puzzle: Puzzle = "3.\n..".parse().unwrap();
        let mut pass = Pass::new(&mut puzzle);
        pass.mark_cell_edge(0, 0, Direction::East, EdgeState::Cross)
            .unwrap();
        assert!(RecentCells::new().apply(&mut pass).unwrap());
        let board = pass.board();
        assert_eq!(board.cell_edge_state(0, 0, Direction::North), EdgeState::Line);
        assert_eq!(board.cell_edge_state(0, 0, Direction::South), EdgeState::Line);
        assert_eq!(board.cell_edge_state(0, 0, Direction::West), EdgeState::Line);
    }

    #[test]
    fn test_recent_junctions_extends_a_line() {
        let mut puzzle: Puzzle = "..\n..".parse().unwrap();
        let mut pass = Pass::new(&mut puzzle);
        pass.mark_junction_edge(1, 1, Direction::North, EdgeState::Line)
            .unwrap();
        pass.mark_junction_edge(1, 1, Direction::South, EdgeState::Cross)
            .unwrap();
        pass.mark_junction_edge(1, 1, Direction::West, EdgeState::Cross)
            .unwrap();
        assert!(RecentJunctions::new().apply(&mut pass).unwrap());
        assert_eq!(
            pass.board().junction_edge_state(1, 1, Direction::East),
            Some(EdgeState::Line)
        );
    }

    #[test]
    fn test_empty_queues_do_nothing() {
        let mut puzzle: Puzzle = "3.\n..".parse().unwrap();
        let mut pass = Pass::new(&mut puzzle);
        assert!(!RecentCells::new().apply(&mut pass).unwrap());
        assert!(!RecentJunctions::new().apply(&mut pass).unwrap());
    }
}
