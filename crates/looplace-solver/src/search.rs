//! Hypothesis testing for puzzles beyond pure deduction.

use looplace_core::{Direction, EdgeState};
use looplace_game::{MarkOptions, Puzzle};

use crate::{Propagator, PropagatorStats, SolverError};

/// A solver that backs the [`Propagator`] with edge hypotheses.
///
/// When propagation stalls, the solver picks an undetermined edge, marks it
/// one way, and propagates. A contradiction refutes the hypothesis and
/// forces the opposite mark; a solved position is accepted. Edges touching
/// a junction that already carries a line are tried first since a line end
/// must continue somewhere nearby.
///
/// Refuted hypotheses are abandoned by rewinding the move history, so the
/// puzzle handed back is only ever a deductive extension of the input plus
/// at most one accepted hypothesis chain.
///
/// # Examples
///
/// ```
/// use looplace_game::Puzzle;
/// use looplace_solver::LookaheadSolver;
///
/// // Two 3s across a diagonal admit a loop that deduction alone
/// // cannot pin down.
/// let mut puzzle: Puzzle = "3.\n.3".parse()?;
/// let solver = LookaheadSolver::with_all_rules();
///
/// let (solved, _stats) = solver.solve(&mut puzzle)?;
/// assert!(solved);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LookaheadSolver {
    propagator: Propagator,
}

impl LookaheadSolver {
    /// Creates a solver that tests hypotheses with `propagator`.
    #[must_use]
    pub fn new(propagator: Propagator) -> Self {
        Self { propagator }
    }

    /// Creates a solver over a propagator with all available rules.
    #[must_use]
    pub fn with_all_rules() -> Self {
        Self::new(Propagator::with_all_rules())
    }

    /// Returns the underlying propagator.
    #[must_use]
    pub fn propagator(&self) -> &Propagator {
        &self.propagator
    }

    /// Solves the puzzle, guessing where deduction stalls.
    ///
    /// Returns `(solved, stats)`; the statistics aggregate every
    /// propagation run, including refuted branches.
    ///
    /// # Errors
    ///
    /// Returns an error when the puzzle has no solution, either because
    /// propagation of the input position is contradictory or because some
    /// edge is contradictory both ways.
    pub fn solve(&self, puzzle: &mut Puzzle) -> Result<(bool, PropagatorStats), SolverError> {
        let mut stats = self.propagator.new_stats();
        let solved = self.solve_with_stats(puzzle, &mut stats)?;
        Ok((solved, stats))
    }

    /// Solves like [`solve`](LookaheadSolver::solve), accumulating into an
    /// existing statistics object.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](LookaheadSolver::solve).
    pub fn solve_with_stats(
        &self,
        puzzle: &mut Puzzle,
        stats: &mut PropagatorStats,
    ) -> Result<bool, SolverError> {
        if self.propagator.propagate_with_stats(puzzle, stats)? {
            return Ok(true);
        }

        let junction_rows = puzzle.board().rows() + 1;
        let junction_columns = puzzle.board().columns() + 1;
        loop {
            let mut progress = false;

            // A junction with a lone line end is where the loop must grow,
            // so hypotheses there refute or extend quickly.
            for row in 0..junction_rows {
                for column in 0..junction_columns {
                    if puzzle.board().junction_lines(row, column) != 1 {
                        continue;
                    }
                    if self.test_edge(puzzle, stats, row, column, Direction::South)? {
                        progress = true;
                        continue;
                    }
                    if self.test_edge(puzzle, stats, row, column, Direction::East)? {
                        progress = true;
                    }
                }
            }
            if puzzle.is_solved() {
                return Ok(true);
            }
            if progress {
                continue;
            }

            for row in 0..junction_rows {
                for column in 0..junction_columns {
                    if self.test_edge(puzzle, stats, row, column, Direction::East)? {
                        progress = true;
                    }
                    if self.test_edge(puzzle, stats, row, column, Direction::South)? {
                        progress = true;
                    }
                }
            }
            if puzzle.is_solved() {
                return Ok(true);
            }
            if !progress {
                return Ok(false);
            }
        }
    }

    /// Tests both marks of one junction edge.
    ///
    /// Returns `true` when a hypothesis solved the puzzle or a refutation
    /// forced the edge; the forcing marks stay applied. Returns `false`
    /// when both marks are viable but inconclusive, leaving the edge
    /// undetermined.
    fn test_edge(
        &self,
        puzzle: &mut Puzzle,
        stats: &mut PropagatorStats,
        row: usize,
        column: usize,
        direction: Direction,
    ) -> Result<bool, SolverError> {
        let Some(edge) = puzzle.board().junction_edge(row, column, direction) else {
            return Ok(false);
        };
        if puzzle.board().edge_state(edge) != EdgeState::Undetermined {
            return Ok(false);
        }
        let checkpoint = puzzle.history_len();

        match self.try_branch(puzzle, stats, row, column, direction, EdgeState::Line) {
            Ok(true) => Ok(true),
            Err(line_error) => {
                puzzle.rewind_to(checkpoint);
                log::trace!(
                    "line at junction r:{row} c:{column} {direction} refuted, forcing cross"
                );
                match self.try_branch(puzzle, stats, row, column, direction, EdgeState::Cross) {
                    Ok(_) => Ok(true),
                    Err(cross_error) => {
                        puzzle.rewind_to(checkpoint);
                        Err(SolverError::BothBranchesInvalid {
                            row,
                            column,
                            direction,
                            line_error: Box::new(line_error),
                            cross_error: Box::new(cross_error),
                        })
                    }
                }
            }
            Ok(false) => {
                puzzle.rewind_to(checkpoint);
                match self.try_branch(puzzle, stats, row, column, direction, EdgeState::Cross) {
                    Ok(true) => Ok(true),
                    Ok(false) => {
                        puzzle.rewind_to(checkpoint);
                        Ok(false)
                    }
                    Err(cross_error) => {
                        puzzle.rewind_to(checkpoint);
                        log::trace!(
                            "cross at junction r:{row} c:{column} {direction} refuted, forcing line"
                        );
                        match self.try_branch(puzzle, stats, row, column, direction, EdgeState::Line)
                        {
                            Ok(_) => Ok(true),
                            Err(line_error) => {
                                puzzle.rewind_to(checkpoint);
                                Err(SolverError::BothBranchesInvalid {
                                    row,
                                    column,
                                    direction,
                                    line_error: Box::new(line_error),
                                    cross_error: Box::new(cross_error),
                                })
                            }
                        }
                    }
                }
            }
        }
    }

    /// Marks one junction edge and propagates.
    ///
    /// A rejected initial mark is reported the same way as a contradiction
    /// found later in the branch.
    fn try_branch(
        &self,
        puzzle: &mut Puzzle,
        stats: &mut PropagatorStats,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
    ) -> Result<bool, SolverError> {
        puzzle.mark_junction_edge(row, column, direction, state, MarkOptions::default())?;
        self.propagator.propagate_with_stats(puzzle, stats)
    }
}

/// Solves `puzzle` with the full rule set, guessing where deduction
/// stalls.
///
/// Convenience wrapper around [`LookaheadSolver::with_all_rules`] for
/// callers that do not care about statistics.
///
/// # Errors
///
/// Same as [`LookaheadSolver::solve`].
pub fn solve_with_lookahead(puzzle: &mut Puzzle) -> Result<bool, SolverError> {
    let (solved, _stats) = LookaheadSolver::with_all_rules().solve(puzzle)?;
    Ok(solved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_pure_deduction_puzzle() {
        let solver = LookaheadSolver::with_all_rules();
        let mut puzzle: Puzzle = "33.\n...".parse().unwrap();
        let (solved, stats) = solver.solve(&mut puzzle).unwrap();
        assert!(solved);
        assert!(stats.has_progress());
    }

    #[test]
    fn test_solve_needs_a_hypothesis() {
        // Corner deductions place four lines, then the two loop closures
        // are symmetric and only a hypothesis separates them.
        let solver = LookaheadSolver::with_all_rules();
        let mut puzzle: Puzzle = "3.\n.3".parse().unwrap();

        let (stalled, _stats) = solver.propagator().propagate(&mut puzzle).unwrap();
        assert!(!stalled);

        let (solved, _stats) = solver.solve(&mut puzzle).unwrap();
        assert!(solved);
        assert_eq!(puzzle.board().cell_lines(0, 0), 3);
        assert_eq!(puzzle.board().cell_lines(1, 1), 3);
    }

    #[test]
    fn test_unsolvable_puzzle_is_an_error() {
        // Stacked 3s on a one-column board: the seeded parallel lines
        // leave each 3 needing both side edges, which overflows it.
        let solver = LookaheadSolver::with_all_rules();
        let mut puzzle: Puzzle = "3\n3".parse().unwrap();
        assert!(solver.solve(&mut puzzle).is_err());
    }

    #[test]
    fn test_refuted_branch_is_rewound() {
        let solver = LookaheadSolver::with_all_rules();
        let mut puzzle: Puzzle = "3.\n.3".parse().unwrap();
        let before = puzzle.history_len();
        let (solved, _stats) = solver.solve(&mut puzzle).unwrap();
        assert!(solved);
        // Every surviving move belongs to the accepted line of play.
        assert!(puzzle.history_len() > before);
        assert!(puzzle.is_solved());
    }
}
