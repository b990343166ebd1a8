//! Rule-based constraint propagation.

use looplace_core::{Direction, EdgeState};
use looplace_game::Puzzle;

use crate::{
    Pass, SolverError,
    rule::{self, BoxedRule},
};

/// Statistics collected during propagation.
///
/// Tracks how often each rule was the one to make progress, and the total
/// number of propagation steps taken.
///
/// # Examples
///
/// ```
/// use looplace_game::Puzzle;
/// use looplace_solver::Propagator;
///
/// let propagator = Propagator::with_all_rules();
/// let mut puzzle: Puzzle = "33.\n...".parse()?;
///
/// let (_solved, stats) = propagator.propagate(&mut puzzle)?;
/// println!("total steps: {}", stats.total_steps());
///
/// if let Some((i, _)) = propagator
///     .rules()
///     .iter()
///     .enumerate()
///     .find(|(_, r)| r.name() == "hint saturation")
/// {
///     println!("hint saturation applied: {}", stats.applications()[i]);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropagatorStats {
    applications: Vec<usize>,
    total_steps: usize,
}

impl PropagatorStats {
    /// Returns rule application counts in propagator order.
    ///
    /// Includes rules that never fired with a count of `0`.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Returns the total number of propagation steps taken.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` if any rule fired at least once.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }
}

/// A solver that runs local deduction rules to a fixpoint.
///
/// `Propagator` tries its rules in order and restarts from the first rule
/// whenever one makes progress, so cheap deductions always run before
/// expensive ones. It never guesses; for puzzles beyond pure deduction see
/// [`LookaheadSolver`](crate::LookaheadSolver).
///
/// # Examples
///
/// ```
/// use looplace_game::Puzzle;
/// use looplace_solver::Propagator;
///
/// let propagator = Propagator::with_all_rules();
/// let mut puzzle: Puzzle = "33.\n...".parse()?;
///
/// let (solved, stats) = propagator.propagate(&mut puzzle)?;
/// assert!(solved);
/// println!("solved in {} steps", stats.total_steps());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Propagator {
    rules: Vec<BoxedRule>,
}

impl Propagator {
    /// Creates a new propagator with the specified rules.
    ///
    /// Rules are tried in the order they appear in the vector.
    #[must_use]
    pub fn new(rules: Vec<BoxedRule>) -> Self {
        Self { rules }
    }

    /// Creates a new propagator with all available rules, ordered as in
    /// [`rule::all_rules`].
    #[must_use]
    pub fn with_all_rules() -> Self {
        Self {
            rules: rule::all_rules(),
        }
    }

    /// Creates a statistics object aligned with this propagator's rule
    /// order.
    #[must_use]
    pub fn new_stats(&self) -> PropagatorStats {
        PropagatorStats {
            applications: vec![0; self.rules.len()],
            total_steps: 0,
        }
    }

    /// Returns the configured rules in application order.
    ///
    /// The returned slice defines the index mapping used by
    /// [`PropagatorStats::applications`].
    #[must_use]
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    /// Applies one step of propagation by trying each rule in order.
    ///
    /// The first rule to make progress ends the step, so the next step
    /// starts from the first rule again.
    ///
    /// # Errors
    ///
    /// Returns an error when a rule's deduction is rejected by the puzzle,
    /// which means the current position is contradictory.
    pub fn step(
        &self,
        pass: &mut Pass<'_>,
        stats: &mut PropagatorStats,
    ) -> Result<bool, SolverError> {
        debug_assert_eq!(self.rules.len(), stats.applications.len());
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.apply(pass)? {
                log::trace!("rule fired: {}", rule.name());
                stats.applications[i] += 1;
                stats.total_steps += 1;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Propagates until the puzzle is solved or no rule makes progress.
    ///
    /// Returns `(solved, stats)`.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Propagator::step).
    pub fn propagate(&self, puzzle: &mut Puzzle) -> Result<(bool, PropagatorStats), SolverError> {
        let mut stats = self.new_stats();
        let solved = self.propagate_with_stats(puzzle, &mut stats)?;
        Ok((solved, stats))
    }

    /// Propagates like [`propagate`](Propagator::propagate), accumulating
    /// into an existing statistics object.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Propagator::step).
    pub fn propagate_with_stats(
        &self,
        puzzle: &mut Puzzle,
        stats: &mut PropagatorStats,
    ) -> Result<bool, SolverError> {
        let mut pass = Pass::new(puzzle);
        // Stale constraints may descend from marks that have been undone.
        pass.clear_inferences();
        mark_adjacent_threes(&mut pass)?;

        while self.step(&mut pass, stats)? {
            if pass.is_solved() {
                log::debug!("puzzle solved after {} steps", stats.total_steps());
                return Ok(true);
            }
        }
        log::debug!(
            "propagation stalled after {} steps, solved: {}",
            stats.total_steps(),
            pass.is_solved()
        );
        Ok(pass.is_solved())
    }
}

/// Seeds the pass with the forced edges between orthogonally adjacent 3s.
///
/// Two 3s side by side share three parallel lines, and the loop cannot
/// slip between them past either shared end.
fn mark_adjacent_threes(pass: &mut Pass<'_>) -> Result<(), SolverError> {
    use Direction::{East, North, South, West};
    let rows = pass.board().rows();
    let columns = pass.board().columns();
    for r in 0..rows {
        for c in 0..columns {
            if pass.board().hint(r, c) != Some(3) {
                continue;
            }
            if c + 1 < columns && pass.board().hint(r, c + 1) == Some(3) {
                pass.mark_cell_edge(r, c, West, EdgeState::Line)?;
                pass.mark_cell_edge(r, c, East, EdgeState::Line)?;
                pass.mark_cell_edge(r, c + 1, East, EdgeState::Line)?;
                if r > 0 {
                    pass.mark_cell_edge(r - 1, c, East, EdgeState::Cross)?;
                }
                if r + 1 < rows {
                    pass.mark_cell_edge(r + 1, c, East, EdgeState::Cross)?;
                }
            }
            if r + 1 < rows && pass.board().hint(r + 1, c) == Some(3) {
                pass.mark_cell_edge(r, c, North, EdgeState::Line)?;
                pass.mark_cell_edge(r, c, South, EdgeState::Line)?;
                pass.mark_cell_edge(r + 1, c, South, EdgeState::Line)?;
                if c > 0 {
                    pass.mark_cell_edge(r, c - 1, South, EdgeState::Cross)?;
                }
                if c + 1 < columns {
                    pass.mark_cell_edge(r, c + 1, South, EdgeState::Cross)?;
                }
            }
        }
    }
    Ok(())
}
