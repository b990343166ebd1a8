//! Deductive solver for Slitherlink puzzles.
//!
//! Solving happens in two layers. The [`Propagator`] drains a library of
//! local deduction rules ([`rule`]) to a fixpoint, marking every edge the
//! current position forces. The [`LookaheadSolver`] takes over when
//! propagation stalls: it marks an undetermined edge hypothetically,
//! propagates, and turns a contradiction into a forced mark of the
//! opposite state.
//!
//! All marks flow through a [`Pass`], which validates them against the
//! puzzle rules and feeds the incremental work queues. A rejected mark
//! surfaces as a [`SolverError`] rather than a panic, which is exactly the
//! signal the look-ahead uses to refute a hypothesis.
//!
//! # Example
//!
//! ```
//! use looplace_game::Puzzle;
//! use looplace_solver::LookaheadSolver;
//!
//! let mut puzzle: Puzzle = "3.\n.3".parse()?;
//! let solver = LookaheadSolver::with_all_rules();
//!
//! let (solved, stats) = solver.solve(&mut puzzle)?;
//! assert!(solved);
//! assert!(stats.has_progress());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{error::*, pass::*, propagator::*, search::*};

mod error;
mod pass;
mod propagator;
pub mod rule;
mod search;

#[cfg(test)]
mod testing;
