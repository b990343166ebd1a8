//! Slitherlink deduction rules.
//!
//! This module provides the local deductions the propagator cycles through.
//! Each rule implements the [`Rule`] trait and is applied to a [`Pass`];
//! a rule reports progress when it determined an edge or recorded a new
//! exclusive-or constraint.

use std::fmt::Debug;

pub use self::{
    dead_end::DeadEnds, extend_line::ExtendLines, hint_saturation::HintSaturation,
    infer_exit::InferExit, infer_ones::InferOnes, infer_threes::InferThrees,
    infer_twos::InferTwos, ones_in_corner::OnesInACorner, preempt_loops::PreemptLoops,
    recent::{RecentCells, RecentJunctions}, resolve_inferences::ResolveInferences,
    single_cell_parity::SingleCellParity, threes_in_corner::ThreesInACorner,
    threes_incoming::ThreesWithIncomingLines, twos_in_corner::TwosInACorner,
};
use crate::{Pass, SolverError};

mod dead_end;
mod extend_line;
mod hint_saturation;
mod infer_exit;
mod infer_ones;
mod infer_threes;
mod infer_twos;
mod ones_in_corner;
mod preempt_loops;
mod recent;
mod resolve_inferences;
mod single_cell_parity;
pub(crate) mod support;
mod threes_in_corner;
mod threes_incoming;
mod twos_in_corner;

/// Returns all available rules.
///
/// The incremental queue rules come first so that marks made by one scan
/// are re-checked cheaply before the next full scan runs; the remaining
/// rules are ordered from cheapest to most involved. The propagator
/// restarts from the top whenever a rule makes progress.
#[must_use]
pub fn all_rules() -> Vec<BoxedRule> {
    vec![
        Box::new(RecentCells::new()),
        Box::new(RecentJunctions::new()),
        Box::new(HintSaturation::new()),
        Box::new(DeadEnds::new()),
        Box::new(ExtendLines::new()),
        Box::new(OnesInACorner::new()),
        Box::new(ThreesInACorner::new()),
        Box::new(ThreesWithIncomingLines::new()),
        Box::new(TwosInACorner::new()),
        Box::new(InferOnes::new()),
        Box::new(InferTwos::new()),
        Box::new(InferThrees::new()),
        Box::new(InferExit::new()),
        Box::new(ResolveInferences::new()),
        Box::new(SingleCellParity::new()),
        Box::new(PreemptLoops::new()),
    ]
}

/// A trait representing a Slitherlink deduction rule.
///
/// Each rule inspects the board through a [`Pass`] and marks edges or
/// records exclusive-or constraints.
pub trait Rule: Debug {
    /// Returns the name of the rule.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the rule.
    fn clone_box(&self) -> BoxedRule;

    /// Applies the rule to a pass.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The rule determined at least one edge or recorded a
    ///   new constraint
    /// * `Ok(false)` - The rule found nothing to do
    ///
    /// # Errors
    ///
    /// Returns an error if a deduction contradicts the current edge states,
    /// which means the puzzle position itself is contradictory.
    fn apply(&self, pass: &mut Pass<'_>) -> Result<bool, SolverError>;
}

/// A boxed rule.
pub type BoxedRule = Box<dyn Rule>;

impl Clone for BoxedRule {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
