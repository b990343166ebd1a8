//! Fluent harness for exercising a single rule against a hand-built
//! position.

use looplace_core::{Direction, EdgeState, XorPair};
use looplace_game::{MarkOptions, Puzzle};

use crate::{Pass, rule::Rule};

/// Builds a position, applies a rule once, and asserts on the outcome.
///
/// Each application runs on a fresh [`Pass`], so the work queues start
/// empty just as they do at the beginning of a propagation run.
pub(crate) struct RuleTester {
    puzzle: Puzzle,
    progress: bool,
}

impl RuleTester {
    pub(crate) fn from_str(input: &str) -> Self {
        Self {
            puzzle: input.parse().expect("test board must parse"),
            progress: false,
        }
    }

    #[track_caller]
    pub(crate) fn mark_cell_edge(
        mut self,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
    ) -> Self {
        self.puzzle
            .mark_cell_edge(row, column, direction, state, MarkOptions::default())
            .expect("setup mark must be legal");
        self
    }

    #[track_caller]
    pub(crate) fn mark_junction_edge(
        mut self,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
    ) -> Self {
        self.puzzle
            .mark_junction_edge(row, column, direction, state, MarkOptions::default())
            .expect("setup mark must be legal");
        self
    }

    pub(crate) fn add_inference(
        mut self,
        row: usize,
        column: usize,
        dir1: Direction,
        dir2: Direction,
    ) -> Self {
        self.puzzle.add_inference(row, column, XorPair::new(dir1, dir2));
        self
    }

    #[track_caller]
    pub(crate) fn apply_once(mut self, rule: &impl Rule) -> Self {
        let mut pass = Pass::new(&mut self.puzzle);
        self.progress = rule.apply(&mut pass).expect("rule must not contradict");
        self
    }

    #[track_caller]
    pub(crate) fn assert_progress(self) -> Self {
        assert!(self.progress, "expected the rule to make progress");
        self
    }

    #[track_caller]
    pub(crate) fn assert_no_progress(self) -> Self {
        assert!(!self.progress, "expected the rule to make no progress");
        self
    }

    #[track_caller]
    pub(crate) fn assert_cell_edge(
        self,
        row: usize,
        column: usize,
        direction: Direction,
        expected: EdgeState,
    ) -> Self {
        let actual = self.puzzle.board().cell_edge_state(row, column, direction);
        assert_eq!(
            actual, expected,
            "edge {direction} of cell r:{row} c:{column}"
        );
        self
    }

    #[track_caller]
    pub(crate) fn assert_junction_edge(
        self,
        row: usize,
        column: usize,
        direction: Direction,
        expected: EdgeState,
    ) -> Self {
        let actual = self
            .puzzle
            .board()
            .junction_edge_state(row, column, direction)
            .unwrap_or_else(|| panic!("junction r:{row} c:{column} has no edge {direction}"));
        assert_eq!(
            actual, expected,
            "edge {direction} of junction r:{row} c:{column}"
        );
        self
    }

    #[track_caller]
    pub(crate) fn assert_inference(
        self,
        row: usize,
        column: usize,
        dir1: Direction,
        dir2: Direction,
    ) -> Self {
        assert!(
            self.puzzle.board().junction(row, column).has_inference(dir1, dir2),
            "expected an exclusive-or pair {dir1}/{dir2} at junction r:{row} c:{column}"
        );
        self
    }
}
