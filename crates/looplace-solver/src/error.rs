//! Solver errors.

use looplace_core::Direction;
use looplace_game::MoveError;

/// Errors raised while deducing or searching.
///
/// A [`Move`](SolverError::Move) error means a deduction tried to write a mark
/// the puzzle rejects, which can only happen when the current edge states are
/// already contradictory. The look-ahead search relies on this: it tests a
/// hypothesis, and a `Move` error coming back from propagation refutes the
/// branch.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant)]
pub enum SolverError {
    /// A deduction produced a mark the puzzle rejected.
    #[display("deduction produced an invalid mark: {_0}")]
    Move(#[error(source)] MoveError),
    /// Both states of a tested edge led to a contradiction.
    ///
    /// The puzzle has no solution from its current state.
    #[display(
        "edge {direction} of junction r:{row} c:{column} is contradictory either way (line: {line_error}; cross: {cross_error})"
    )]
    BothBranchesInvalid {
        /// Junction row of the tested edge.
        row: usize,
        /// Junction column of the tested edge.
        column: usize,
        /// Direction of the tested edge as seen from the junction.
        direction: Direction,
        /// The contradiction reached with the edge set to a line.
        line_error: Box<SolverError>,
        /// The contradiction reached with the edge set to a cross.
        cross_error: Box<SolverError>,
    },
}

#[cfg(test)]
mod tests {
    use looplace_core::EdgeState;

    use super::*;

    #[test]
    fn test_move_error_converts() {
        let err: SolverError = MoveError::OverwriteConflict {
            row: 0,
            column: 0,
            direction: Direction::North,
            current: EdgeState::Line,
        }
        .into();
        assert!(err.is_move());
    }

    #[test]
    fn test_display_nests_branch_errors() {
        let inner = SolverError::Move(MoveError::HintOverflow {
            row: 1,
            column: 2,
            hint: 1,
        });
        let err = SolverError::BothBranchesInvalid {
            row: 0,
            column: 0,
            direction: Direction::East,
            line_error: Box::new(inner.clone()),
            cross_error: Box::new(inner),
        };
        let message = err.to_string();
        assert!(message.contains("contradictory either way"));
        assert!(message.contains("h:1"));
    }
}
