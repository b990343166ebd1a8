use std::str::FromStr;

use looplace_core::{Board, Direction, EdgeId, EdgeState, ParseBoardError, XorPair};

use crate::{MarkOptions, Move, MoveError};

/// A Slitherlink game session: a board plus undo/redo history.
///
/// All edge writes go through [`mark_cell_edge`](Puzzle::mark_cell_edge) (or
/// its junction-addressed twin), which enforces the play rules and records a
/// [`Move`] for every accepted change. A rejected mark leaves the board and
/// the history untouched.
///
/// # Example
///
/// ```
/// use looplace_core::{Direction, EdgeState};
/// use looplace_game::{MarkOptions, Puzzle};
///
/// let mut puzzle: Puzzle = "2.\n.2".parse().unwrap();
///
/// puzzle
///     .mark_cell_edge(
///         0,
///         0,
///         Direction::North,
///         EdgeState::Line,
///         MarkOptions::default(),
///     )
///     .unwrap();
/// assert_eq!(puzzle.history_len(), 1);
///
/// puzzle.undo();
/// assert_eq!(puzzle.history_len(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    board: Board,
    history: Vec<Move>,
    redo: Vec<Move>,
}

impl Puzzle {
    /// Returns the underlying board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of accepted marks since the start (or the last
    /// rewind past them).
    ///
    /// The solver uses this as a cheap checkpoint token for
    /// [`rewind_to`](Puzzle::rewind_to).
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the recorded history, oldest move first.
    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Marks the edge of cell `(row, column)` in `direction`.
    ///
    /// Returns `Ok(true)` when the edge changed, `Ok(false)` when it already
    /// carried `state` (no history entry is recorded in that case, and
    /// override protection is not consulted).
    ///
    /// An accepted change clears the redo history.
    ///
    /// # Errors
    ///
    /// With override protection on, returns [`MoveError::OverwriteConflict`]
    /// if the edge is already determined. With validation on:
    ///
    /// - [`MoveError::HintOverflow`] if a line would exceed the hint of
    ///   either bordering cell,
    /// - [`MoveError::HintUnderflow`] if a cross would make the hint of
    ///   either bordering cell unreachable,
    /// - [`MoveError::JunctionOverflow`] if a line would give an endpoint
    ///   junction a third line,
    /// - [`MoveError::PrematureLoop`] if a line would close a cycle while
    ///   the puzzle is not yet solved.
    ///
    /// # Panics
    ///
    /// Panics if `(row, column)` is off the board.
    pub fn mark_cell_edge(
        &mut self,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
        options: MarkOptions,
    ) -> Result<bool, MoveError> {
        let edge = self.board.cell_edge(row, column, direction);
        let current = self.board.edge_state(edge);

        if current == state {
            return Ok(false);
        }

        if options.prevents_override() && current.is_determined() {
            return Err(MoveError::OverwriteConflict {
                row,
                column,
                direction,
                current,
            });
        }

        if options.validates() {
            self.validate_mark(row, column, direction, edge, state)?;
        }

        self.board.set_edge_state(edge, state);

        if options.validates() && state == EdgeState::Line {
            // The new line may have joined the two ends of an existing
            // chain. Walk from one endpoint, skipping the new edge itself;
            // reaching the other endpoint means a cycle closed.
            let [start, end] = self.board.edge(edge).endpoints();
            if self.board.line_path_connects(start, end, Some(edge)) && !self.is_solved() {
                self.board.set_edge_state(edge, current);
                return Err(MoveError::PrematureLoop {
                    row,
                    column,
                    direction,
                });
            }
        }

        self.history.push(Move {
            row,
            column,
            direction,
            from: current,
            to: state,
        });
        self.redo.clear();

        Ok(true)
    }

    /// Marks the edge incident to junction `(row, column)` in `direction`.
    ///
    /// The mark is translated to the bordering cell's coordinates and
    /// delegated to [`mark_cell_edge`](Puzzle::mark_cell_edge), so the
    /// recorded [`Move`] always names a cell.
    ///
    /// # Errors
    ///
    /// Same as [`mark_cell_edge`](Puzzle::mark_cell_edge).
    ///
    /// # Panics
    ///
    /// Panics if the junction has no edge in `direction` (lattice border).
    pub fn mark_junction_edge(
        &mut self,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
        options: MarkOptions,
    ) -> Result<bool, MoveError> {
        let rows = self.board.rows();
        let columns = self.board.columns();
        match direction {
            Direction::North => {
                if column < columns {
                    self.mark_cell_edge(row - 1, column, Direction::West, state, options)
                } else {
                    self.mark_cell_edge(row - 1, column - 1, Direction::East, state, options)
                }
            }
            Direction::South => {
                if column < columns {
                    self.mark_cell_edge(row, column, Direction::West, state, options)
                } else {
                    self.mark_cell_edge(row, column - 1, Direction::East, state, options)
                }
            }
            Direction::East => {
                if row < rows {
                    self.mark_cell_edge(row, column, Direction::North, state, options)
                } else {
                    self.mark_cell_edge(row - 1, column, Direction::South, state, options)
                }
            }
            Direction::West => {
                if row < rows {
                    self.mark_cell_edge(row, column - 1, Direction::North, state, options)
                } else {
                    self.mark_cell_edge(row - 1, column - 1, Direction::South, state, options)
                }
            }
        }
    }

    fn validate_mark(
        &self,
        row: usize,
        column: usize,
        direction: Direction,
        edge: EdgeId,
        state: EdgeState,
    ) -> Result<(), MoveError> {
        self.validate_cell_capacity(row, column, state)?;
        if let Some((adj_row, adj_column)) = self.adjacent_cell(row, column, direction) {
            self.validate_cell_capacity(adj_row, adj_column, state)?;
        }

        if state == EdgeState::Line {
            for endpoint in self.board.edge(edge).endpoints() {
                let (jr, jc) = self.board.junction_coords(endpoint);
                if self.board.junction_lines(jr, jc) >= 2 {
                    return Err(MoveError::JunctionOverflow { row: jr, column: jc });
                }
            }
        }

        Ok(())
    }

    fn validate_cell_capacity(
        &self,
        row: usize,
        column: usize,
        state: EdgeState,
    ) -> Result<(), MoveError> {
        let Some(hint) = self.board.hint(row, column) else {
            return Ok(());
        };
        let hint_count = usize::from(hint);
        let lines = self.board.cell_lines(row, column);
        match state {
            EdgeState::Line if lines + 1 > hint_count => {
                Err(MoveError::HintOverflow { row, column, hint })
            }
            // Crossing one of the undetermined edges caps the reachable
            // line count at lines + undetermined - 1.
            EdgeState::Cross if lines + self.board.cell_undetermined(row, column) <= hint_count => {
                Err(MoveError::HintUnderflow { row, column, hint })
            }
            _ => Ok(()),
        }
    }

    fn adjacent_cell(&self, row: usize, column: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = match direction {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        };
        let row = row.checked_add_signed(dr)?;
        let column = column.checked_add_signed(dc)?;
        (row < self.board.rows() && column < self.board.columns()).then_some((row, column))
    }

    /// Reverts the most recent mark, if any, and returns it.
    ///
    /// Pending exclusive-or inferences are not part of the history; the
    /// solver clears them wholesale at the start of each propagation pass.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        let edge = self.board.cell_edge(mv.row, mv.column, mv.direction);
        debug_assert_eq!(self.board.edge_state(edge), mv.to);
        self.board.set_edge_state(edge, mv.from);
        self.redo.push(mv);
        Some(mv)
    }

    /// Re-applies the most recently undone mark, if any, and returns it.
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.redo.pop()?;
        let edge = self.board.cell_edge(mv.row, mv.column, mv.direction);
        debug_assert_eq!(self.board.edge_state(edge), mv.from);
        self.board.set_edge_state(edge, mv.to);
        self.history.push(mv);
        Some(mv)
    }

    /// Undoes marks until the history is `checkpoint` entries long.
    ///
    /// A `checkpoint` at or beyond the current length is a no-op. This is
    /// how the search engine abandons a refuted hypothesis.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        while self.history.len() > checkpoint {
            self.undo();
        }
    }

    /// Returns `true` when every hinted cell's line count equals its hint.
    ///
    /// Loop connectivity is not verified here: the loop-closure check in
    /// [`mark_cell_edge`](Puzzle::mark_cell_edge) already rejects any cycle
    /// that forms before the hints are all satisfied, so no validated
    /// sequence of marks can reach a multi-loop "solved" state.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        for row in 0..self.board.rows() {
            for column in 0..self.board.columns() {
                if let Some(hint) = self.board.hint(row, column)
                    && self.board.cell_lines(row, column) != usize::from(hint)
                {
                    return false;
                }
            }
        }
        true
    }

    /// Records an exclusive-or inference at a junction, rejecting
    /// duplicates. Returns whether the pair was new.
    pub fn add_inference(&mut self, row: usize, column: usize, pair: XorPair) -> bool {
        self.board.add_junction_inference(row, column, pair)
    }

    /// Drops every pending inference on the board.
    pub fn clear_inferences(&mut self) {
        self.board.clear_inferences();
    }
}

impl From<Board> for Puzzle {
    fn from(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            redo: Vec::new(),
        }
    }
}

impl FromStr for Puzzle {
    type Err = ParseBoardError;

    /// Parses a hint-grid literal; see
    /// [`Board::from_str`](looplace_core::Board#impl-FromStr-for-Board).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Board>().map(Self::from)
    }
}
