//! Mutable working state for one propagation pass.

use std::collections::BTreeSet;

use looplace_core::{Board, Direction, EdgeState, XorPair};
use looplace_game::{MarkOptions, MoveError, Puzzle};

/// One propagation pass over a puzzle.
///
/// A `Pass` wraps the puzzle together with the work queues the incremental
/// rules drain. Every mark routed through the pass enqueues the cells and
/// junctions whose local state the mark may have unlocked, so cheap
/// re-checks run before the full-board scans get another turn.
///
/// Queues use [`BTreeSet`], so re-checks drain in row-major order and a
/// propagation run is deterministic.
///
/// Cells and junctions whose edges are all determined are parked in
/// finished sets and never enqueued again. The sets live only as long as
/// the pass; rewinding the puzzle and propagating again starts fresh.
#[derive(Debug)]
pub struct Pass<'a> {
    puzzle: &'a mut Puzzle,
    dirty_cells: BTreeSet<(usize, usize)>,
    finished_cells: BTreeSet<(usize, usize)>,
    dirty_junctions: BTreeSet<(usize, usize)>,
    finished_junctions: BTreeSet<(usize, usize)>,
}

impl<'a> Pass<'a> {
    /// Creates a pass over `puzzle` with empty work queues.
    pub fn new(puzzle: &'a mut Puzzle) -> Self {
        Self {
            puzzle,
            dirty_cells: BTreeSet::new(),
            finished_cells: BTreeSet::new(),
            dirty_junctions: BTreeSet::new(),
            finished_junctions: BTreeSet::new(),
        }
    }

    /// The board being worked on.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.puzzle.board()
    }

    /// Whether every hinted cell has exactly its count of lines.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }

    /// Number of recorded moves, usable as a progress watermark.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.puzzle.history_len()
    }

    /// The hint at `(row, column)`, or `None` when the coordinates are off
    /// the board or the cell is unhinted.
    #[must_use]
    pub fn hint_at(&self, row: isize, column: isize) -> Option<u8> {
        let board = self.puzzle.board();
        let row = usize::try_from(row).ok().filter(|&r| r < board.rows())?;
        let column = usize::try_from(column)
            .ok()
            .filter(|&c| c < board.columns())?;
        board.hint(row, column)
    }

    /// Marks edge `direction` of cell `(row, column)` and, on change,
    /// enqueues the surrounding cells and the edge's endpoint junctions.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] of the underlying mark. A rejected mark
    /// means the deduction that requested it contradicts the current edge
    /// states.
    pub fn mark_cell_edge(
        &mut self,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
    ) -> Result<bool, MoveError> {
        let changed =
            self.puzzle
                .mark_cell_edge(row, column, direction, state, MarkOptions::default())?;
        if changed {
            self.enqueue_around_cell(row, column);
            let edge = self.puzzle.board().cell_edge(row, column, direction);
            for id in self.puzzle.board().edge(edge).endpoints() {
                let (jr, jc) = self.puzzle.board().junction_coords(id);
                self.enqueue_junction(jr, jc);
            }
        }
        Ok(changed)
    }

    /// Marks edge `direction` of junction `(row, column)` and, on change,
    /// enqueues both endpoint junctions and the cells around them.
    ///
    /// # Errors
    ///
    /// Same as [`mark_cell_edge`](Pass::mark_cell_edge).
    ///
    /// # Panics
    ///
    /// Panics if the junction has no edge in `direction`.
    pub fn mark_junction_edge(
        &mut self,
        row: usize,
        column: usize,
        direction: Direction,
        state: EdgeState,
    ) -> Result<bool, MoveError> {
        let edge = self
            .puzzle
            .board()
            .junction_edge(row, column, direction)
            .unwrap_or_else(|| panic!("junction r:{row} c:{column} has no edge {direction}"));
        let changed =
            self.puzzle
                .mark_junction_edge(row, column, direction, state, MarkOptions::default())?;
        if changed {
            for id in self.puzzle.board().edge(edge).endpoints() {
                let (jr, jc) = self.puzzle.board().junction_coords(id);
                self.enqueue_junction(jr, jc);
                // The four cells meeting at the endpoint.
                for dr in [-1_isize, 0] {
                    for dc in [-1_isize, 0] {
                        if let (Some(r), Some(c)) =
                            (jr.checked_add_signed(dr), jc.checked_add_signed(dc))
                        {
                            self.enqueue_cell(r, c);
                        }
                    }
                }
            }
        }
        Ok(changed)
    }

    /// Records an exclusive-or constraint at junction `(row, column)`.
    ///
    /// Returns `true` when the constraint was new.
    pub fn add_inference(&mut self, row: usize, column: usize, pair: XorPair) -> bool {
        self.puzzle.add_inference(row, column, pair)
    }

    /// Drops all recorded exclusive-or constraints.
    pub fn clear_inferences(&mut self) {
        self.puzzle.clear_inferences();
    }

    pub(crate) fn pop_dirty_cell(&mut self) -> Option<(usize, usize)> {
        self.dirty_cells.pop_first()
    }

    pub(crate) fn pop_dirty_junction(&mut self) -> Option<(usize, usize)> {
        self.dirty_junctions.pop_first()
    }

    pub(crate) fn finish_cell(&mut self, row: usize, column: usize) {
        self.finished_cells.insert((row, column));
    }

    pub(crate) fn finish_junction(&mut self, row: usize, column: usize) {
        self.finished_junctions.insert((row, column));
    }

    fn enqueue_around_cell(&mut self, row: usize, column: usize) {
        for dr in -1_isize..=1 {
            for dc in -1_isize..=1 {
                if let (Some(r), Some(c)) =
                    (row.checked_add_signed(dr), column.checked_add_signed(dc))
                {
                    self.enqueue_cell(r, c);
                }
            }
        }
    }

    fn enqueue_cell(&mut self, row: usize, column: usize) {
        let board = self.puzzle.board();
        if row >= board.rows() || column >= board.columns() {
            return;
        }
        if self.finished_cells.contains(&(row, column)) {
            return;
        }
        if board.cell_undetermined(row, column) == 0 {
            self.finished_cells.insert((row, column));
        } else {
            self.dirty_cells.insert((row, column));
        }
    }

    fn enqueue_junction(&mut self, row: usize, column: usize) {
        if self.finished_junctions.contains(&(row, column)) {
            return;
        }
        if self.puzzle.board().junction_unknown(row, column) == 0 {
            self.finished_junctions.insert((row, column));
        } else {
            self.dirty_junctions.insert((row, column));
        }
    }
}
