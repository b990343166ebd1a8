use std::str::FromStr;

use tinyvec::ArrayVec;

use crate::{Cell, Direction, Edge, EdgeId, EdgeState, Junction, JunctionId, XorPair};

/// The fixed dual graph of a Slitherlink board: `rows × columns` cells, a
/// `(rows+1) × (columns+1)` lattice of junctions, and one shared edge arena.
///
/// Every edge is constructed exactly once and addressed by [`EdgeId`] from
/// both bordering cells and both endpoint junctions, so a single state write
/// is visible everywhere. The board itself enforces no play rules; legality
/// checking lives in `looplace-game`.
///
/// # Examples
///
/// ```
/// use looplace_core::{Board, Direction};
///
/// let board = Board::new(2, 3);
/// // Adjacent cells share one edge object.
/// assert_eq!(
///     board.cell(0, 0).edge(Direction::East),
///     board.cell(0, 1).edge(Direction::West),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    junctions: Vec<Junction>,
    edges: Vec<Edge>,
}

impl Board {
    /// Builds an all-undetermined, unhinted board.
    ///
    /// Construction is purely structural: `O(rows · columns)`, no line or
    /// hint data is set here.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `columns` is zero.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "board dimensions must be positive");

        // Horizontal edges first (row-major over the (rows+1) x columns
        // lattice gaps), then vertical edges (rows x (columns+1)).
        let horizontal_count = (rows + 1) * columns;
        let vertical_count = rows * (columns + 1);
        let junction_columns = columns + 1;
        let junction_id = |r: usize, c: usize| JunctionId((r * junction_columns + c) as u32);
        let h_edge = |r: usize, c: usize| EdgeId((r * columns + c) as u32);
        let v_edge =
            |r: usize, c: usize| EdgeId((horizontal_count + r * junction_columns + c) as u32);

        let mut edges = Vec::with_capacity(horizontal_count + vertical_count);
        for r in 0..=rows {
            for c in 0..columns {
                edges.push(Edge {
                    state: EdgeState::Undetermined,
                    vertical: false,
                    endpoints: [junction_id(r, c), junction_id(r, c + 1)],
                });
            }
        }
        for r in 0..rows {
            for c in 0..=columns {
                edges.push(Edge {
                    state: EdgeState::Undetermined,
                    vertical: true,
                    endpoints: [junction_id(r, c), junction_id(r + 1, c)],
                });
            }
        }

        let mut cells = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                let mut slots = [EdgeId(0); 4];
                slots[Direction::North.index()] = h_edge(r, c);
                slots[Direction::South.index()] = h_edge(r + 1, c);
                slots[Direction::West.index()] = v_edge(r, c);
                slots[Direction::East.index()] = v_edge(r, c + 1);
                cells.push(Cell {
                    hint: None,
                    edges: slots,
                });
            }
        }

        let mut junctions = Vec::with_capacity((rows + 1) * junction_columns);
        for r in 0..=rows {
            for c in 0..=columns {
                let mut slots = [None; 4];
                if r > 0 {
                    slots[Direction::North.index()] = Some(v_edge(r - 1, c));
                }
                if r < rows {
                    slots[Direction::South.index()] = Some(v_edge(r, c));
                }
                if c > 0 {
                    slots[Direction::West.index()] = Some(h_edge(r, c - 1));
                }
                if c < columns {
                    slots[Direction::East.index()] = Some(h_edge(r, c));
                }
                junctions.push(Junction {
                    edges: slots,
                    inferences: ArrayVec::new(),
                });
            }
        }

        Self {
            rows,
            columns,
            cells,
            junctions,
            edges,
        }
    }

    /// Returns the number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the cell at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is off the board.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        assert!(row < self.rows && column < self.columns, "cell out of range");
        &self.cells[row * self.columns + column]
    }

    /// Returns the hint of the cell at `(row, column)`, if any.
    #[must_use]
    pub fn hint(&self, row: usize, column: usize) -> Option<u8> {
        self.cell(row, column).hint
    }

    /// Assigns or clears a cell hint.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is off the board or the hint exceeds 3.
    pub fn set_hint(&mut self, row: usize, column: usize, hint: Option<u8>) {
        assert!(row < self.rows && column < self.columns, "cell out of range");
        assert!(hint.is_none_or(|h| h <= 3), "hint must be 0-3");
        self.cells[row * self.columns + column].hint = hint;
    }

    /// Returns the junction at lattice coordinate `(row, column)`,
    /// `row ∈ 0..=rows`, `column ∈ 0..=columns`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is off the lattice.
    #[must_use]
    pub fn junction(&self, row: usize, column: usize) -> &Junction {
        &self.junctions[self.junction_id(row, column).index()]
    }

    /// Returns the stable id of the junction at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is off the lattice.
    #[must_use]
    pub fn junction_id(&self, row: usize, column: usize) -> JunctionId {
        assert!(
            row <= self.rows && column <= self.columns,
            "junction out of range"
        );
        JunctionId((row * (self.columns + 1) + column) as u32)
    }

    /// Returns the lattice coordinate of a junction id.
    #[must_use]
    pub fn junction_coords(&self, id: JunctionId) -> (usize, usize) {
        let width = self.columns + 1;
        (id.index() / width, id.index() % width)
    }

    /// Returns the edge behind `id`.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Returns the current state of the edge behind `id`.
    #[must_use]
    pub fn edge_state(&self, id: EdgeId) -> EdgeState {
        self.edges[id.index()].state
    }

    /// Writes an edge state.
    ///
    /// This is a plain setter: history, override protection, and rule
    /// validation are the puzzle layer's responsibility.
    pub fn set_edge_state(&mut self, id: EdgeId, state: EdgeState) {
        self.edges[id.index()].state = state;
    }

    /// Returns the id of the edge bounding cell `(row, column)` in `dir`.
    #[must_use]
    pub fn cell_edge(&self, row: usize, column: usize, dir: Direction) -> EdgeId {
        self.cell(row, column).edge(dir)
    }

    /// Returns the state of the edge bounding cell `(row, column)` in `dir`.
    #[must_use]
    pub fn cell_edge_state(&self, row: usize, column: usize, dir: Direction) -> EdgeState {
        self.edge_state(self.cell_edge(row, column, dir))
    }

    /// Returns the id of the edge incident to junction `(row, column)` in
    /// `dir`, or `None` at the board boundary.
    #[must_use]
    pub fn junction_edge(&self, row: usize, column: usize, dir: Direction) -> Option<EdgeId> {
        self.junction(row, column).edge(dir)
    }

    /// Returns the state of the edge incident to junction `(row, column)` in
    /// `dir`, or `None` at the board boundary.
    #[must_use]
    pub fn junction_edge_state(
        &self,
        row: usize,
        column: usize,
        dir: Direction,
    ) -> Option<EdgeState> {
        self.junction_edge(row, column, dir)
            .map(|id| self.edge_state(id))
    }

    fn count_cell_edges(&self, row: usize, column: usize, wanted: EdgeState) -> usize {
        self.cell(row, column)
            .edges
            .iter()
            .filter(|&&id| self.edge_state(id) == wanted)
            .count()
    }

    /// Returns how many of the cell's four edges are lines.
    #[must_use]
    pub fn cell_lines(&self, row: usize, column: usize) -> usize {
        self.count_cell_edges(row, column, EdgeState::Line)
    }

    /// Returns how many of the cell's four edges are crossed out.
    #[must_use]
    pub fn cell_crosses(&self, row: usize, column: usize) -> usize {
        self.count_cell_edges(row, column, EdgeState::Cross)
    }

    /// Returns how many of the cell's four edges are still undetermined.
    #[must_use]
    pub fn cell_undetermined(&self, row: usize, column: usize) -> usize {
        self.count_cell_edges(row, column, EdgeState::Undetermined)
    }

    fn count_junction_edges(&self, row: usize, column: usize, wanted: EdgeState) -> usize {
        self.junction(row, column)
            .edges
            .iter()
            .filter_map(|slot| slot.map(|id| self.edge_state(id)))
            .filter(|&state| state == wanted)
            .count()
    }

    /// Returns how many incident edges of the junction are lines.
    #[must_use]
    pub fn junction_lines(&self, row: usize, column: usize) -> usize {
        self.count_junction_edges(row, column, EdgeState::Line)
    }

    /// Returns how many incident edges of the junction are crossed out.
    #[must_use]
    pub fn junction_crosses(&self, row: usize, column: usize) -> usize {
        self.count_junction_edges(row, column, EdgeState::Cross)
    }

    /// Returns how many incident edges of the junction are undetermined.
    #[must_use]
    pub fn junction_unknown(&self, row: usize, column: usize) -> usize {
        self.count_junction_edges(row, column, EdgeState::Undetermined)
    }

    /// Returns the number of incident edges of the junction.
    #[must_use]
    pub fn junction_edge_count(&self, row: usize, column: usize) -> usize {
        self.junction(row, column).edge_count()
    }

    /// Records an exclusive-or inference at a junction.
    ///
    /// Returns `false` without change when an equal (order-insensitive)
    /// pair is already pending.
    pub fn add_junction_inference(&mut self, row: usize, column: usize, pair: XorPair) -> bool {
        let id = self.junction_id(row, column);
        let junction = &mut self.junctions[id.index()];
        if junction
            .inferences
            .iter()
            .any(|inf| inf.matches(pair.first(), pair.second()))
        {
            return false;
        }
        junction.inferences.push(pair);
        true
    }

    /// Drops every pending inference on the whole board.
    ///
    /// The solver calls this at the start of each propagation pass since
    /// pending pairs may derive from a rolled-back state.
    pub fn clear_inferences(&mut self) {
        for junction in &mut self.junctions {
            junction.inferences.clear();
        }
    }

    /// Follows line edges from `start`, never immediately re-traversing the
    /// previous edge (`skip` seeds that exclusion), and reports whether the
    /// walk arrives at `target`.
    ///
    /// The walk stops at any junction without a unique continuation. Under
    /// the puzzle invariants (at most two lines per junction) the
    /// continuation is always unique; a step bound guards against walks over
    /// unvalidated states.
    #[must_use]
    pub fn line_path_connects(
        &self,
        start: JunctionId,
        target: JunctionId,
        skip: Option<EdgeId>,
    ) -> bool {
        let mut junction = start;
        let mut prior = skip;
        for _ in 0..=self.edges.len() {
            if junction == target {
                return true;
            }
            let next = self.junctions[junction.index()].edges.iter().find_map(|e| {
                e.filter(|&id| Some(id) != prior && self.edge_state(id) == EdgeState::Line)
            });
            match next {
                Some(id) => {
                    junction = self.edge(id).other_endpoint(junction);
                    prior = Some(id);
                }
                None => return false,
            }
        }
        false
    }

    /// Iterates over every edge id in the arena.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len()).map(|i| EdgeId(i as u32))
    }
}

/// Error parsing a hint-grid literal into a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The input contained no rows.
    #[display("board literal has no rows")]
    Empty,
    /// A row's width differs from the first row's.
    #[display("row {row} has {found} cells, expected {expected}")]
    UnevenRows {
        /// Zero-based row index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character other than `0`-`3`, `.`, or `_`.
    #[display("invalid hint character {character:?}")]
    InvalidHint {
        /// The offending character.
        character: char,
    },
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a compact hint-grid literal.
    ///
    /// One line per cell row; `0`-`3` are hints, `.` or `_` is an unhinted
    /// cell, and whitespace inside a line is ignored. Blank lines are
    /// skipped. This covers tests and embedded fixtures; reading puzzle
    /// files stays outside the engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use looplace_core::Board;
    ///
    /// let board: Board = "2.\n.2".parse().unwrap();
    /// assert_eq!(board.hint(0, 0), Some(2));
    /// assert_eq!(board.hint(0, 1), None);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hint_rows: Vec<Vec<Option<u8>>> = Vec::new();
        for line in s.lines() {
            let mut row = Vec::new();
            for ch in line.chars() {
                match ch {
                    '.' | '_' => row.push(None),
                    '0'..='3' => row.push(Some(ch as u8 - b'0')),
                    ch if ch.is_whitespace() => {}
                    ch => return Err(ParseBoardError::InvalidHint { character: ch }),
                }
            }
            if !row.is_empty() {
                hint_rows.push(row);
            }
        }

        let rows = hint_rows.len();
        if rows == 0 {
            return Err(ParseBoardError::Empty);
        }
        let columns = hint_rows[0].len();
        for (r, row) in hint_rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ParseBoardError::UnevenRows {
                    row: r,
                    expected: columns,
                    found: row.len(),
                });
            }
        }

        let mut board = Self::new(rows, columns);
        for (r, row) in hint_rows.iter().enumerate() {
            for (c, hint) in row.iter().enumerate() {
                board.set_hint(r, c, *hint);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_edges_are_shared() {
        let board = Board::new(3, 3);

        // Horizontally adjacent cells share one vertical edge.
        assert_eq!(
            board.cell(1, 1).edge(Direction::East),
            board.cell(1, 2).edge(Direction::West),
        );
        // Vertically adjacent cells share one horizontal edge.
        assert_eq!(
            board.cell(1, 1).edge(Direction::South),
            board.cell(2, 1).edge(Direction::North),
        );
    }

    #[test]
    fn test_cell_and_junction_views_agree() {
        let board = Board::new(2, 2);

        // Cell (0, 0)'s north edge is the east edge of junction (0, 0) and
        // the west edge of junction (0, 1).
        let north = board.cell(0, 0).edge(Direction::North);
        assert_eq!(board.junction_edge(0, 0, Direction::East), Some(north));
        assert_eq!(board.junction_edge(0, 1, Direction::West), Some(north));

        // Its west edge hangs south of junction (0, 0).
        let west = board.cell(0, 0).edge(Direction::West);
        assert_eq!(board.junction_edge(0, 0, Direction::South), Some(west));
        assert_eq!(board.junction_edge(1, 0, Direction::North), Some(west));
    }

    #[test]
    fn test_boundary_junction_degrees() {
        let board = Board::new(2, 3);

        assert_eq!(board.junction_edge_count(0, 0), 2);
        assert_eq!(board.junction_edge_count(0, 1), 3);
        assert_eq!(board.junction_edge_count(1, 1), 4);
        assert_eq!(board.junction_edge_count(2, 3), 2);
        assert_eq!(board.junction_edge(0, 0, Direction::North), None);
        assert_eq!(board.junction_edge(0, 0, Direction::West), None);
    }

    #[test]
    fn test_edge_endpoints_are_ordered() {
        let board = Board::new(2, 2);

        let north = board.cell(0, 0).edge(Direction::North);
        assert!(!board.edge(north).is_vertical());
        assert_eq!(
            board.edge(north).endpoints(),
            [board.junction_id(0, 0), board.junction_id(0, 1)],
        );

        let west = board.cell(0, 0).edge(Direction::West);
        assert!(board.edge(west).is_vertical());
        assert_eq!(
            board.edge(west).endpoints(),
            [board.junction_id(0, 0), board.junction_id(1, 0)],
        );
    }

    #[test]
    fn test_counts_follow_edge_state() {
        let mut board = Board::new(2, 2);
        let north = board.cell(0, 0).edge(Direction::North);
        let west = board.cell(0, 0).edge(Direction::West);

        assert_eq!(board.cell_undetermined(0, 0), 4);
        board.set_edge_state(north, EdgeState::Line);
        board.set_edge_state(west, EdgeState::Cross);

        assert_eq!(board.cell_lines(0, 0), 1);
        assert_eq!(board.cell_crosses(0, 0), 1);
        assert_eq!(board.cell_undetermined(0, 0), 2);
        assert_eq!(board.junction_lines(0, 0), 1);
        assert_eq!(board.junction_crosses(0, 0), 1);
        assert_eq!(board.junction_unknown(0, 1), 2);
    }

    #[test]
    fn test_inference_deduplication() {
        let mut board = Board::new(2, 2);
        let pair = XorPair::new(Direction::North, Direction::West);

        assert!(board.add_junction_inference(1, 1, pair));
        // Same pair, either order, is rejected.
        assert!(!board.add_junction_inference(1, 1, pair));
        assert!(!board.add_junction_inference(
            1,
            1,
            XorPair::new(Direction::West, Direction::North)
        ));
        assert_eq!(board.junction(1, 1).inferences().len(), 1);

        board.clear_inferences();
        assert!(board.junction(1, 1).inferences().is_empty());
    }

    #[test]
    fn test_line_path_connects() {
        let mut board = Board::new(2, 2);
        // Draw the top edge and the left edge of cell (0, 0): an L from
        // junction (0, 1) down to junction (1, 0).
        let north = board.cell(0, 0).edge(Direction::North);
        let west = board.cell(0, 0).edge(Direction::West);
        board.set_edge_state(north, EdgeState::Line);
        board.set_edge_state(west, EdgeState::Line);

        let top_right = board.junction_id(0, 1);
        let bottom_left = board.junction_id(1, 0);
        assert!(board.line_path_connects(top_right, bottom_left, None));
        assert!(board.line_path_connects(bottom_left, top_right, None));
        // Skipping the first edge of the walk breaks the path.
        assert!(!board.line_path_connects(bottom_left, top_right, Some(west)));
        assert!(!board.line_path_connects(top_right, board.junction_id(2, 2), None));
    }

    #[test]
    fn test_parse_board_literal() {
        let board: Board = "
            2 . 1
            . 3 0
        "
        .parse()
        .unwrap();

        assert_eq!(board.rows(), 2);
        assert_eq!(board.columns(), 3);
        assert_eq!(board.hint(0, 0), Some(2));
        assert_eq!(board.hint(0, 1), None);
        assert_eq!(board.hint(1, 1), Some(3));
        assert_eq!(board.hint(1, 2), Some(0));
    }

    #[test]
    fn test_parse_board_errors() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::Empty));
        assert_eq!(
            "12\n1".parse::<Board>(),
            Err(ParseBoardError::UnevenRows {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(
            "4".parse::<Board>(),
            Err(ParseBoardError::InvalidHint { character: '4' })
        );
    }
}
