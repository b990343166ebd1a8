//! Game-session layer for Slitherlink puzzles.
//!
//! A [`Puzzle`] wraps a [`looplace_core::Board`] and funnels every edge
//! write through rule-checked mark operations. Accepted marks are recorded
//! as [`Move`]s, giving unlimited undo/redo and cheap checkpoint/rewind for
//! the solver's hypothesis testing. Rejected marks report a [`MoveError`]
//! and leave state untouched.
//!
//! # Example
//!
//! ```
//! use looplace_core::{Direction, EdgeState};
//! use looplace_game::{MarkOptions, MoveError, Puzzle};
//!
//! let mut puzzle: Puzzle = "1.".parse().unwrap();
//!
//! puzzle
//!     .mark_cell_edge(
//!         0,
//!         0,
//!         Direction::North,
//!         EdgeState::Line,
//!         MarkOptions::default(),
//!     )
//!     .unwrap();
//!
//! // A second line around the hint-1 cell is rejected.
//! let err = puzzle
//!     .mark_cell_edge(
//!         0,
//!         0,
//!         Direction::West,
//!         EdgeState::Line,
//!         MarkOptions::default(),
//!     )
//!     .unwrap_err();
//! assert!(err.is_hint_overflow());
//! ```

pub use self::{error::*, moves::*, options::*, puzzle::*};

mod error;
mod moves;
mod options;
mod puzzle;
