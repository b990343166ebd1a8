//! Core data structures for Slitherlink puzzles.
//!
//! This crate provides the board representation shared by the game and
//! solving layers: a grid of hinted cells, the lattice of junctions between
//! them, and a single arena of edges referenced from both sides.
//!
//! # Overview
//!
//! The crate is organized around three main concepts:
//!
//! 1. **The dual graph** - one structure, two views
//!    - [`board`]: The [`Board`] arena owning every cell, junction, and edge
//!    - [`cell`]: A hinted cell and its four bounding edges
//!    - [`junction`]: A lattice point and its two to four incident edges
//!
//! 2. **Edges** - the unit of play
//!    - [`edge`]: [`Edge`] state ([`EdgeState`]) plus endpoint junctions,
//!      addressed by the copyable [`EdgeId`]
//!    - [`direction`]: The four compass directions used to pick an edge
//!      relative to a cell or junction
//!
//! 3. **Inferences** - transient solver annotations
//!    - [`inference`]: [`XorPair`], an exactly-one-of-two constraint pending
//!      at a junction
//!
//! # Examples
//!
//! ```
//! use looplace_core::{Board, Direction, EdgeState};
//!
//! let mut board: Board = "22\n..".parse().unwrap();
//!
//! let top = board.cell_edge(0, 0, Direction::North);
//! board.set_edge_state(top, EdgeState::Line);
//!
//! // The same edge seen from the junction lattice.
//! assert_eq!(
//!     board.junction_edge_state(0, 0, Direction::East),
//!     Some(EdgeState::Line),
//! );
//! ```

pub mod board;
pub mod cell;
pub mod direction;
pub mod edge;
pub mod inference;
pub mod junction;

// Re-export commonly used types
pub use self::{
    board::{Board, ParseBoardError},
    cell::Cell,
    direction::Direction,
    edge::{Edge, EdgeId, EdgeState},
    inference::XorPair,
    junction::{Junction, JunctionId, MAX_INFERENCES},
};
