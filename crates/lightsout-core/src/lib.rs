//! Core data structures for the Lights-Out playing field.
//!
//! This crate provides the puzzle model shared by riddle generation and game
//! orchestration: a square grid of binary toggle cells where activating one
//! cell also flips its four orthogonal neighbors.
//!
//! # Overview
//!
//! - [`position`]: cell coordinates on the field
//! - [`node`]: a single cell and its non-owning neighbor handles
//! - [`grid`]: node storage, one-time adjacency wiring, the toggle cascade,
//!   bulk reset, and the solved-state query
//!
//! The grid is the sole owner of its nodes; neighbor links are indices into
//! the grid's backing storage, resolved once at build time. All operations
//! are synchronous and total: out-of-bounds neighbor coordinates degrade to
//! absent links, never errors.
//!
//! # Examples
//!
//! ```
//! use lightsout_core::{Grid, Position};
//!
//! let mut grid = Grid::new(5);
//! grid.build(25).unwrap();
//!
//! // Activating a cell flips it and its orthogonal neighbors, one hop deep.
//! grid.activate(Position::new(2, 2), true);
//! assert!(grid.node_state(Position::new(2, 1)));
//! assert!(!grid.is_solved());
//!
//! // Pressing the same cell again unwinds the cascade.
//! grid.activate(Position::new(2, 2), false);
//! assert!(grid.is_solved());
//! ```

pub mod grid;
pub mod node;
pub mod position;

pub use self::{
    grid::{Grid, GridError},
    node::{Neighbors, Node},
    position::Position,
};
