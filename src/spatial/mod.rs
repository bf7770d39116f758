//! Spatial data structures
//!
//! This module contains:
//! - Grid state with column/row addressing
//! - Tile types, directions and adjacency rules

/// Grid and cell state
pub mod grid;
/// Tile types and the adjacency rule table
pub mod tiles;

pub use grid::Grid;
