//! Built-in worlds.

pub mod binary_tree;
pub mod costed_graph;
pub mod grid_maze;
pub mod linear_chain;
