//! **treemaze** carves perfect mazes out of rectangular grid graphs and places an exit as far
//! from the start as a breadth first sweep can reach.

pub mod displays;
pub mod generators;
pub mod graph;
pub mod grids;
pub mod pathing;
pub mod renderers;
pub mod units;
pub mod utils;
