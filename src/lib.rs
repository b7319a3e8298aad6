//! **mazegen** is a perfect-maze generation and rendering library.
//!
//! A `MazeGrid` of nodes is carved into a maze by one of three strategies
//! (depth-first, breadth-first, minimum-weight frontier expansion), then
//! rendered as a 2x oversized wall/passage lattice for terminal or image
//! output. Generation can be observed step by step for animation.

pub mod cells;
pub mod displays;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod lattice;
pub mod renderers;
pub mod units;
mod utils;
