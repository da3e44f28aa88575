//! Random maze generators.
//!
//! Both generators write plain maze text that
//! [`labyr_paths::MazeText`](https://docs.rs/labyr-paths) can read back:
//!
//! - **Prim**: a perfect maze on a lattice of odd-coordinate cells, drawn
//!   with `/` corners, `-` and `|` walls.
//! - **Scatter**: a block grid where each cell is a `#` wall at random.

pub mod canvas;
pub mod mapgen;

pub use canvas::Canvas;
pub use mapgen::{GenError, MazeGen, PrimConfig, ScatterConfig};
