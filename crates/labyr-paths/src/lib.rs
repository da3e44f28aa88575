//! Shortest paths through text mazes.
//!
//! A maze goes through four stages:
//!
//! 1. [`MazeText`] reads the raw lines and checks they form a rectangle.
//! 2. [`Grid::build`] classifies each glyph as wall or open using
//!    [`Glyphs`] and links every cell to its in-bounds neighbours.
//! 3. [`AStar`] runs a best-first search with unit step cost and a
//!    [`manhattan`] heuristic, tracking pending and finished cells in a
//!    [`Frontier`].
//! 4. [`Path`] walks the back-pointers from the goal to the start.
//!
//! ```
//! use labyr_core::Point;
//! use labyr_paths::{Glyphs, Grid, MazeText, SolverConfig, solve};
//!
//! let maze = MazeText::parse("...\n.-.\n...").unwrap();
//! let grid = Grid::build(&maze, &Glyphs::default());
//! let path = solve(&grid, Point::new(0, 0), Point::new(2, 2), SolverConfig::default())
//!     .unwrap()
//!     .expect("route exists");
//! // Paths are goal first.
//! assert_eq!(path.goal(), Some(Point::new(2, 2)));
//! assert_eq!(path.steps(), 4);
//! ```

mod astar;
mod distance;
mod frontier;
mod grid;
mod maze;
mod path;

pub use astar::{
    AStar, Node, Relaxation, Report, SearchState, SolveError, SolverConfig, solve, solve_report,
};
pub use distance::manhattan;
pub use frontier::Frontier;
pub use grid::{BLOCK_WALL, Cell, Glyphs, Grid, MAZE_WALLS};
pub use maze::{MazeError, MazeText};
pub use path::Path;
