//! Maze generation algorithms.
//!
//! Provides two generators:
//! - **Randomized Prim**: grows a spanning tree over the lattice cells by
//!   repeatedly knocking down a random frontier wall.
//! - **Scatter**: marks each cell as a wall with a fixed probability.

use std::fmt;

use labyr_core::Point;
use rand::{Rng, RngExt};

use crate::canvas::Canvas;

/// Glyphs drawn by the Prim generator.
pub const CORNER: char = '/';
pub const HORIZONTAL_WALL: char = '-';
pub const VERTICAL_WALL: char = '|';
pub const PASSAGE: char = ' ';

/// Glyphs drawn by the scatter generator.
pub const BLOCK: char = '#';
pub const START_MARK: char = 's';
pub const END_MARK: char = 'e';

/// Size of a Prim maze. Even sizes grow by one so that the outer border
/// is made of walls on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for PrimConfig {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
        }
    }
}

impl PrimConfig {
    /// The drawn size after rounding both sides up to an odd number.
    pub fn drawn_size(self) -> Point {
        let odd = |n: i32| if n % 2 == 0 { n + 1 } else { n };
        Point::new(odd(self.width), odd(self.height))
    }
}

/// Settings for a scattered block grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterConfig {
    pub cols: i32,
    pub rows: i32,
    /// Chance, in percent, that a cell becomes a wall.
    pub wall_pct: u32,
    /// Put an `s` in the top-left and an `e` in the bottom-right corner.
    pub markers: bool,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            wall_pct: 20,
            markers: true,
        }
    }
}

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// The requested size cannot hold a single open cell.
    TooSmall { width: i32, height: i32 },
    /// The wall percentage is above 100.
    InvalidPercent(u32),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall { width, height } => {
                write!(f, "maze size {width}x{height} is too small")
            }
            Self::InvalidPercent(pct) => write!(f, "wall percentage {pct} is above 100"),
        }
    }
}

impl std::error::Error for GenError {}

/// Maze generator driven by a random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new generator using `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a perfect maze with randomized Prim's algorithm.
    ///
    /// Cells sit at odd coordinates and are separated by walls at mixed
    /// coordinates; even-even positions are corners. Growth starts at
    /// (1, 1). Every cell ends up reachable from every other through
    /// exactly one route.
    pub fn prim(&mut self, config: PrimConfig) -> Result<Canvas, GenError> {
        let size = config.drawn_size();
        if size.x < 3 || size.y < 3 {
            return Err(GenError::TooSmall {
                width: config.width,
                height: config.height,
            });
        }

        let mut canvas = Canvas::new(size.x, size.y, PASSAGE);
        canvas.fill_fn(|p| match (p.x % 2 == 0, p.y % 2 == 0) {
            (true, true) => CORNER,
            (false, true) => HORIZONTAL_WALL,
            (true, false) => VERTICAL_WALL,
            (false, false) => PASSAGE,
        });

        let width = size.x as usize;
        let mut visited = vec![false; width * size.y as usize];
        let at = |p: Point| p.y as usize * width + p.x as usize;

        let first = Point::new(1, 1);
        visited[at(first)] = true;
        let mut walls = interior_walls(&canvas, first);
        let mut carved = 0usize;

        while !walls.is_empty() {
            let wall = walls.swap_remove(self.rng.random_range(0..walls.len()));
            // A wall on an even column separates the cells to its left and
            // right; one on an even row separates the cells above and below.
            let (a, b) = if wall.x % 2 == 0 {
                (wall.shift(-1, 0), wall.shift(1, 0))
            } else {
                (wall.shift(0, -1), wall.shift(0, 1))
            };
            let cell = match (visited[at(a)], visited[at(b)]) {
                (true, false) => b,
                (false, true) => a,
                _ => continue,
            };
            visited[at(cell)] = true;
            canvas.set(wall, PASSAGE);
            carved += 1;
            walls.extend(interior_walls(&canvas, cell));
        }

        log::debug!(
            "prim maze {}x{}: carved {carved} passages",
            size.x,
            size.y
        );
        Ok(canvas)
    }

    /// Generate a block grid where each cell is a `#` wall with
    /// probability `wall_pct` percent and open otherwise.
    pub fn scatter(&mut self, config: ScatterConfig) -> Result<Canvas, GenError> {
        if config.cols < 1 || config.rows < 1 {
            return Err(GenError::TooSmall {
                width: config.cols,
                height: config.rows,
            });
        }
        if config.wall_pct > 100 {
            return Err(GenError::InvalidPercent(config.wall_pct));
        }

        let mut canvas = Canvas::new(config.cols, config.rows, PASSAGE);
        let rng = &mut self.rng;
        canvas.fill_fn(|_| {
            if rng.random_range(0..100) < config.wall_pct {
                BLOCK
            } else {
                PASSAGE
            }
        });
        if config.markers {
            canvas.set(Point::ZERO, START_MARK);
            canvas.set(Point::new(config.cols - 1, config.rows - 1), END_MARK);
        }

        log::debug!(
            "scatter grid {}x{}: {} walls",
            config.cols,
            config.rows,
            canvas.count(BLOCK)
        );
        Ok(canvas)
    }
}

/// Walls next to `cell` that are not on the outer border and not yet carved.
fn interior_walls(canvas: &Canvas, cell: Point) -> Vec<Point> {
    let size = canvas.size();
    cell.neighbors_4()
        .into_iter()
        .filter(|p| p.x > 0 && p.x < size.x - 1 && p.y > 0 && p.y < size.y - 1)
        .filter(|&p| canvas.at(p) != Some(PASSAGE))
        .collect()
}
