//! Cell grid built from maze text.
//!
//! [`Grid`] is an arena of [`Cell`] records addressed by a flat row-major
//! index. Each cell knows whether it is a wall and which in-bounds cells
//! border it. The grid never changes after [`Grid::build`]; search state
//! lives in the solver, so one grid can back any number of solves.

use labyr_core::{Point, Range};

use crate::maze::MazeText;

/// Wall glyphs of generated mazes: lattice corners and both wall directions.
pub const MAZE_WALLS: [char; 3] = ['/', '-', '|'];

/// Wall glyph of hand-drawn block grids.
pub const BLOCK_WALL: char = '#';

/// The set of characters that denote walls. Every other character,
/// whitespace included, is an open cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    walls: Vec<char>,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            walls: MAZE_WALLS.to_vec(),
        }
    }
}

impl Glyphs {
    fn new(walls: impl IntoIterator<Item = char>) -> Self {
        Self {
            walls: walls.into_iter().collect(),
        }
    }

    /// The `#` wall set.
    pub fn blocks() -> Self {
        Self::new([BLOCK_WALL])
    }

    /// Whether `ch` is a wall glyph.
    #[inline]
    pub fn is_wall(&self, ch: char) -> bool {
        self.walls.contains(&ch)
    }
}

/// One maze position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    wall: bool,
    neighbors: Vec<usize>,
}

impl Cell {
    /// Coordinates of the cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    /// Indices of the in-bounds neighbours, in down, up, right, left order.
    /// Walls are included; the solver skips them.
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }
}

/// A rectangular arena of [`Cell`]s.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    bounds: Range,
    cells: Vec<Cell>,
}

impl Grid {
    /// Classify every glyph of `maze` and link each cell to its neighbours.
    pub fn build(maze: &MazeText, glyphs: &Glyphs) -> Self {
        let mut walls = Vec::with_capacity(maze.rows() * maze.cols());
        for line in maze.lines() {
            walls.extend(line.chars().map(|ch| glyphs.is_wall(ch)));
        }
        let size = maze.size();
        let grid = Self::from_walls(size.x, size.y, |p| {
            walls[p.y as usize * size.x as usize + p.x as usize]
        });
        log::debug!(
            "built {}x{} grid with {} walls",
            size.x,
            size.y,
            grid.cells.iter().filter(|c| c.wall).count()
        );
        grid
    }

    /// Build a `cols × rows` grid, asking `is_wall` about every position.
    pub fn from_walls(cols: i32, rows: i32, is_wall: impl Fn(Point) -> bool) -> Self {
        let bounds = Range::sized(cols.max(0), rows.max(0));
        if bounds.is_empty() {
            return Self::default();
        }
        let width = bounds.width() as usize;
        let cells = bounds
            .iter()
            .map(|p| Cell {
                pos: p,
                wall: is_wall(p),
                neighbors: p
                    .neighbors_4()
                    .into_iter()
                    .filter(|&q| bounds.contains(q))
                    .map(|q| q.y as usize * width + q.x as usize)
                    .collect(),
            })
            .collect();
        Self { bounds, cells }
    }

    /// Size as a `Point` (x = columns, y = rows).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos
    }

    /// The cell at flat index `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// The cell at `p`, or `None` outside the grid.
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    pub fn is_open(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(|c| !c.wall)
    }

    /// Neighbour indices of the cell at `idx`.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.cells[idx].neighbors
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
