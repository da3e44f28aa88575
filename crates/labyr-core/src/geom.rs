//! Geometry primitives: [`Point`] and [`Range`].
//!
//! Coordinates are (column, row): X grows right, Y grows down, matching the
//! order in which maze text is read.

use std::fmt;
use std::str::FromStr;

/// A 2D integer maze coordinate: `x` is the column, `y` the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point moved by `dx` columns and `dy` rows.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four cardinal neighbours in search order: down, up, right, left.
    ///
    /// Solvers break ties by discovery order, so this order is part of the
    /// observable output and must not change.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            self.shift(0, 1),
            self.shift(0, -1),
            self.shift(1, 0),
            self.shift(-1, 0),
        ]
    }

    /// Whether `other` is exactly one step away along a single axis.
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Parses `"X,Y"` (whitespace around either number is ignored).
impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (xs, ys) = s
            .split_once(',')
            .ok_or_else(|| ParsePointError::MissingComma(s.to_string()))?;
        let coord = |t: &str| {
            t.trim()
                .parse::<i32>()
                .map_err(|_| ParsePointError::InvalidCoordinate(t.trim().to_string()))
        };
        Ok(Self::new(coord(xs)?, coord(ys)?))
    }
}

/// Errors returned when parsing a [`Point`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    /// No comma separates the two coordinates.
    MissingComma(String),
    /// One of the coordinates is not an integer.
    InvalidCoordinate(String),
}

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComma(s) => write!(f, "expected \"X,Y\", got \u{201c}{s}\u{201d}"),
            Self::InvalidCoordinate(s) => write!(f, "invalid coordinate \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for ParsePointError {}

/// The cells of a grid: columns `0..width`, rows `0..height`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    size: Point,
}

impl Range {
    /// Range with `cols` columns and `rows` rows. Negative counts clamp to 0.
    #[inline]
    pub fn sized(cols: i32, rows: i32) -> Self {
        Self {
            size: Point::new(cols.max(0), rows.max(0)),
        }
    }

    /// Size as a `Point` (x = columns, y = rows).
    #[inline]
    pub fn size(self) -> Point {
        self.size
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.size.x
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.size.x as usize * self.size.y as usize
    }

    /// Whether the range has no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.size.x).contains(&p.x) && (0..self.size.y).contains(&p.y)
    }

    /// Every point of the range, row by row.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            size: self.size,
            next: 0,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.size.x, self.size.y)
    }
}

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    size: Point,
    next: i32,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.size.x == 0 || self.next >= self.size.x * self.size.y {
            return None;
        }
        let p = Point::new(self.next % self.size.x, self.next / self.size.x);
        self.next += 1;
        Some(p)
    }
}
