//! A character grid that generators draw into.

use std::fmt;

use labyr_core::{Point, Range};

/// A rectangular grid of glyphs, rendered one row per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<char>,
    bounds: Range,
}

impl Canvas {
    /// Create a `cols × rows` canvas filled with `fill`.
    pub fn new(cols: i32, rows: i32, fill: char) -> Self {
        let bounds = Range::sized(cols.max(0), rows.max(0));
        Self {
            glyphs: vec![fill; bounds.len()],
            bounds,
        }
    }

    /// Returns the bounding range of the canvas.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Returns the size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }

    /// Get the glyph at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<char> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(self.glyphs[self.index(p)])
    }

    /// Set the glyph at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, ch: char) {
        if !self.bounds.contains(p) {
            return;
        }
        let idx = self.index(p);
        self.glyphs[idx] = ch;
    }

    /// Fill the canvas using a function that takes each point.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> char) {
        for p in self.bounds.iter() {
            let idx = self.index(p);
            self.glyphs[idx] = f(p);
        }
    }

    /// Count how many cells hold `ch`.
    pub fn count(&self, ch: char) -> usize {
        self.glyphs.iter().filter(|&&c| c == ch).count()
    }
}

/// Rows joined with `\n`, without a trailing newline.
impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.bounds.width() as usize;
        if width == 0 {
            return Ok(());
        }
        for (y, row) in self.glyphs.chunks(width).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
