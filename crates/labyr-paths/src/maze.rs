//! Raw maze text.
//!
//! A [`MazeText`] holds the lines of a rectangular maze exactly as read,
//! one line per row. Whether a glyph is a wall is decided later by
//! [`Grid::build`](crate::Grid::build).

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path as FsPath, PathBuf};

use labyr_core::{Point, Range};

/// The lines of a rectangular maze.
///
/// Every line has the same number of characters. An empty maze (no lines)
/// is valid and produces a zero-size grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MazeText {
    lines: Vec<String>,
    cols: usize,
}

impl MazeText {
    /// Parse maze text. Lines end in `\n` or `\r\n`; a trailing line
    /// terminator does not add an extra row.
    pub fn parse(s: &str) -> Result<Self, MazeError> {
        Self::from_lines(s.lines())
    }

    /// Build from already-split lines, checking that they are equally long.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, MazeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        for (row, line) in lines.iter().enumerate().skip(1) {
            let found = line.chars().count();
            if found != cols {
                return Err(MazeError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
        }
        Ok(Self { lines, cols })
    }

    /// Read maze lines from any buffered reader. Line endings are handled
    /// exactly as in [`parse`](Self::parse).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MazeError> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(MazeError::Read)?;
        Self::from_lines(lines)
    }

    /// Load a maze file.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let maze = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            MazeError::Read(source) => MazeError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::debug!(
            "loaded maze {} ({}x{})",
            path.display(),
            maze.cols(),
            maze.rows()
        );
        Ok(maze)
    }

    /// Number of rows (lines).
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// Number of columns (characters in the first line).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size as a `Point` (x = columns, y = rows).
    pub fn size(&self) -> Point {
        Point::new(self.cols as i32, self.lines.len() as i32)
    }

    /// The rectangle covered by the maze, anchored at the origin.
    pub fn bounds(&self) -> Range {
        Range::sized(self.cols as i32, self.lines.len() as i32)
    }

    /// Whether the maze has no cells.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || self.cols == 0
    }

    /// The text of row `y`.
    pub fn line(&self, y: usize) -> Option<&str> {
        self.lines.get(y).map(String::as_str)
    }

    /// Iterate over the rows in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The glyph at `p`, or `None` outside the maze.
    pub fn glyph(&self, p: Point) -> Option<char> {
        if !self.bounds().contains(p) {
            return None;
        }
        self.lines[p.y as usize].chars().nth(p.x as usize)
    }

    /// Position of the first occurrence of `ch`, scanning row by row.
    pub fn find(&self, ch: char) -> Option<Point> {
        self.lines.iter().enumerate().find_map(|(y, line)| {
            line.chars()
                .position(|c| c == ch)
                .map(|x| Point::new(x as i32, y as i32))
        })
    }
}

impl fmt::Display for MazeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Errors that can occur when loading maze text.
#[derive(Debug)]
pub enum MazeError {
    /// The maze file could not be opened or read.
    Io { path: PathBuf, source: io::Error },
    /// Reading from a stream failed.
    Read(io::Error),
    /// A line's length differs from the first line's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read maze {}: {source}", path.display())
            }
            Self::Read(source) => write!(f, "cannot read maze: {source}"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "maze row {row} has {found} columns, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Read(source) => Some(source),
            Self::Ragged { .. } => None,
        }
    }
}
