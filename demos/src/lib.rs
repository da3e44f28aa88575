//! Shared pieces of the `labyr-solve` and `labyr-generate` binaries:
//! argument parsing, endpoint defaults, and the conversion of solver
//! output into something a caller outside Rust can consume.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use labyr_core::Point;
use labyr_paths::{Glyphs, MazeText, Path, Relaxation, Report, SolverConfig};
use serde::Serialize;

/// Marker glyphs that pick the start and goal when none are given.
pub const START_MARK: char = 's';
pub const GOAL_MARK: char = 'e';

/// Overlay glyphs.
pub const PATH_MARK: char = '*';
pub const EXPANDED_MARK: char = '.';

/// Install the `RUST_LOG`-driven logger, defaulting to warnings only.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

// ---------------------------------------------------------------------------
// labyr-solve
// ---------------------------------------------------------------------------

/// Find the shortest route through a maze file.
#[derive(Debug, Parser)]
#[command(name = "labyr-solve", version)]
pub struct SolveArgs {
    /// Maze text file, one line per row.
    pub maze: PathBuf,
    /// Start cell as X,Y (column, row). Defaults to the `s` marker or the
    /// first inner cell.
    #[arg(long)]
    pub start: Option<Point>,
    /// Goal cell as X,Y. Defaults to the `e` marker or the last inner cell.
    #[arg(long)]
    pub goal: Option<Point>,
    /// Treat `#` as the only wall glyph instead of `/`, `-` and `|`.
    #[arg(long)]
    pub blocks: bool,
    /// Let every revisit of an open cell take over its back-pointer, as the
    /// historical solver did.
    #[arg(long)]
    pub reference: bool,
    /// Give up after expanding this many cells.
    #[arg(long)]
    pub max_expansions: Option<usize>,
    #[arg(long, value_enum, default_value_t = Format::Pairs)]
    pub format: Format,
}

impl SolveArgs {
    pub fn glyphs(&self) -> Glyphs {
        if self.blocks {
            Glyphs::blocks()
        } else {
            Glyphs::default()
        }
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            relaxation: if self.reference {
                Relaxation::Reference
            } else {
                Relaxation::Improving
            },
            max_expansions: self.max_expansions,
        }
    }
}

/// How `labyr-solve` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `[(x, y), ...]`, goal first.
    Pairs,
    /// A JSON object with the path and search statistics.
    Json,
    /// The maze redrawn with the path and expanded cells marked.
    Overlay,
}

/// Resolve the start and goal: explicit points win, then the `s`/`e`
/// markers, then the grid corners. Block grids start at the very corner;
/// drawn mazes start one cell in, inside the border wall.
pub fn endpoints(
    maze: &MazeText,
    blocks: bool,
    start: Option<Point>,
    goal: Option<Point>,
) -> (Point, Point) {
    let inset = if blocks { 0 } else { 1 };
    let size = maze.size();
    let start = start
        .or_else(|| maze.find(START_MARK))
        .unwrap_or(Point::new(inset, inset));
    let goal = goal
        .or_else(|| maze.find(GOAL_MARK))
        .unwrap_or(Point::new(size.x - 1 - inset, size.y - 1 - inset));
    (start, goal)
}

/// The path as plain `(column, row)` pairs, goal first; empty when there
/// is no path. Callers wanting start-to-goal order reverse it themselves.
pub fn to_pairs(path: Option<&Path>) -> Vec<(i32, i32)> {
    path.map_or_else(Vec::new, |p| p.iter().map(|&pt| pt.into()).collect())
}

#[derive(Debug, Serialize)]
struct JsonReport {
    found: bool,
    steps: Option<usize>,
    expanded: usize,
    path: Vec<(i32, i32)>,
}

/// Redraw the maze with path cells as `*` and other expanded cells as `.`.
pub fn overlay(maze: &MazeText, report: &Report) -> String {
    let on_path: HashSet<Point> = report
        .path
        .as_ref()
        .map(|p| p.iter().copied().collect())
        .unwrap_or_default();
    let expanded: HashSet<Point> = report.expanded.iter().copied().collect();

    let mut out = String::new();
    for (y, line) in maze.lines().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        for (x, ch) in line.chars().enumerate() {
            let p = Point::new(x as i32, y as i32);
            out.push(if on_path.contains(&p) {
                PATH_MARK
            } else if expanded.contains(&p) {
                EXPANDED_MARK
            } else {
                ch
            });
        }
    }
    out
}

/// Format a finished search for printing.
pub fn render(format: Format, maze: &MazeText, report: &Report) -> serde_json::Result<String> {
    let pairs = to_pairs(report.path.as_ref());
    Ok(match format {
        Format::Pairs => format!("{pairs:?}"),
        Format::Json => serde_json::to_string(&JsonReport {
            found: report.path.is_some(),
            steps: report.path.as_ref().map(Path::steps),
            expanded: report.expanded.len(),
            path: pairs,
        })?,
        Format::Overlay => overlay(maze, report),
    })
}

// ---------------------------------------------------------------------------
// labyr-generate
// ---------------------------------------------------------------------------

/// Generate a random maze as text.
#[derive(Debug, Parser)]
#[command(name = "labyr-generate", version)]
pub struct GenerateArgs {
    #[command(subcommand)]
    pub kind: GenKind,
    /// Seed for a reproducible maze. A random seed is used (and logged)
    /// otherwise.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Write the maze here instead of to stdout.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum GenKind {
    /// A perfect maze drawn with `/`, `-` and `|` (randomized Prim).
    Prim {
        #[arg(default_value_t = 21)]
        width: i32,
        #[arg(default_value_t = 21)]
        height: i32,
    },
    /// A block grid with randomly placed `#` walls.
    Scatter {
        #[arg(default_value_t = 20)]
        cols: i32,
        #[arg(default_value_t = 20)]
        rows: i32,
        /// Chance, in percent, that a cell is a wall.
        #[arg(long, default_value_t = 20)]
        wall_pct: u32,
        /// Leave out the `s` and `e` corner markers.
        #[arg(long)]
        no_markers: bool,
    },
}
