//! Solve a maze file and print the route, goal first.
//!
//! Run: cargo run --bin labyr-solve -- maze.txt --start 1,1 --goal 19,19

use anyhow::{Context, Result};
use clap::Parser;
use labyr_demos::{SolveArgs, endpoints, init_logging, render};
use labyr_paths::{Grid, MazeText, solve_report};

fn main() -> Result<()> {
    init_logging();
    let args = SolveArgs::parse();

    let maze = MazeText::load(&args.maze)
        .with_context(|| format!("Failed to load maze from {}", args.maze.display()))?;
    let grid = Grid::build(&maze, &args.glyphs());
    let (start, goal) = endpoints(&maze, args.blocks, args.start, args.goal);

    let report = solve_report(&grid, start, goal, args.solver_config())
        .with_context(|| format!("Failed to solve from {start} to {goal}"))?;
    log::info!(
        "{} cells expanded, {}",
        report.expanded.len(),
        match &report.path {
            Some(path) => format!("{} steps", path.steps()),
            None => "no path".to_string(),
        }
    );

    println!("{}", render(args.format, &maze, &report)?);
    if report.path.is_none() {
        eprintln!("No path from {start} to {goal}.");
    }
    Ok(())
}
