//! Generate a random maze and print it or write it to a file.
//!
//! Run: cargo run --bin labyr-generate -- prim 31 21 --seed 7 -o maze.txt

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use labyr_demos::{GenKind, GenerateArgs, init_logging};
use labyr_gen::{MazeGen, PrimConfig, ScatterConfig};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

fn main() -> Result<()> {
    init_logging();
    let args = GenerateArgs::parse();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed {seed}");
    let mut maze_gen = MazeGen::with_rng(SmallRng::seed_from_u64(seed));

    let canvas = match args.kind {
        GenKind::Prim { width, height } => maze_gen.prim(PrimConfig { width, height }),
        GenKind::Scatter {
            cols,
            rows,
            wall_pct,
            no_markers,
        } => maze_gen.scatter(ScatterConfig {
            cols,
            rows,
            wall_pct,
            markers: !no_markers,
        }),
    }
    .context("Failed to generate maze")?;

    match &args.output {
        Some(path) => fs::write(path, format!("{canvas}\n"))
            .with_context(|| format!("Failed to write maze to {}", path.display()))?,
        None => println!("{canvas}"),
    }
    Ok(())
}
