//! **labyr-core** — geometry primitives for maze solving.
//!
//! This crate provides the coordinate types shared across the *labyr*
//! workspace: [`Point`] for a single maze cell and [`Range`] for the
//! rectangular extent of a maze.

pub mod geom;

pub use geom::{ParsePointError, Point, Range, RangeIter};
