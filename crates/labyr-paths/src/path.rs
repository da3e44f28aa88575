//! Path reconstruction from back-pointers.

use labyr_core::Point;

use crate::astar::Node;
use crate::grid::Grid;

/// A path found by the solver, stored **goal first**.
///
/// The first point is the goal and the last is the start. This is the
/// order in which back-pointers are walked and the order callers receive;
/// use [`to_start_first`](Self::to_start_first) for start-to-goal order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Walk back-pointers from `goal` until a node without a predecessor.
    pub(crate) fn reconstruct(grid: &Grid, nodes: &[Node], goal: usize) -> Self {
        let mut points = Vec::new();
        let mut cur = Some(goal);
        while let Some(ci) = cur {
            debug_assert!(points.len() < nodes.len(), "back-pointer cycle");
            points.push(grid.point(ci));
            cur = nodes[ci].parent;
        }
        Self { points }
    }

    /// The points in goal-to-start order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points, both endpoints included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves (one less than the number of points).
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn goal(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn start(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    /// The points reversed into start-to-goal order.
    pub fn to_start_first(&self) -> Vec<Point> {
        self.points.iter().rev().copied().collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl IntoIterator for Path {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
