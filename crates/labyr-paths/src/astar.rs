use std::fmt;

use labyr_core::{Point, Range};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::path::Path;

/// How a neighbour that is already open is treated when it is reached again
/// without a shorter cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Relaxation {
    /// Only a strictly shorter route rewrites `h`, `f` and the back-pointer.
    #[default]
    Improving,
    /// Every visit rewrites `h`, `f` and the back-pointer, even when `g` did
    /// not improve. Reproduces the historical solver output exactly, at the
    /// price of sometimes returning a longer route than `g` promises.
    Reference,
}

/// Solver settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub relaxation: Relaxation,
    /// Stop with [`SolveError::BudgetExhausted`] after this many expansions.
    pub max_expansions: Option<usize>,
}

/// Where a search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Open cells remain and the goal has not been selected yet.
    Running,
    /// The goal was selected as the cheapest open cell.
    Succeeded,
    /// The open set ran dry before reaching the goal.
    Failed,
}

/// Per-cell search bookkeeping. `f == g + h` once the cell has been reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Node {
    pub g: i32,
    pub h: i32,
    pub f: i32,
    /// Predecessor on the best route found so far; `None` for the start and
    /// for cells not yet reached.
    pub parent: Option<usize>,
}

/// Errors raised by the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A start or goal coordinate lies outside the grid.
    OutOfBounds { point: Point, bounds: Range },
    /// The configured expansion budget ran out before the search finished.
    BudgetExhausted { expansions: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { point, bounds } => {
                write!(f, "point {point} is outside the maze {bounds}")
            }
            Self::BudgetExhausted { expansions } => {
                write!(f, "search gave up after {expansions} expansions")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Everything a finished search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub state: SearchState,
    /// The route, goal first, when the search succeeded.
    pub path: Option<Path>,
    /// Closed cells in expansion order.
    pub expanded: Vec<Point>,
}

/// A* search over a [`Grid`] with unit step cost and a Manhattan heuristic.
///
/// Each `AStar` owns fresh search state; the grid is only borrowed, so
/// several searches may run over the same grid at once.
pub struct AStar<'g> {
    grid: &'g Grid,
    goal: usize,
    goal_point: Point,
    config: SolverConfig,
    nodes: Vec<Node>,
    frontier: Frontier,
    state: SearchState,
    expansions: usize,
}

impl<'g> AStar<'g> {
    /// Prepare a search from `start` to `goal`.
    ///
    /// A start on a wall cell leaves the open set empty, so the search fails
    /// on its first step.
    pub fn new(
        grid: &'g Grid,
        start: Point,
        goal: Point,
        config: SolverConfig,
    ) -> Result<Self, SolveError> {
        let out_of_bounds = |point| SolveError::OutOfBounds {
            point,
            bounds: grid.bounds(),
        };
        let start_idx = grid.idx(start).ok_or_else(|| out_of_bounds(start))?;
        let goal_idx = grid.idx(goal).ok_or_else(|| out_of_bounds(goal))?;

        let mut frontier = Frontier::new(grid.len());
        if !grid.cell(start_idx).is_wall() {
            frontier.add_open(start_idx, 0);
        }
        Ok(Self {
            grid,
            goal: goal_idx,
            goal_point: goal,
            config,
            nodes: vec![Node::default(); grid.len()],
            frontier,
            state: SearchState::Running,
            expansions: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Search bookkeeping for `p`, or `None` outside the grid.
    pub fn node(&self, p: Point) -> Option<&Node> {
        self.grid.idx(p).map(|i| &self.nodes[i])
    }

    pub fn is_open(&self, p: Point) -> bool {
        self.grid.idx(p).is_some_and(|i| self.frontier.is_open(i))
    }

    pub fn is_closed(&self, p: Point) -> bool {
        self.grid.idx(p).is_some_and(|i| self.frontier.is_closed(i))
    }

    /// Advance the search by one selection.
    ///
    /// Once the search has left [`SearchState::Running`] further calls are
    /// no-ops returning the final state.
    pub fn step(&mut self) -> Result<SearchState, SolveError> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }

        let Some(current) = self.frontier.peek_min() else {
            log::debug!("open set exhausted after {} expansions", self.expansions);
            self.state = SearchState::Failed;
            return Ok(self.state);
        };

        if current == self.goal {
            log::debug!(
                "reached goal {} after {} expansions",
                self.goal_point,
                self.expansions
            );
            self.state = SearchState::Succeeded;
            return Ok(self.state);
        }

        if let Some(limit) = self.config.max_expansions {
            if self.expansions >= limit {
                log::warn!("expansion budget of {limit} exhausted");
                return Err(SolveError::BudgetExhausted {
                    expansions: self.expansions,
                });
            }
        }

        self.frontier.remove_open(current);
        self.frontier.add_closed(current);
        self.expansions += 1;

        let tentative_g = self.nodes[current].g + 1;
        log::trace!(
            "expand {} g={} f={}",
            self.grid.point(current),
            self.nodes[current].g,
            self.nodes[current].f
        );

        let grid = self.grid;
        for &n in grid.neighbors(current) {
            if grid.cell(n).is_wall() || self.frontier.is_closed(n) {
                continue;
            }
            self.relax(current, n, tentative_g);
        }

        if self.frontier.is_empty() {
            log::debug!("open set exhausted after {} expansions", self.expansions);
            self.state = SearchState::Failed;
        }
        Ok(self.state)
    }

    /// Offer neighbour `n` a route through `current` costing `tentative_g`.
    pub(crate) fn relax(&mut self, current: usize, n: usize, tentative_g: i32) {
        let discovered = !self.frontier.is_open(n);
        let improved = discovered || tentative_g < self.nodes[n].g;
        if improved {
            self.nodes[n].g = tentative_g;
        }
        if improved || self.config.relaxation == Relaxation::Reference {
            let node = &mut self.nodes[n];
            node.h = manhattan(self.grid.point(n), self.goal_point);
            node.f = node.g + node.h;
            node.parent = Some(current);
        }

        let f = self.nodes[n].f;
        if discovered {
            self.frontier.add_open(n, f);
        } else {
            self.frontier.update(n, f);
        }
    }

    /// Step until the search succeeds or fails.
    pub fn run(&mut self) -> Result<SearchState, SolveError> {
        while self.state == SearchState::Running {
            self.step()?;
        }
        Ok(self.state)
    }

    /// The route found, goal first, or `None` unless the search succeeded.
    pub fn path(&self) -> Option<Path> {
        (self.state == SearchState::Succeeded)
            .then(|| Path::reconstruct(self.grid, &self.nodes, self.goal))
    }

    /// Closed cells in expansion order.
    pub fn expanded(&self) -> impl Iterator<Item = Point> + '_ {
        self.frontier
            .closed_order()
            .iter()
            .map(|&i| self.grid.point(i))
    }

    pub fn into_report(self) -> Report {
        Report {
            state: self.state,
            path: self.path(),
            expanded: self.expanded().collect(),
        }
    }
}

/// Find a shortest route from `start` to `goal`.
///
/// Returns the path goal first, or `None` when the goal cannot be reached.
/// An empty grid has no route between any two points.
pub fn solve(
    grid: &Grid,
    start: Point,
    goal: Point,
    config: SolverConfig,
) -> Result<Option<Path>, SolveError> {
    solve_report(grid, start, goal, config).map(|r| r.path)
}

/// Like [`solve`], also returning the expanded cells.
pub fn solve_report(
    grid: &Grid,
    start: Point,
    goal: Point,
    config: SolverConfig,
) -> Result<Report, SolveError> {
    if grid.is_empty() {
        log::debug!("empty grid, nothing to search");
        return Ok(Report {
            state: SearchState::Failed,
            path: None,
            expanded: Vec::new(),
        });
    }
    log::debug!("solving {start} -> {goal} on {} grid", grid.bounds());
    let mut search = AStar::new(grid, start, goal, config)?;
    search.run()?;
    Ok(search.into_report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Glyphs;
    use crate::maze::MazeText;
    use rand::rngs::SmallRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::VecDeque;

    fn grid(s: &str) -> Grid {
        Grid::build(&MazeText::parse(s).unwrap(), &Glyphs::default())
    }

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn reference() -> SolverConfig {
        SolverConfig {
            relaxation: Relaxation::Reference,
            ..SolverConfig::default()
        }
    }

    /// Breadth-first step count, for checking optimality.
    fn bfs_steps(g: &Grid, start: Point, goal: Point) -> Option<usize> {
        let s = g.idx(start)?;
        if g.cell(s).is_wall() {
            return None;
        }
        let mut dist = vec![usize::MAX; g.len()];
        dist[s] = 0;
        let mut queue = VecDeque::from([s]);
        while let Some(c) = queue.pop_front() {
            if g.point(c) == goal {
                return Some(dist[c]);
            }
            for &n in g.neighbors(c) {
                if !g.cell(n).is_wall() && dist[n] == usize::MAX {
                    dist[n] = dist[c] + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn scatter(rng: &mut SmallRng, cols: i32, rows: i32, pct: u32) -> Grid {
        let walls: Vec<bool> = (0..cols * rows)
            .map(|_| rng.random_range(0..100) < pct)
            .collect();
        Grid::from_walls(cols, rows, |p| walls[(p.y * cols + p.x) as usize])
    }

    fn assert_valid(g: &Grid, path: &Path, start: Point, goal: Point) {
        assert_eq!(path.goal(), Some(goal));
        assert_eq!(path.start(), Some(start));
        for &p in path.points() {
            assert!(g.is_open(p), "{p} is not an open cell");
        }
        for w in path.points().windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not one step", w[0], w[1]);
        }
    }

    #[test]
    fn open_3x3_corner_to_corner() {
        let g = grid("...\n...\n...");
        let path = solve(&g, Point::new(0, 0), Point::new(2, 2), SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.points()[0], Point::new(2, 2));
        assert_eq!(path.points()[4], Point::new(0, 0));
        assert_eq!(
            path.points(),
            pts(&[(2, 2), (1, 2), (0, 2), (0, 1), (0, 0)]).as_slice()
        );
    }

    #[test]
    fn reference_relaxation_rewrites_parents_on_ties() {
        // Same expansion order as above, but every revisit of an open cell
        // steals its back-pointer.
        let g = grid("...\n...\n...");
        let path = solve(&g, Point::new(0, 0), Point::new(2, 2), reference())
            .unwrap()
            .unwrap();
        assert_eq!(
            path.points(),
            pts(&[(2, 2), (2, 1), (2, 0), (1, 0), (0, 0)]).as_slice()
        );
    }

    #[test]
    fn relax_without_improvement_depends_on_policy() {
        let g = grid(".....");
        for (relaxation, expected_parent, expected_f) in [
            (Relaxation::Improving, Some(0), 3),
            (Relaxation::Reference, Some(4), 3),
        ] {
            let config = SolverConfig {
                relaxation,
                ..SolverConfig::default()
            };
            let mut search = AStar::new(&g, Point::new(0, 0), Point::new(2, 0), config).unwrap();
            search.relax(0, 1, 2);
            // A worse offer through another cell.
            search.relax(4, 1, 5);
            let node = *search.node(Point::new(1, 0)).unwrap();
            assert_eq!(node.g, 2, "{relaxation:?}");
            assert_eq!(node.h, 1);
            assert_eq!(node.f, expected_f);
            assert_eq!(node.parent, expected_parent, "{relaxation:?}");
        }
    }

    #[test]
    fn improving_offer_lowers_cost_under_both_policies() {
        let g = grid(".....");
        for relaxation in [Relaxation::Improving, Relaxation::Reference] {
            let config = SolverConfig {
                relaxation,
                ..SolverConfig::default()
            };
            let mut search = AStar::new(&g, Point::new(0, 0), Point::new(4, 0), config).unwrap();
            search.relax(0, 2, 6);
            search.relax(1, 2, 2);
            let node = *search.node(Point::new(2, 0)).unwrap();
            assert_eq!(node.g, 2);
            assert_eq!(node.f, node.g + node.h);
            assert_eq!(node.parent, Some(1));
        }
    }

    #[test]
    fn wall_row_blocks_the_goal() {
        let g = grid("...\n---\n...");
        let got = solve(&g, Point::new(0, 0), Point::new(2, 2), SolverConfig::default()).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn single_cell_start_is_goal() {
        let g = grid(" ");
        let path = solve(&g, Point::ZERO, Point::ZERO, SolverConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(path.points(), &[Point::ZERO]);
    }

    #[test]
    fn start_equals_goal_stops_before_expanding() {
        let g = grid("....\n....");
        let mut search =
            AStar::new(&g, Point::new(2, 1), Point::new(2, 1), SolverConfig::default()).unwrap();
        assert_eq!(search.run(), Ok(SearchState::Succeeded));
        assert_eq!(search.expansions(), 0);
        assert_eq!(search.path().unwrap().points(), &[Point::new(2, 1)]);
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let g = grid(
            "\
.....
./-/.
.| |.
./-/.
.....",
        );
        let report = solve_report(&g, Point::ZERO, Point::new(2, 2), SolverConfig::default())
            .unwrap();
        assert_eq!(report.state, SearchState::Failed);
        assert_eq!(report.path, None);
        // Every outer ring cell was expanded before giving up.
        assert_eq!(report.expanded.len(), 16);
    }

    #[test]
    fn goal_on_wall_is_unreachable() {
        let g = grid("..-");
        let got = solve(&g, Point::ZERO, Point::new(2, 0), SolverConfig::default()).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn start_on_wall_fails_immediately() {
        let g = grid("-..");
        let mut search =
            AStar::new(&g, Point::ZERO, Point::new(2, 0), SolverConfig::default()).unwrap();
        assert_eq!(search.step(), Ok(SearchState::Failed));
        assert_eq!(search.path(), None);
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        let g = grid("...\n...\n...");
        let err = solve(&g, Point::new(3, 0), Point::ZERO, SolverConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SolveError::OutOfBounds {
                point: Point::new(3, 0),
                bounds: Range::sized(3, 3),
            }
        );
        assert!(matches!(
            solve(&g, Point::ZERO, Point::new(0, -1), SolverConfig::default()),
            Err(SolveError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn empty_grid_has_no_route() {
        let g = grid("");
        let got = solve(&g, Point::ZERO, Point::ZERO, SolverConfig::default()).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn expansion_budget_aborts_the_search() {
        let g = Grid::from_walls(5, 5, |_| false);
        let config = SolverConfig {
            max_expansions: Some(3),
            ..SolverConfig::default()
        };
        let err = solve(&g, Point::ZERO, Point::new(4, 4), config).unwrap_err();
        assert_eq!(err, SolveError::BudgetExhausted { expansions: 3 });
    }

    #[test]
    fn state_machine_transitions() {
        let g = grid("...");
        let mut search =
            AStar::new(&g, Point::ZERO, Point::new(2, 0), SolverConfig::default()).unwrap();
        assert_eq!(search.state(), SearchState::Running);
        assert!(search.is_open(Point::ZERO));
        assert_eq!(search.step(), Ok(SearchState::Running));
        assert!(search.is_closed(Point::ZERO));
        assert!(search.is_open(Point::new(1, 0)));
        assert_eq!(search.step(), Ok(SearchState::Running));
        assert_eq!(search.step(), Ok(SearchState::Succeeded));
        // Finished searches stay put.
        assert_eq!(search.step(), Ok(SearchState::Succeeded));
        assert_eq!(search.expansions(), 2);
        let report = search.into_report();
        assert_eq!(report.expanded, pts(&[(0, 0), (1, 0)]));
        assert_eq!(report.path.unwrap().points(), pts(&[(2, 0), (1, 0), (0, 0)]).as_slice());
    }

    #[test]
    fn f_is_g_plus_h_for_reached_cells() {
        let g = grid("....\n.-..\n....");
        let mut search =
            AStar::new(&g, Point::ZERO, Point::new(3, 2), SolverConfig::default()).unwrap();
        search.run().unwrap();
        for p in g.bounds() {
            let node = search.node(p).unwrap();
            if node.parent.is_some() {
                assert_eq!(node.f, node.g + node.h, "at {p}");
                assert_eq!(node.h, manhattan(p, Point::new(3, 2)));
            }
        }
    }

    #[test]
    fn open_grids_are_solved_in_manhattan_steps() {
        let g = Grid::from_walls(7, 5, |_| false);
        for start in g.bounds() {
            for goal in [Point::new(6, 4), Point::new(0, 0), Point::new(3, 2)] {
                let path = solve(&g, start, goal, SolverConfig::default())
                    .unwrap()
                    .unwrap();
                assert_eq!(path.steps() as i32, manhattan(start, goal));
                assert_valid(&g, &path, start, goal);
            }
        }
    }

    #[test]
    fn random_mazes_yield_valid_shortest_paths() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let g = scatter(&mut rng, 12, 9, 25);
            let start = Point::new(rng.random_range(0..12), rng.random_range(0..9));
            let goal = Point::new(rng.random_range(0..12), rng.random_range(0..9));
            let got = solve(&g, start, goal, SolverConfig::default()).unwrap();
            match (got, bfs_steps(&g, start, goal)) {
                (Some(path), Some(steps)) => {
                    assert_valid(&g, &path, start, goal);
                    assert_eq!(path.steps(), steps);
                }
                (None, None) => {}
                (got, want) => panic!("{start} -> {goal}: got {got:?}, bfs {want:?}"),
            }
        }
    }

    #[test]
    fn reference_paths_are_connected_but_may_be_longer() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let g = scatter(&mut rng, 10, 10, 20);
            let start = Point::new(rng.random_range(0..10), rng.random_range(0..10));
            let goal = Point::new(rng.random_range(0..10), rng.random_range(0..10));
            let got = solve(&g, start, goal, reference()).unwrap();
            match (got, bfs_steps(&g, start, goal)) {
                (Some(path), Some(steps)) => {
                    assert_valid(&g, &path, start, goal);
                    assert!(path.steps() >= steps);
                }
                (None, None) => {}
                (got, want) => panic!("{start} -> {goal}: got {got:?}, bfs {want:?}"),
            }
        }
    }

    #[test]
    fn solving_twice_gives_identical_output() {
        let mut rng = SmallRng::seed_from_u64(7);
        let g = scatter(&mut rng, 15, 15, 20);
        for config in [SolverConfig::default(), reference()] {
            let a = solve_report(&g, Point::ZERO, Point::new(14, 14), config).unwrap();
            let b = solve_report(&g, Point::ZERO, Point::new(14, 14), config).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn concurrent_solves_share_one_grid() {
        let g = Grid::from_walls(20, 20, |p| p.x == 10 && p.y < 19);
        let expected = solve(&g, Point::ZERO, Point::new(19, 0), SolverConfig::default()).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        solve(&g, Point::ZERO, Point::new(19, 0), SolverConfig::default())
                            .unwrap()
                    })
                })
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
        assert_eq!(expected.unwrap().steps(), 19 + 19 + 19);
    }
}
