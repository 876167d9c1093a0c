use std::{
    fmt::Display,
    str::FromStr,
    time::{Duration, Instant},
};

use crate::config::SolverConfig;
use crate::error::{Endpoint, EndpointFault, SolveError};
use crate::find::{Fifo, Frontier, Lifo, PathFinder, PathFinderState, Priority, Ranking};
use crate::grid::{Cell, Grid, Point};

/// Number of pops between two looks at the clock when a deadline is configured
const DEADLINE_CHECK_INTERVAL: usize = 256;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    /// The selector used on the wire
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Whether the returned path is guaranteed to be a shortest one
    pub fn is_optimal(self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" | "a_star" => Ok(Algorithm::AStar),
            _ => Err(SolveError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Outcome of one search. An empty `path` means the end cannot be reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Cells in the order they were expanded
    pub visited: Vec<Point>,
    pub path: Vec<Point>,
    pub elapsed: Duration,
}

impl Solution {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Elapsed search time in seconds
    pub fn execution_time(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Runs searches over grids. Holds no state between calls and can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve(
        &self,
        grid: &Grid,
        start: Point,
        end: Point,
        algorithm: Algorithm,
    ) -> Result<Solution, SolveError> {
        check_endpoint(grid, start, Endpoint::Start)?;
        check_endpoint(grid, end, Endpoint::End)?;

        let started = Instant::now();
        let (state, visited) = match algorithm {
            Algorithm::Bfs => self.run(grid, start, end, Fifo::default(), Ranking::Cost)?,
            Algorithm::Dfs => self.run(grid, start, end, Lifo::default(), Ranking::Cost)?,
            Algorithm::Dijkstra => self.run(grid, start, end, Priority::default(), Ranking::Cost)?,
            Algorithm::AStar => self.run(
                grid,
                start,
                end,
                Priority::default(),
                Ranking::CostPlusEstimate,
            )?,
        };
        let elapsed = started.elapsed();

        let path = match state {
            PathFinderState::PathFound(result) => result.path,
            _ => Vec::new(),
        };

        Ok(Solution {
            visited,
            path,
            elapsed,
        })
    }

    fn run<F: Frontier<usize, Point>>(
        &self,
        grid: &Grid,
        start: Point,
        end: Point,
        frontier: F,
        ranking: Ranking,
    ) -> Result<(PathFinderState<usize, Point>, Vec<Point>), SolveError> {
        let started = Instant::now();
        let mut finder = PathFinder::new(grid, start, end, frontier, ranking);

        let Some(deadline) = self.config.deadline() else {
            return Ok(finder.finish(grid));
        };

        let mut steps = 0usize;
        loop {
            if steps % DEADLINE_CHECK_INTERVAL == 0 && started.elapsed() >= deadline {
                return Err(SolveError::DeadlineExceeded(deadline));
            }
            steps += 1;

            match finder.step(grid) {
                PathFinderState::Computing => {}
                state => return Ok((state, finder.order().to_vec())),
            }
        }
    }
}

/// Solve with the default configuration
pub fn solve(
    grid: &Grid,
    start: Point,
    end: Point,
    algorithm: Algorithm,
) -> Result<Solution, SolveError> {
    Solver::default().solve(grid, start, end, algorithm)
}

fn check_endpoint(grid: &Grid, p: Point, endpoint: Endpoint) -> Result<(), SolveError> {
    let fault = match grid.get(p) {
        None => EndpointFault::OutOfBounds(p.into()),
        Some(Cell::Wall) => EndpointFault::Wall(p),
        Some(_) => return Ok(()),
    };
    Err(SolveError::endpoint(endpoint, fault))
}
