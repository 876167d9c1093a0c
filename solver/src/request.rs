//! JSON boundary of the solver: turns a raw request into a validated search and the outcome
//! back into a response body.
//!
//! ```json
//! {"grid": [["start", "empty"], ["wall", "end"]], "start": [0, 0], "end": [1, 1], "algorithm": "bfs"}
//! ```
//!
//! `maze` is accepted in place of `grid`. When `start` or `end` is left out, the single cell
//! carrying that marker is used instead. Coordinates are signed on the wire so that negative ones
//! are reported as out of bounds.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, EndpointFault, SolveError};
use crate::grid::{Cell, Coordinate, Grid, Point};
use crate::solve::{Algorithm, Solution, Solver};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(alias = "maze")]
    pub grid: Vec<Vec<Cell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Coordinate>,
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// A request that passed validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prepared {
    pub grid: Grid,
    pub start: Point,
    pub end: Point,
    pub algorithm: Algorithm,
}

impl SolveRequest {
    pub fn from_json(body: &str) -> Result<Self, SolveError> {
        serde_json::from_str(body).map_err(|e| SolveError::InvalidRequest(e.to_string()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Check the grid, endpoints and algorithm selector
    pub fn prepare(&self) -> Result<Prepared, SolveError> {
        let algorithm = self
            .algorithm
            .as_deref()
            .ok_or_else(|| SolveError::InvalidRequest("missing algorithm".into()))?
            .parse::<Algorithm>()?;

        let grid = Grid::from_rows(self.grid.clone())?;
        let start = resolve_endpoint(&grid, self.start, Endpoint::Start)?;
        let end = resolve_endpoint(&grid, self.end, Endpoint::End)?;

        Ok(Prepared {
            grid,
            start,
            end,
            algorithm,
        })
    }

    pub fn solve_with(&self, solver: &Solver) -> Result<Solution, SolveError> {
        let Prepared {
            grid,
            start,
            end,
            algorithm,
        } = self.prepare()?;

        debug!(
            "solving {}x{} grid from {} to {} with {}",
            grid.rows(),
            grid.columns(),
            start,
            end,
            algorithm
        );
        solver.solve(&grid, start, end, algorithm)
    }
}

/// An explicit coordinate wins over a marker cell
fn resolve_endpoint(
    grid: &Grid,
    explicit: Option<Coordinate>,
    endpoint: Endpoint,
) -> Result<Point, SolveError> {
    if let Some(c) = explicit {
        let fault = EndpointFault::OutOfBounds(c);
        return c.to_point().ok_or_else(|| SolveError::endpoint(endpoint, fault));
    }

    let marker = match endpoint {
        Endpoint::Start => Cell::Start,
        Endpoint::End => Cell::End,
    };
    let mut marked = grid.find(marker);
    match (marked.next(), marked.next()) {
        (Some(p), None) => Ok(p),
        (None, _) => Err(SolveError::endpoint(endpoint, EndpointFault::Missing)),
        (Some(_), Some(_)) => Err(SolveError::endpoint(endpoint, EndpointFault::Ambiguous)),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    Solved {
        visited: Vec<Point>,
        path: Vec<Point>,
        /// Seconds spent searching
        execution_time: f64,
    },
    Failed {
        error: String,
    },
}

impl SolveResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, SolveResponse::Failed { .. })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Result<Solution, SolveError>> for SolveResponse {
    fn from(result: Result<Solution, SolveError>) -> Self {
        match result {
            Ok(solution) => SolveResponse::Solved {
                execution_time: solution.execution_time(),
                visited: solution.visited,
                path: solution.path,
            },
            Err(e) => SolveResponse::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Handle one JSON request body
pub fn handle(body: &str, solver: &Solver) -> SolveResponse {
    let result = SolveRequest::from_json(body).and_then(|request| request.solve_with(solver));

    match &result {
        Ok(solution) => info!(
            "visited {} cells, path of {} cells in {:?}",
            solution.visited.len(),
            solution.path.len(),
            solution.elapsed
        ),
        Err(e) => warn!("rejected request: {}", e),
    }

    SolveResponse::from(result)
}
