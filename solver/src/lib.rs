//! Maze solving on 2-D grids.
//!
//! A [`Grid`] holds walls and open cells. [`Solver::solve`] runs one of the [`Algorithm`]s from a
//! start to an end cell and returns the cells in the order they were expanded together with the
//! path that was found. All four algorithms share one [`PathFinder`] and only differ in their
//! [`Frontier`] and [`Ranking`].
//!
//! The [`request`] module is the JSON boundary used by front-ends.

pub mod config;
pub mod error;
mod find;
pub mod grid;
pub mod request;
mod solve;
pub mod util;

pub use config::SolverConfig;
pub use error::{Endpoint, EndpointFault, SolveError};
pub use find::{
    Cost, Fifo, Frontier, Lifo, MapStorage, MapTrait, NodeReference, PathFinder, PathFinderState,
    PathResult, Priority, Ranking, ToVisit, Visited, VisitedItem,
};
pub use grid::{Cell, Coordinate, Grid, Point};
pub use request::{handle, SolveRequest, SolveResponse};
pub use solve::{solve, Algorithm, Solution, Solver};
pub use util::parse_img;
