use std::{fmt::Display, time::Duration};

use thiserror::Error;

use crate::grid::{Coordinate, Point};

/// Which end of the route a problem refers to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Start,
    End,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Endpoint::Start => "start",
                Endpoint::End => "end",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EndpointFault {
    Missing,
    /// More than one cell of the grid carries the marker
    Ambiguous,
    OutOfBounds(Coordinate),
    Wall(Point),
}

impl Display for EndpointFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointFault::Missing => write!(f, "not set"),
            EndpointFault::Ambiguous => write!(f, "marked more than once"),
            EndpointFault::OutOfBounds(p) => write!(f, "{} is out of bounds", p),
            EndpointFault::Wall(p) => write!(f, "{} is a wall", p),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("Invalid {endpoint} point: {fault}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        fault: EndpointFault,
    },
    #[error("Invalid algorithm: {0:?}")]
    UnknownAlgorithm(String),
    #[error("Invalid maze format: {0}")]
    InvalidGrid(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Search gave up after {0:?}")]
    DeadlineExceeded(Duration),
}

impl SolveError {
    pub(crate) fn endpoint(endpoint: Endpoint, fault: EndpointFault) -> Self {
        SolveError::InvalidEndpoint { endpoint, fault }
    }
}
