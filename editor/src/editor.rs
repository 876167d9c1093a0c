use std::time::Duration;

use log::debug;
use solver::{
    grid::{DEFAULT_COLUMNS, DEFAULT_ROWS},
    Algorithm, Cell, Grid, Point, SolveRequest, SolveResponse,
};
use thiserror::Error;

use crate::animation::{Animation, Frame};
use crate::event::{DrawMode, Event};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Please set start and end points.")]
    MissingEndpoints,
    #[error("{0}")]
    Rejected(String),
}

/// State behind an interactive maze: the grid being drawn, the chosen endpoints and the result
/// currently on display.
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
    mode: DrawMode,
    drawing: bool,
    animation: Option<Animation>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

impl Editor {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            grid: Grid::new(rows, columns),
            start: None,
            end: None,
            mode: DrawMode::default(),
            drawing: false,
            animation: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn handle(&mut self, event: Event) {
        debug!("editor event {:?}", event);

        match event {
            Event::MousePressed(p) => {
                self.drawing = true;
                self.paint(p);
            }
            Event::MouseEntered(p) if self.drawing => self.paint(p),
            Event::MouseEntered(_) => {}
            Event::MouseReleased => self.drawing = false,
            Event::KeyPressed(key) => {
                if let Some(mode) = DrawMode::from_key(key) {
                    self.mode = mode;
                }
            }
            Event::ClearWalls => self.clear_walls(),
            Event::ClearOverlay => self.animation = None,
        }
    }

    fn paint(&mut self, p: Point) {
        let Some(cell) = self.grid.get(p) else {
            return;
        };

        match self.mode {
            DrawMode::Wall => match cell {
                Cell::Empty => {
                    self.grid.set(p, Cell::Wall);
                }
                Cell::Wall => {
                    self.grid.set(p, Cell::Empty);
                }
                Cell::Start | Cell::End => {}
            },
            DrawMode::Start => self.place(p, Cell::Start),
            DrawMode::End => self.place(p, Cell::End),
        }
    }

    /// Move a marker to `p`, dropping whatever marker was there before
    fn place(&mut self, p: Point, marker: Cell) {
        let (own, other) = match marker {
            Cell::Start => (&mut self.start, &mut self.end),
            _ => (&mut self.end, &mut self.start),
        };

        if let Some(old) = own.replace(p) {
            self.grid.set(old, Cell::Empty);
        }
        if *other == Some(p) {
            *other = None;
        }
        self.grid.set(p, marker);
    }

    pub fn clear_walls(&mut self) {
        self.grid.clear(Cell::Wall);
    }

    /// Build the request for solving the current grid. Drops the result on display.
    pub fn request(&mut self, algorithm: Algorithm) -> Result<SolveRequest, EditorError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(EditorError::MissingEndpoints);
        };
        self.animation = None;

        Ok(SolveRequest {
            grid: self.grid.cells().to_vec(),
            start: Some(start.into()),
            end: Some(end.into()),
            algorithm: Some(algorithm.name().to_string()),
        })
    }

    /// Put a solver response on display
    pub fn show(&mut self, response: SolveResponse) -> Result<&Animation, EditorError> {
        match response {
            SolveResponse::Solved {
                visited,
                path,
                execution_time,
            } => {
                debug!(
                    "showing {} visited and {} path cells",
                    visited.len(),
                    path.len()
                );
                let animation =
                    Animation::new(&visited, &path, execution_time, [self.start, self.end]);
                Ok(self.animation.insert(animation))
            }
            SolveResponse::Failed { error } => Err(EditorError::Rejected(error)),
        }
    }

    /// Frames of the result on display that became due by `now`
    pub fn advance(&mut self, now: Duration) -> &[Frame] {
        match self.animation.as_mut() {
            Some(animation) => animation.advance(now),
            None => &[],
        }
    }
}
