use std::time::Duration;

use solver::Point;

/// Delay between two explored cells
pub const VISIT_INTERVAL: Duration = Duration::from_millis(10);
/// Delay between two cells of the route
pub const PATH_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Visited,
    Path,
}

/// One cell to color once `at` has passed since the animation started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub at: Duration,
    pub point: Point,
    pub mark: Mark,
}

/// Replays a search result: the explored cells first, then the route.
///
/// Cells are revealed one tick at a time, the first one a full tick after the start. The route
/// begins one visit tick after the last explored cell. The start and end cells keep their own
/// color and get no frame, but still take up their tick.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Frame>,
    shown: usize,
    path_length: usize,
    execution_time: f64,
}

impl Animation {
    pub fn new(
        visited: &[Point],
        path: &[Point],
        execution_time: f64,
        endpoints: [Option<Point>; 2],
    ) -> Self {
        let is_endpoint = |p: &Point| endpoints.contains(&Some(*p));

        let visit_frames = visited.iter().zip(1u32..).map(|(&point, tick)| Frame {
            at: VISIT_INTERVAL * tick,
            point,
            mark: Mark::Visited,
        });

        let path_start = VISIT_INTERVAL * (visited.len() as u32 + 1);
        let path_frames = path.iter().zip(1u32..).map(|(&point, tick)| Frame {
            at: path_start + PATH_INTERVAL * tick,
            point,
            mark: Mark::Path,
        });

        Self {
            frames: visit_frames
                .chain(path_frames)
                .filter(|f| !is_endpoint(&f.point))
                .collect(),
            shown: 0,
            path_length: path.len(),
            execution_time,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames that became due since the previous call. `now` is measured from the start of the
    /// animation.
    pub fn advance(&mut self, now: Duration) -> &[Frame] {
        let from = self.shown;
        let due = self.frames[from..].partition_point(|f| f.at <= now);
        self.shown += due;
        &self.frames[from..self.shown]
    }

    pub fn is_finished(&self) -> bool {
        self.shown == self.frames.len()
    }

    pub fn found(&self) -> bool {
        self.path_length > 0
    }

    /// Line shown to the user once the animation is done
    pub fn summary(&self) -> String {
        if self.found() {
            format!(
                "Execution Time: {:.4} seconds (Path Length: {})",
                self.execution_time, self.path_length
            )
        } else {
            format!(
                "No path found! Execution Time: {:.4} seconds",
                self.execution_time
            )
        }
    }
}
