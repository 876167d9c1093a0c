//! Interactive maze editing on top of the solver.
//!
//! The [`Editor`] is driven by [`Event`]s coming from whatever surface draws the grid, builds
//! [`solver::SolveRequest`]s from the current state and turns responses into an [`Animation`]
//! of timed [`Frame`]s.

mod animation;
mod editor;
mod event;

pub use animation::{Animation, Frame, Mark, PATH_INTERVAL, VISIT_INTERVAL};
pub use editor::{Editor, EditorError};
pub use event::{DrawMode, Event};
