use solver::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Mouse button went down over a cell
    MousePressed(Point),
    /// Pointer moved onto a cell
    MouseEntered(Point),
    MouseReleased,
    KeyPressed(char),
    ClearWalls,
    ClearOverlay,
}

/// What painting a cell does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawMode {
    #[default]
    Wall,
    Start,
    End,
}

impl DrawMode {
    pub fn from_key(key: char) -> Option<DrawMode> {
        match key.to_ascii_lowercase() {
            'w' => Some(DrawMode::Wall),
            's' => Some(DrawMode::Start),
            'e' => Some(DrawMode::End),
            _ => None,
        }
    }
}
