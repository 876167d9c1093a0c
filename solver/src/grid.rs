use crate::error::SolveError;
use crate::find::{MapStorage, MapTrait, NodeReference};
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Size of the grid the editor starts out with
pub const DEFAULT_ROWS: usize = 25;
pub const DEFAULT_COLUMNS: usize = 50;

/// Up, down, left, right. Neighbors are always produced in this order.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

impl Cell {
    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Start => 'S',
            Cell::End => 'E',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A `(row, col)` coordinate, sent over the wire as `[row, col]`
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan(other) == 1
    }

    fn offset(self, (d_row, d_col): (isize, isize)) -> Option<Point> {
        Some(Point {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl NodeReference for Point {}

impl From<(usize, usize)> for Point {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Point> for (usize, usize) {
    fn from(p: Point) -> Self {
        (p.row, p.col)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Point {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| anyhow::anyhow!("Invalid point: {}, expected row,col", s))?;

        Ok(Point {
            row: row.trim().parse()?,
            col: col.trim().parse()?,
        })
    }
}

/// A `(row, col)` as sent by clients. Unlike [`Point`] it may lie outside of any grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct Coordinate {
    pub row: i64,
    pub col: i64,
}

impl Coordinate {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The grid point, if neither component is negative
    pub fn to_point(self) -> Option<Point> {
        Some(Point {
            row: usize::try_from(self.row).ok()?,
            col: usize::try_from(self.col).ok()?,
        })
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}

impl From<Coordinate> for (i64, i64) {
    fn from(c: Coordinate) -> Self {
        (c.row, c.col)
    }
}

impl From<Point> for Coordinate {
    fn from(p: Point) -> Self {
        Self {
            row: i64::try_from(p.row).unwrap_or(i64::MAX),
            col: i64::try_from(p.col).unwrap_or(i64::MAX),
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular maze. Every step between two open neighbors costs 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS)
    }
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::Empty; columns]; rows],
        }
    }

    /// Build a grid from rows of cells, all rows must be non-empty and of equal length
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Result<Self, SolveError> {
        let columns = match cells.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(SolveError::InvalidGrid("the maze has no cells".into())),
        };

        if let Some((row, ragged)) = cells.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(SolveError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                row,
                ragged.len(),
                columns
            )));
        }

        Ok(Self {
            rows: cells.len(),
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, p: Point) -> Option<Cell> {
        self.cells.get(p.row)?.get(p.col).copied()
    }

    /// Overwrite a cell, returns the previous state or `None` if `p` is out of bounds
    pub fn set(&mut self, p: Point, cell: Cell) -> Option<Cell> {
        let slot = self.cells.get_mut(p.row)?.get_mut(p.col)?;
        Some(std::mem::replace(slot, cell))
    }

    pub fn is_passable(&self, p: Point) -> bool {
        self.get(p).is_some_and(Cell::is_passable)
    }

    /// All coordinates holding `cell`, in row-major order
    pub fn find(&self, cell: Cell) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().enumerate().flat_map(move |(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(_, c)| **c == cell)
                .map(move |(col, _)| Point { row, col })
        })
    }

    /// Reset every cell holding `cell` to empty
    pub fn clear(&mut self, cell: Cell) {
        for c in self.cells.iter_mut().flatten() {
            if *c == cell {
                *c = Cell::Empty;
            }
        }
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Scales the map by the given factor, i.e. to make it twice as large, pass 2.
    /// Interpolates the cells by repeating the existing cells in the new grid.
    pub fn scale_up(&mut self, factor: usize) {
        let mut new_cells = vec![vec![Cell::default(); self.columns * factor]; self.rows * factor];

        for row in 0..self.rows {
            for col in 0..self.columns {
                for r in 0..factor {
                    for c in 0..factor {
                        new_cells[row * factor + r][col * factor + c] = self.cells[row][col];
                    }
                }
            }
        }

        self.rows *= factor;
        self.columns *= factor;
        self.cells = new_cells;
    }

    /// Draw the grid with the explored cells (`o`) and the route (`*`) on top
    pub fn render(&self, visited: &[Point], path: &[Point]) -> String {
        let mut symbols: Vec<Vec<char>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();

        for (points, mark) in [(visited, 'o'), (path, '*')] {
            for p in points {
                if let Some(symbol) = symbols.get_mut(p.row).and_then(|r| r.get_mut(p.col)) {
                    if *symbol == Cell::Empty.symbol() || *symbol == 'o' {
                        *symbol = mark;
                    }
                }
            }
        }

        let mut out = String::with_capacity(self.rows * (self.columns + 1));
        for row in symbols {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl FromStr for Grid {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, symbol)| {
                        Cell::from_symbol(symbol).ok_or_else(|| {
                            SolveError::InvalidGrid(format!(
                                "unknown cell {:?} at {}",
                                symbol,
                                Point { row, col }
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(cells)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// A MapStorage that keeps one value per grid cell in a single row-major vec
#[derive(Debug)]
pub struct CellStorage<T> {
    columns: usize,
    values: Vec<T>,
}

impl<T: Copy + 'static> MapStorage<T> for CellStorage<T> {
    type Reference = Point;

    fn get(&self, node: Self::Reference) -> T {
        self.values[node.row * self.columns + node.col]
    }

    fn get_mut(&mut self, node: Self::Reference) -> &mut T {
        &mut self.values[node.row * self.columns + node.col]
    }
}

impl MapTrait for Grid {
    type Reference = Point;
    type Storage<T: Default + Copy + Clone + 'static> = CellStorage<T>;
    type Cost = usize;

    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Reference, Self::Cost)> {
        let mut points = Vec::with_capacity(DIRECTIONS.len());

        if self.is_passable(node) {
            for direction in DIRECTIONS {
                if let Some(next) = node.offset(direction) {
                    if self.is_passable(next) {
                        points.push((next, 1));
                    }
                }
            }
        }

        points.into_iter()
    }

    fn estimate(&self, from: Self::Reference, to: Self::Reference) -> Self::Cost {
        from.manhattan(to)
    }

    fn create_storage<T: Default + Copy + Clone + 'static>(&self) -> Self::Storage<T> {
        CellStorage {
            columns: self.columns,
            values: vec![Default::default(); self.rows * self.columns],
        }
    }
}
