use image::{DynamicImage, GenericImageView};

use crate::error::SolveError;
use crate::grid::{Cell, Grid, Point};

/// Threshold an image into a maze, one cell per pixel. Dark pixels become walls.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, SolveError> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if width == 0 || height == 0 {
        return Err(SolveError::InvalidGrid(format!("empty {}x{} image", width, height)));
    }

    let mut cells = vec![vec![Cell::Empty; width]; height];

    for (row, line) in cells.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] < 128 {
                *cell = Cell::Wall;
            }
        }
    }

    Grid::from_rows(cells)
}

/// Mark the endpoints on a grid loaded from an image
pub fn place_endpoints(grid: &mut Grid, start: Point, end: Point) {
    grid.set(start, Cell::Start);
    grid.set(end, Cell::End);
}
