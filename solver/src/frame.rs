//! Locating the outer frame of the maze and the openings in it.
//!
//! Both scans assume the maze is drawn as a solid, axis-aligned rectangular
//! border of wall pixels. Mazes with irregular outlines or wall pixels outside
//! the frame will produce corners that are not the geometric corners of the
//! maze; that case is reported through the pipeline errors rather than guessed.

use log::debug;

use crate::{
    error::{DegenerateReason, Result, SolveError},
    grid::{PixelGrid, Point},
};

/// The rectangle spanned by the first and the last wall pixel in column-major order
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BoundingBox {
    /// top-left corner
    pub l: Point,
    /// bottom-right corner
    pub r: Point,
}

impl BoundingBox {
    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.l.x && p.x <= self.r.x && p.y >= self.l.y && p.y <= self.r.y
    }

    /// True when the box has distinct left/right and top/bottom edges
    pub fn has_area(&self) -> bool {
        self.l.x < self.r.x && self.l.y < self.r.y
    }
}

/// The start and end cells of the maze
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Endpoints {
    pub start: Point,
    pub end: Point,
}

/// Scan all cells column by column (top to bottom inside each column). The first
/// wall found becomes `l`, the last one `r`. Returns `None` if there are no walls.
pub fn find_bounding_box<G: PixelGrid + ?Sized>(grid: &G) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let p = Point::new(x, y);
            if !grid.is_wall(p) {
                continue;
            }
            match bounds.as_mut() {
                Some(b) => b.r = p,
                None => bounds = Some(BoundingBox { l: p, r: p }),
            }
        }
    }

    bounds
}

/// Walk the top and bottom edge of the frame from left to right. The first open
/// cell is the start and the last open cell is the end; at the same column the
/// bottom edge is visited after the top edge.
pub fn locate_endpoints<G: PixelGrid + ?Sized>(
    grid: &G,
    bounds: &BoundingBox,
) -> Option<Endpoints> {
    let mut start: Option<Point> = None;
    let mut end: Option<Point> = None;

    for x in bounds.l.x..=bounds.r.x {
        for p in [Point::new(x, bounds.l.y), Point::new(x, bounds.r.y)] {
            if grid.is_open(p) {
                end = Some(p);
                start.get_or_insert(p);
            }
        }
    }

    Some(Endpoints {
        start: start?,
        end: end?,
    })
}

/// Run both scans and turn every way they can come up empty into a distinct error
pub fn locate_maze<G: PixelGrid + ?Sized>(grid: &G) -> Result<(BoundingBox, Endpoints)> {
    let bounds = find_bounding_box(grid)
        .ok_or(SolveError::Degenerate(DegenerateReason::NoWalls))?;
    debug!("frame spans {} to {}", bounds.l, bounds.r);

    if !bounds.has_area() {
        return Err(SolveError::Degenerate(DegenerateReason::EmptyFrame));
    }

    let endpoints = locate_endpoints(grid, &bounds)
        .ok_or(SolveError::Degenerate(DegenerateReason::NoOpening))?;
    debug!("start {} end {}", endpoints.start, endpoints.end);

    Ok((bounds, endpoints))
}
