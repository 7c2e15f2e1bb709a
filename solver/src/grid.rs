use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell coordinate in the maze image, `x` is the column and `y` the row
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two points
    pub fn distance(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Anything that can tell the solver how large it is and which of its cells are walls.
///
/// `is_wall` is only called with points inside `[0, width) x [0, height)`.
pub trait PixelGrid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn is_wall(&self, point: Point) -> bool;

    fn contains(&self, point: Point) -> bool {
        point.x < self.width() && point.y < self.height()
    }

    fn is_open(&self, point: Point) -> bool {
        !self.is_wall(point)
    }
}

/// A precomputed wall mask stored as a single row-major vector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallMap {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl WallMap {
    /// Create a map of the given size with no walls
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            walls: vec![false; width * height],
        }
    }

    /// Build a mask by sampling any other grid once per cell
    pub fn from_grid<G: PixelGrid + ?Sized>(grid: &G) -> Self {
        let mut map = Self::new(grid.width(), grid.height());
        for y in 0..map.height {
            for x in 0..map.width {
                let p = Point::new(x, y);
                map.set_wall(p, grid.is_wall(p));
            }
        }
        map
    }

    pub fn set_wall(&mut self, point: Point, wall: bool) {
        let idx = self.index(point);
        self.walls[idx] = wall;
    }

    fn index(&self, point: Point) -> usize {
        point.y * self.width + point.x
    }
}

impl PixelGrid for WallMap {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_wall(&self, point: Point) -> bool {
        self.walls[self.index(point)]
    }
}

impl Display for WallMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.walls.chunks(self.width.max(1)) {
            for &wall in row {
                write!(f, "{}", if wall { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parses ASCII art where `#` is a wall and any other character is open.
/// Blank lines are skipped and every remaining line must have the same length.
impl FromStr for WallMap {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut map = WallMap::new(width, rows.len());

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(anyhow::anyhow!(
                    "row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                ));
            }
            for (x, c) in row.chars().enumerate() {
                map.set_wall(Point::new(x, y), c == '#');
            }
        }

        Ok(map)
    }
}
