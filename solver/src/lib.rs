//! Find the shortest path through a maze drawn as an image and paint it.
//!
//! Black pixels are walls, every other pixel is floor. The maze is expected to
//! be framed by a rectangular wall with openings on its top and/or bottom edge;
//! the leftmost opening is the entrance and the rightmost one the exit.
//!
//! The work is split into plain stages that can be used on their own:
//! [`find_bounding_box`], [`locate_endpoints`], [`solve`] and [`render_path`].
//! [`solve_image`] and [`solve_file`] chain them together.

use std::path::Path;

use image::RgbaImage;
use log::{info, warn};

pub mod config;
pub mod error;
pub mod find;
pub mod frame;
pub mod grid;
pub mod render;
pub mod util;

pub use config::SolverConfig;
pub use error::{DegenerateReason, Result, SolveError};
pub use find::{solve, Node, PathFinder, PathFinderState, PathResult};
pub use frame::{find_bounding_box, locate_endpoints, locate_maze, BoundingBox, Endpoints};
pub use grid::{PixelGrid, Point, WallMap};
pub use render::render_path;

/// A solved maze: the painted image and the path that was painted
#[derive(Debug, Clone)]
pub struct Solution {
    pub image: RgbaImage,
    pub path: PathResult,
}

/// Solve the maze in `image` and return a copy with the path drawn in the highlight color
pub fn solve_image(image: &RgbaImage, config: &SolverConfig) -> Result<Solution> {
    let (width, height) = image.dimensions();
    config.check_size(width, height)?;

    let walls = util::parse_img(image);
    let path = locate_maze(&walls)
        .and_then(|(bounds, ends)| solve(&walls, bounds, ends.start, ends.end))
        .map_err(|e| {
            if matches!(e, SolveError::Degenerate(_) | SolveError::Unreachable { .. }) {
                warn!("rejected maze: {}", e);
            }
            e
        })?;

    let mut painted = image.clone();
    render_path(&mut painted, &path.path, config.highlight_pixel());

    Ok(Solution {
        image: painted,
        path,
    })
}

/// Read a maze from `input`, solve it and write the painted result to `output`.
/// Nothing is written unless a path was found.
pub fn solve_file(input: &Path, output: &Path, config: &SolverConfig) -> Result<PathResult> {
    let image = util::load_image(input, config)?;
    let Solution { image, path } = solve_image(&image, config)?;
    util::save_image(image, output)?;

    info!(
        "path from {} to {}: {} hops, written to {}",
        path.start,
        path.goal,
        path.hops,
        output.display()
    );

    Ok(path)
}
