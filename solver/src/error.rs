use thiserror::Error;

use crate::grid::Point;

/// Why a maze image could not be turned into a solvable start/end pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// The image contains no wall pixels at all
    NoWalls,
    /// The walls do not span a rectangle with a distinct top and bottom edge
    EmptyFrame,
    /// Neither the top nor the bottom edge of the frame has an open cell
    NoOpening,
    /// An endpoint handed to the solver is a wall or lies outside the frame
    EndpointOutsideFrame(Point),
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateReason::NoWalls => write!(f, "image contains no wall pixels"),
            DegenerateReason::EmptyFrame => write!(f, "maze frame has zero area"),
            DegenerateReason::NoOpening => {
                write!(f, "no opening on the top or bottom edge of the frame")
            }
            DegenerateReason::EndpointOutsideFrame(p) => {
                write!(f, "endpoint {} is not an open cell inside the frame", p)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Failed to decode maze image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Maze image is {width}x{height}, which exceeds the limit of {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },

    #[error("Degenerate maze: {0}")]
    Degenerate(DegenerateReason),

    #[error("No path from {start} to {end}")]
    Unreachable { start: Point, end: Point },

    #[error("Failed to encode solution image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolveError>;
