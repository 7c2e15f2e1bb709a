use std::{fs, path::Path};

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolveError};

/// Settings for a solver run, usually read from a JSON file.
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// RGB color the path is drawn with
    pub highlight: [u8; 3],
    /// Largest accepted `width * height` of the input image
    pub max_pixels: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            highlight: [255, 0, 0],
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

impl SolverConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn highlight_pixel(&self) -> Rgba<u8> {
        let [r, g, b] = self.highlight;
        Rgba([r, g, b, 255])
    }

    /// Reject grids larger than `max_pixels` before any per-cell storage is allocated
    pub fn check_size(&self, width: u32, height: u32) -> Result<()> {
        if width as u64 * height as u64 > self.max_pixels {
            return Err(SolveError::TooLarge {
                width,
                height,
                limit: self.max_pixels,
            });
        }
        Ok(())
    }
}

/// Parse a color given as `R,G,B`, e.g. `0,128,255`
pub fn parse_color(s: &str) -> anyhow::Result<[u8; 3]> {
    let parts = s
        .split(',')
        .map(|c| c.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid color component in {}: {}", s, e))?;

    match parts.as_slice() {
        &[r, g, b] => Ok([r, g, b]),
        _ => Err(anyhow::anyhow!("Invalid color: {}, expected R,G,B", s)),
    }
}
