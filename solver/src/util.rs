//! Glue between the `image` crate and the solver.

use std::{fs, io::Cursor, path::Path};

use image::{DynamicImage, ImageError, ImageFormat, Rgba, RgbaImage};
use log::debug;

use crate::{
    config::SolverConfig,
    error::{Result, SolveError},
    grid::{PixelGrid, Point, WallMap},
};

/// Only opaque pure black counts as a wall, transparent black is open floor
pub fn is_wall_pixel(p: &Rgba<u8>) -> bool {
    p.0 == [0, 0, 0, 255]
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn is_wall(&self, point: Point) -> bool {
        is_wall_pixel(self.get_pixel(point.x as u32, point.y as u32))
    }
}

pub fn parse_img(img: &RgbaImage) -> WallMap {
    WallMap::from_grid(img)
}

/// Decode an image file into RGBA. The header is checked against the configured
/// size limit before the pixel data is decoded.
pub fn load_image(path: &Path, config: &SolverConfig) -> Result<RgbaImage> {
    let (width, height) = image::image_dimensions(path).map_err(SolveError::Decode)?;
    config.check_size(width, height)?;

    let img = image::open(path).map_err(SolveError::Decode)?;
    debug!("decoded {} ({}x{}, {:?})", path.display(), width, height, img.color());

    Ok(img.to_rgba8())
}

/// Encode into memory using the format implied by the extension of `path`, then
/// write the file in one go so a failed encode never leaves a partial file behind.
pub fn save_image(img: RgbaImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(SolveError::Encode)?;

    let img = match format {
        // no alpha channel in jpeg
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format)
        .map_err(SolveError::Encode)?;

    fs::write(path, buffer.into_inner())
        .map_err(|e| SolveError::Encode(ImageError::IoError(e)))?;
    debug!("wrote {}", path.display());

    Ok(())
}
