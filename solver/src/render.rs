use image::{GenericImage, GenericImageView};

use crate::grid::Point;

/// Paint every cell of `path` with `color`. Pixels outside the image are skipped
/// and nothing else is touched, so painting the same path twice is a no-op.
pub fn render_path<I: GenericImage>(image: &mut I, path: &[Point], color: I::Pixel) {
    for p in path {
        let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) else {
            continue;
        };
        if image.in_bounds(x, y) {
            image.put_pixel(x, y, color);
        }
    }
}
