use image::{Rgb, RgbImage};

use crate::resample::resize_nearest;

/// Multiply every even row (0-based) by `1 - ratio`, leaving odd rows and the
/// first/last columns alone. Channels truncate toward zero.
pub fn darken_even_rows(image: &mut RgbImage, ratio: f64) {
    let (width, height) = image.dimensions();
    if ratio == 0.0 || width < 3 {
        return;
    }
    let keep = 1.0 - ratio;
    for y in (0..height).step_by(2) {
        for x in 1..width - 1 {
            let px = image.get_pixel_mut(x, y);
            for c in px.0.iter_mut() {
                *c = (f64::from(*c) * keep).clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Background for letterbox margins with the same banding density as the
/// upscaled picture.
///
/// A one-pixel-wide column `height / scale` rows tall is built with every odd
/// row darkened by `1 - ratio`, then stretched to `width x height` with
/// nearest-neighbour sampling.
pub fn scanline_background(
    scale: f64,
    width: u32,
    height: u32,
    color: [u8; 3],
    ratio: f64,
) -> RgbImage {
    let base_height = if scale > 0.0 {
        ((f64::from(height) / scale) as u32).max(1)
    } else {
        height.max(1)
    };
    let mut column = RgbImage::from_pixel(1, base_height, Rgb(color));
    if ratio > 0.0 {
        let keep = 1.0 - ratio;
        let dark = Rgb(color.map(|c| (f64::from(c) * keep) as u8));
        for y in (1..base_height).step_by(2) {
            column.put_pixel(0, y, dark);
        }
    }
    resize_nearest(&column, width, height)
}
