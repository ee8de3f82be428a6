use image::{Rgb, RgbImage, imageops};

use crate::{
    config::{CANONICAL_WIDTH, DisplayMode},
    error::{CrtError, CrtResult},
    resample::{resize_nearest, round_px},
};

/// Fit arbitrary pixel art into the canonical `256 x mode.target_height()` frame.
///
/// The image is first resized to 256 wide with nearest-neighbour sampling
/// (height follows the aspect ratio). Surplus rows are cropped from the
/// centre, a short image is centred on a `background` canvas. Odd leftovers go
/// to the bottom in both cases.
#[tracing::instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn normalize(image: &RgbImage, mode: DisplayMode, background: [u8; 3]) -> CrtResult<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CrtError::validation("input image must be non-empty"));
    }

    let resized_height =
        round_px(f64::from(height) * f64::from(CANONICAL_WIDTH) / f64::from(width)).max(1);
    let resized = resize_nearest(image, CANONICAL_WIDTH, resized_height);
    let target_height = mode.target_height();
    tracing::debug!(resized_height, target_height, "normalized width to 256");

    if resized_height > target_height {
        let top = (resized_height - target_height) / 2;
        let cropped = imageops::crop_imm(&resized, 0, top, CANONICAL_WIDTH, target_height);
        return Ok(cropped.to_image());
    }

    let mut canvas = RgbImage::from_pixel(CANONICAL_WIDTH, target_height, Rgb(background));
    let top = (target_height - resized_height) / 2;
    imageops::replace(&mut canvas, &resized, 0, i64::from(top));
    Ok(canvas)
}
