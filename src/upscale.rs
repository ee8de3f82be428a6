use image::RgbImage;

use crate::{
    blur_cpu::bleed_horizontal,
    composite_cpu::lighten_images,
    config::MAX_CRT_WIDTH_RATIO,
    error::{CrtError, CrtResult},
    resample::{resize_bicubic, resize_nearest, round_px},
    scanline::darken_even_rows,
};

/// Output width of a 4:3 tube showing one canonical frame; output height is
/// `2 * input_height * width / CRT_ANCHOR_WIDTH` (two raster lines per source row).
pub const CRT_ANCHOR_WIDTH: u32 = 586;

pub const SUPPORTED_WIDTHS: [u32; 3] = [256, 320, 512];
pub const SUPPORTED_HEIGHTS: [u32; 3] = [192, 212, 224];

/// Per-channel bleed weights before scaling by the blur ratio. Red phosphor
/// persists longest, blue not at all.
pub const BLEED_WEIGHTS: [f64; 3] = [0.8, 0.6, 0.0];

#[derive(Clone, Debug)]
pub struct Upscaled {
    pub image: RgbImage,
    /// `final_height / (input_height * 2)`; the letterbox background needs
    /// it to band at the same density as the picture.
    pub scanline_scale: f64,
}

#[tracing::instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn upscale(
    image: &RgbImage,
    target_width: u32,
    crt_width_ratio: f64,
    x_blur_ratio: f64,
    scan_line_ratio: f64,
) -> CrtResult<Upscaled> {
    let (width, height) = image.dimensions();
    if !SUPPORTED_WIDTHS.contains(&width) {
        return Err(CrtError::precondition(format!(
            "width must be one of {SUPPORTED_WIDTHS:?}, got {width}"
        )));
    }
    if !SUPPORTED_HEIGHTS.contains(&height) {
        return Err(CrtError::precondition(format!(
            "height must be one of {SUPPORTED_HEIGHTS:?}, got {height}"
        )));
    }
    if target_width == 0 {
        return Err(CrtError::validation("target width must be > 0"));
    }

    let inner = f64::from(target_width) * crt_width_ratio;
    if !(0.0..=f64::from(target_width) * MAX_CRT_WIDTH_RATIO).contains(&inner) {
        return Err(CrtError::validation(format!(
            "crt width ratio {crt_width_ratio} is outside [0,{MAX_CRT_WIDTH_RATIO}] \
             for target width {target_width}"
        )));
    }
    let inner_width = round_px(inner).max(1);
    let final_height = round_px(
        f64::from(target_width) * 2.0 * f64::from(height) / f64::from(CRT_ANCHOR_WIDTH),
    )
    .max(1);
    let scanline_scale = f64::from(final_height) / (f64::from(height) * 2.0);
    tracing::debug!(inner_width, "inner crt width");
    tracing::debug!(
        "input {width} x {height} -> output {target_width} x {final_height}"
    );

    // Bottleneck horizontal detail before anything is sharpened back up.
    let mut work = resize_bicubic(image, inner_width, height);

    if scan_line_ratio > 0.0 {
        work = resize_nearest(&work, inner_width, height * 2);
        darken_even_rows(&mut work, scan_line_ratio);
    }

    let sharp = resize_bicubic(&work, target_width, final_height);
    let weights = BLEED_WEIGHTS.map(|w| w * x_blur_ratio);
    let glow = bleed_horizontal(&sharp, weights);
    let image = lighten_images(&sharp, &glow)?;

    Ok(Upscaled {
        image,
        scanline_scale,
    })
}
