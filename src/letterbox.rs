use image::{RgbImage, imageops};

use crate::{
    config::EffectConfig,
    error::{CrtError, CrtResult},
    resample::{resize_bicubic, round_px},
    scanline::scanline_background,
    upscale::CRT_ANCHOR_WIDTH,
};

/// Frame width, in units of [`CRT_ANCHOR_WIDTH`], including the horizontal
/// overscan border.
pub const MARGIN_WIDTH_ANCHOR: u32 = 597;
/// Frame height, also in units of [`CRT_ANCHOR_WIDTH`].
pub const MARGIN_HEIGHT_ANCHOR: u32 = 448;

/// Size of the letterboxed frame. Both margins scale with the image *width*;
/// each enabled dimension is bumped to the next even number.
pub fn margin_size(width: u32, height: u32, h_margin: bool, v_margin: bool) -> (u32, u32) {
    let unit = f64::from(width) / f64::from(CRT_ANCHOR_WIDTH);
    let mut size = (width, height);
    if h_margin {
        size.0 = round_up_even(round_px(unit * f64::from(MARGIN_WIDTH_ANCHOR)));
    }
    if v_margin {
        size.1 = round_up_even(round_px(unit * f64::from(MARGIN_HEIGHT_ANCHOR)));
    }
    size
}

fn round_up_even(v: u32) -> u32 {
    v + v % 2
}

/// Letterbox `image` onto a scanline-textured background and apply the final
/// output scale (`0.0` skips scaling).
#[tracing::instrument(skip(image, config), fields(w = image.width(), h = image.height()))]
pub fn composite(
    mut image: RgbImage,
    config: &EffectConfig,
    scanline_scale: f64,
) -> CrtResult<RgbImage> {
    let (width, height) = image.dimensions();
    let (frame_w, frame_h) = margin_size(width, height, config.h_margin, config.v_margin);

    if (frame_w, frame_h) != (width, height) {
        tracing::debug!(frame_w, frame_h, "size with margin");
        let mut frame = scanline_background(
            scanline_scale,
            frame_w,
            frame_h,
            config.background_color,
            config.scan_line_ratio,
        );
        let left = (i64::from(frame_w) - i64::from(width)) / 2;
        let top = (i64::from(frame_h) - i64::from(height)) / 2;
        imageops::replace(&mut frame, &image, left, top);
        image = frame;
    }

    if config.scale != 0.0 {
        let scaled_w = (f64::from(image.width()) * config.scale) as u32;
        let scaled_h = (f64::from(image.height()) * config.scale) as u32;
        if scaled_w == 0 || scaled_h == 0 {
            return Err(CrtError::validation(format!(
                "scale {} collapses {}x{} to an empty image",
                config.scale,
                image.width(),
                image.height()
            )));
        }
        tracing::debug!("scaling: {}x{} -> {scaled_w}x{scaled_h}", image.width(), image.height());
        image = resize_bicubic(&image, scaled_w, scaled_h);
    }

    Ok(image)
}
