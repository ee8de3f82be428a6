//! Global tone adjustments used after subpixel decomposition.
//!
//! Both operate as a blend from a degenerate image toward the source by
//! `factor`; values above 1.0 extrapolate past the source. Results truncate
//! and clip to `0..=255`.

use image::{Rgb, RgbImage};

/// Scale every channel by `factor` (blend from black).
pub fn brightness(src: &RgbImage, factor: f64) -> RgbImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        for c in px.0.iter_mut() {
            *c = clip_u8(f64::from(*c) * factor);
        }
    }
    out
}

/// Push every channel away from the pixel's luma by `factor`
/// (blend from greyscale).
pub fn saturation(src: &RgbImage, factor: f64) -> RgbImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        let grey = f64::from(luma(*px));
        for c in px.0.iter_mut() {
            *c = clip_u8(grey + factor * (f64::from(*c) - grey));
        }
    }
    out
}

/// ITU-R 601 luma in 16-bit fixed point.
fn luma(px: Rgb<u8>) -> u8 {
    let [r, g, b] = px.0;
    let acc = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (acc >> 16) as u8
}

fn clip_u8(v: f64) -> u8 {
    (v as i32).clamp(0, 255) as u8
}
