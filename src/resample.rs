use image::{
    RgbImage,
    imageops::{self, FilterType},
};

/// Pixel-replicating resize; pixel-art cells never blend into their neighbours.
pub fn resize_nearest(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width, height, FilterType::Nearest)
}

/// Bicubic resize with the Catmull-Rom kernel (a = -0.5).
pub fn resize_bicubic(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width, height, FilterType::CatmullRom)
}

/// Round a derived pixel dimension half away from zero.
pub(crate) fn round_px(v: f64) -> u32 {
    v.round().max(0.0) as u32
}
