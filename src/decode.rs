use std::path::Path;

use anyhow::Context as _;
use image::RgbImage;

use crate::error::CrtResult;

/// Decode any supported format and drop straight to RGB8; alpha is discarded.
pub fn decode_rgb(bytes: &[u8]) -> CrtResult<RgbImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

pub fn open_rgb(path: &Path) -> CrtResult<RgbImage> {
    let img = image::open(path)?;
    tracing::debug!(w = img.width(), h = img.height(), "decoded {}", path.display());
    Ok(img.to_rgb8())
}

/// Encode by file extension, creating missing parent directories.
pub fn save_rgb(path: &Path, img: &RgbImage) -> CrtResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save(path)?;
    Ok(())
}
