use image::RgbImage;

use crate::error::{CrtError, CrtResult};

pub type Rgb8 = [u8; 3];

/// Brighter-wins per channel. Bleed composited this way only adds glow.
pub fn lighten(dst: Rgb8, src: Rgb8) -> Rgb8 {
    [dst[0].max(src[0]), dst[1].max(src[1]), dst[2].max(src[2])]
}

pub fn lighten_in_place(dst: &mut [u8], src: &[u8]) -> CrtResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(3) {
        return Err(CrtError::validation(
            "lighten_in_place expects equal-length rgb8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
        let out = lighten([d[0], d[1], d[2]], [s[0], s[1], s[2]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub fn lighten_images(sharp: &RgbImage, glow: &RgbImage) -> CrtResult<RgbImage> {
    if sharp.dimensions() != glow.dimensions() {
        return Err(CrtError::validation(format!(
            "lighten expects equal sizes, got {:?} and {:?}",
            sharp.dimensions(),
            glow.dimensions()
        )));
    }
    let mut out = sharp.clone();
    lighten_in_place(&mut out, glow)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[test]
    fn lighten_takes_channelwise_max() {
        assert_eq!(lighten([10, 200, 30], [20, 100, 30]), [20, 200, 30]);
    }

    #[test]
    fn lighten_with_self_is_identity() {
        let img = RgbImage::from_fn(3, 3, |x, y| Rgb([x as u8, y as u8, 7]));
        assert_eq!(lighten_images(&img, &img).unwrap(), img);
    }

    #[test]
    fn lighten_never_darkens() {
        let a = RgbImage::from_fn(4, 2, |x, _| Rgb([x as u8 * 50, 0, 255]));
        let b = RgbImage::from_pixel(4, 2, Rgb([100, 100, 100]));
        let out = lighten_images(&a, &b).unwrap();
        for ((o, a), b) in out.pixels().zip(a.pixels()).zip(b.pixels()) {
            for c in 0..3 {
                assert!(o[c] >= a[c] && o[c] >= b[c]);
            }
        }
    }

    #[test]
    fn mismatched_buffers_are_rejected() {
        let mut dst = vec![0u8; 6];
        assert!(lighten_in_place(&mut dst, &[0u8; 3]).is_err());
        let a = RgbImage::new(2, 2);
        let b = RgbImage::new(3, 2);
        assert!(lighten_images(&a, &b).is_err());
    }
}
