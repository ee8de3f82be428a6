use image::RgbImage;
use rayon::prelude::*;

/// Causal horizontal smear ("causal IIR"), one weight per RGB channel.
///
/// Every row is scanned left to right in place: interior pixel `x` becomes
/// `round(out[x-1] * r + src[x] * (1 - r))`, where `out[x-1]` has already been
/// smeared. The first and last columns are untouched. Rows are independent and
/// run in parallel; columns within a row never are.
pub fn bleed_horizontal(src: &RgbImage, ratios: [f64; 3]) -> RgbImage {
    let (width, height) = src.dimensions();
    let mut out = src.clone();
    if width < 3 || height == 0 || ratios.iter().all(|&r| r == 0.0) {
        return out;
    }

    let stride = width as usize * 3;
    let buf: &mut [u8] = &mut out;
    buf.par_chunks_exact_mut(stride)
        .for_each(|row| bleed_row(row, ratios));
    out
}

fn bleed_row(row: &mut [u8], ratios: [f64; 3]) {
    let width = row.len() / 3;
    for x in 1..width - 1 {
        for (c, &r) in ratios.iter().enumerate() {
            if r == 0.0 {
                continue;
            }
            let prev = f64::from(row[(x - 1) * 3 + c]);
            let cur = f64::from(row[x * 3 + c]);
            row[x * 3 + c] = (prev * r + cur * (1.0 - r)).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn ramp(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 37 % 256) as u8, (x * 11 + y * 3) as u8, (255 - x) as u8])
        })
    }

    #[test]
    fn zero_ratio_channel_is_identity() {
        let src = ramp(16, 3);
        let out = bleed_horizontal(&src, [0.7, 0.0, 0.0]);
        for (a, b) in src.pixels().zip(out.pixels()) {
            assert_eq!(a[1], b[1]);
            assert_eq!(a[2], b[2]);
        }
        assert_eq!(bleed_horizontal(&src, [0.0; 3]), src);
    }

    #[test]
    fn full_ratio_copies_left_border_across_row() {
        let src = ramp(16, 2);
        let out = bleed_horizontal(&src, [1.0, 1.0, 1.0]);
        for y in 0..2 {
            for x in 1..15 {
                assert_eq!(out.get_pixel(x, y), out.get_pixel(x - 1, y));
            }
            assert_eq!(out.get_pixel(15, y), src.get_pixel(15, y));
        }
    }

    #[test]
    fn smear_cascades_from_already_blurred_neighbour() {
        let mut src = RgbImage::new(5, 1);
        src.put_pixel(0, 0, Rgb([200, 0, 0]));
        let out = bleed_horizontal(&src, [0.5, 0.0, 0.0]);
        let reds: Vec<u8> = out.pixels().map(|p| p[0]).collect();
        // 200 -> 100 -> 50 -> 25, last column untouched.
        assert_eq!(reds, vec![200, 100, 50, 25, 0]);
    }

    #[test]
    fn rounds_to_nearest() {
        let mut src = RgbImage::new(3, 1);
        src.put_pixel(0, 0, Rgb([3, 0, 0]));
        let out = bleed_horizontal(&src, [0.5, 0.0, 0.0]);
        assert_eq!(out.get_pixel(1, 0)[0], 2);
    }

    #[test]
    fn narrow_images_pass_through() {
        let src = ramp(2, 4);
        assert_eq!(bleed_horizontal(&src, [1.0, 1.0, 1.0]), src);
    }
}
