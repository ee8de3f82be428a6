use image::{Rgb, RgbImage};

use crate::enhance;

/// Rows per full brick cycle of the phosphor layout; the triad order flips
/// every half period.
pub const PHASE_PERIOD_ROWS: u32 = 8;

/// Brightness and saturation boost per unit of effect ratio.
pub const COMPENSATION_GAIN: f64 = 0.4;

/// Channel kept at full strength for each column of a triad.
const PHASE_A: [usize; 3] = [0, 1, 2];
const PHASE_B: [usize; 3] = [1, 2, 0];

/// Split the picture into staggered R/G/B phosphor triads.
///
/// Columns are grouped in threes; inside a group each column keeps one channel
/// and multiplies the other two by `1 - ratio`. The channel order rotates
/// every four rows, giving a brick pattern. A trailing group narrower than
/// three columns stays black. The result is then brightened and saturated by
/// `1 + 0.4 * ratio` to make up for the suppressed light.
#[tracing::instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn decompose(image: &RgbImage, ratio: f64) -> RgbImage {
    let out = split_triads(image, ratio);
    let gain = 1.0 + COMPENSATION_GAIN * ratio;
    let out = enhance::brightness(&out, gain);
    enhance::saturation(&out, gain)
}

fn split_triads(image: &RgbImage, ratio: f64) -> RgbImage {
    let (width, height) = image.dimensions();
    let keep = 1.0 - ratio;
    let mut out = RgbImage::new(width, height);

    for y in 0..height {
        let order = if y % PHASE_PERIOD_ROWS < PHASE_PERIOD_ROWS / 2 {
            &PHASE_A
        } else {
            &PHASE_B
        };
        for x0 in (0..width).step_by(3) {
            if x0 + 2 >= width {
                break;
            }
            for (i, &lit) in order.iter().enumerate() {
                let x = x0 + i as u32;
                let src = image.get_pixel(x, y).0;
                let mut px = [0u8; 3];
                for c in 0..3 {
                    px[c] = if c == lit {
                        src[c]
                    } else {
                        (f64::from(src[c]) * keep) as u8
                    };
                }
                out.put_pixel(x, y, Rgb(px));
            }
        }
    }
    out
}
