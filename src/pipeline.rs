use image::RgbImage;

use crate::{
    config::EffectConfig,
    error::CrtResult,
    letterbox::composite,
    normalize::normalize,
    subpixel::decompose,
    upscale::{CRT_ANCHOR_WIDTH, Upscaled, upscale},
};

/// Run the whole CRT simulation over one RGB image.
///
/// Pipeline:
/// 1. [`normalize`](crate::normalize) to the canonical frame of `config.mode`
/// 2. [`upscale`](crate::upscale) to [`CRT_ANCHOR_WIDTH`] with scanlines and bleed
/// 3. [`decompose`](crate::decompose) into phosphor triads, if enabled
/// 4. [`composite`](crate::composite) margins and final scale
///
/// `config` must already be in range (see [`EffectConfig::clamped`]); an
/// out-of-range value fails before any pixel work.
#[tracing::instrument(skip(input, config), fields(mode = %config.mode))]
pub fn render(input: &RgbImage, config: &EffectConfig) -> CrtResult<RgbImage> {
    config.validate()?;

    let frame = normalize(input, config.mode, config.background_color)?;
    let Upscaled {
        image,
        scanline_scale,
    } = upscale(
        &frame,
        CRT_ANCHOR_WIDTH,
        config.crt_width_ratio,
        config.x_blur_ratio,
        config.scan_line_ratio,
    )?;

    let image = if config.subpixel_effect_ratio > 0.0 {
        decompose(&image, config.subpixel_effect_ratio)
    } else {
        image
    };

    composite(image, config, scanline_scale)
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::{config::DisplayMode, error::CrtError};

    #[test]
    fn out_of_range_config_fails_up_front() {
        let cfg = EffectConfig {
            x_blur_ratio: 2.0,
            ..EffectConfig::default()
        };
        let err = render(&RgbImage::new(256, 224), &cfg).unwrap_err();
        assert!(matches!(err, CrtError::ConfigOutOfRange(_)));
    }

    #[test]
    fn msx1_frame_renders_at_crt_aspect() {
        let input = RgbImage::from_pixel(256, 192, Rgb([40, 80, 120]));
        let cfg = EffectConfig {
            mode: DisplayMode::Msx1,
            ..EffectConfig::default()
        };
        let out = render(&input, &cfg).unwrap();
        assert_eq!(out.dimensions(), (586, 384));
    }
}
