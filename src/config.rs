use std::path::Path;

use anyhow::Context as _;

use crate::error::{CrtError, CrtResult};

/// Source display the pixel art was drawn for. Each mode fixes the canonical
/// frame height; the canonical width is always [`CANONICAL_WIDTH`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayMode {
    Msx1,
    Msx2,
    /// 256x224, which also covers most other consoles of the era.
    #[default]
    Famicom,
}

pub const CANONICAL_WIDTH: u32 = 256;

/// Upper bound for [`EffectConfig::crt_width_ratio`]. Past a few times the
/// output width the bicubic squeeze is invisible and only costs memory.
pub const MAX_CRT_WIDTH_RATIO: f64 = 4.0;

impl DisplayMode {
    pub fn target_height(self) -> u32 {
        match self {
            DisplayMode::Msx1 => 192,
            DisplayMode::Msx2 => 212,
            DisplayMode::Famicom => 224,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Msx1 => "MSX1",
            DisplayMode::Msx2 => "MSX2",
            DisplayMode::Famicom => "FAMICOM",
        }
    }

    /// Never fails: anything other than MSX1/MSX2 selects [`DisplayMode::Famicom`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "MSX1" => DisplayMode::Msx1,
            "MSX2" => DisplayMode::Msx2,
            _ => DisplayMode::Famicom,
        }
    }
}

impl From<String> for DisplayMode {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<DisplayMode> for String {
    fn from(mode: DisplayMode) -> Self {
        mode.name().to_string()
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Every tunable of one render.
///
/// Ratios are clamped by [`EffectConfig::clamped`] at the configuration
/// boundary; [`crate::render`] only checks them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub mode: DisplayMode,
    /// Uniform factor for the final resize. `0.0` skips the resize.
    pub scale: f64,
    /// Internal horizontal resolution of the simulated tube, relative to the
    /// output width. 0.625 = 400 / 640.
    pub crt_width_ratio: f64,
    pub background_color: [u8; 3],
    pub h_margin: bool,
    pub v_margin: bool,
    pub x_blur_ratio: f64,
    pub subpixel_effect_ratio: f64,
    pub scan_line_ratio: f64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            scale: 1.0,
            crt_width_ratio: 0.625,
            background_color: [0, 0, 0],
            h_margin: false,
            v_margin: false,
            x_blur_ratio: 0.0,
            subpixel_effect_ratio: 0.0,
            scan_line_ratio: 0.0,
        }
    }
}

impl EffectConfig {
    pub fn from_json_str(s: &str) -> CrtResult<Self> {
        serde_json::from_str(s).map_err(|e| CrtError::serde(e.to_string()))
    }

    pub fn from_json_path(path: &Path) -> CrtResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read preset '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> CrtResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CrtError::serde(e.to_string()))
    }

    /// Pull every value into the range the pipeline accepts. NaN ratios become 0.
    pub fn clamped(mut self) -> Self {
        self.x_blur_ratio = clamp_unit(self.x_blur_ratio);
        self.subpixel_effect_ratio = clamp_unit(self.subpixel_effect_ratio);
        self.scan_line_ratio = clamp_unit(self.scan_line_ratio);
        self.crt_width_ratio = if self.crt_width_ratio.is_finite() {
            self.crt_width_ratio.clamp(0.0, MAX_CRT_WIDTH_RATIO)
        } else {
            0.0
        };
        if !self.scale.is_finite() || self.scale < 0.0 {
            self.scale = 0.0;
        }
        self
    }

    pub fn validate(&self) -> CrtResult<()> {
        for (name, v) in [
            ("x_blur_ratio", self.x_blur_ratio),
            ("subpixel_effect_ratio", self.subpixel_effect_ratio),
            ("scan_line_ratio", self.scan_line_ratio),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CrtError::config(format!("{name} must be in [0,1], got {v}")));
            }
        }
        if !(0.0..=MAX_CRT_WIDTH_RATIO).contains(&self.crt_width_ratio) {
            return Err(CrtError::config(format!(
                "crt_width_ratio must be in [0,{MAX_CRT_WIDTH_RATIO}], got {}",
                self.crt_width_ratio
            )));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(CrtError::config(format!(
                "scale must be >= 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_heights() {
        assert_eq!(DisplayMode::Msx1.target_height(), 192);
        assert_eq!(DisplayMode::Msx2.target_height(), 212);
        assert_eq!(DisplayMode::Famicom.target_height(), 224);
    }

    #[test]
    fn unknown_mode_falls_back_to_famicom() {
        assert_eq!(DisplayMode::parse_lenient("msx1"), DisplayMode::Msx1);
        assert_eq!(DisplayMode::parse_lenient(" MSX2 "), DisplayMode::Msx2);
        assert_eq!(DisplayMode::parse_lenient("PCE"), DisplayMode::Famicom);
        assert_eq!(DisplayMode::parse_lenient(""), DisplayMode::Famicom);
    }

    #[test]
    fn clamped_pulls_ratios_into_range() {
        let cfg = EffectConfig {
            x_blur_ratio: 1.5,
            subpixel_effect_ratio: -0.2,
            scan_line_ratio: f64::NAN,
            crt_width_ratio: -1.0,
            scale: -2.0,
            ..EffectConfig::default()
        }
        .clamped();
        assert_eq!(cfg.x_blur_ratio, 1.0);
        assert_eq!(cfg.subpixel_effect_ratio, 0.0);
        assert_eq!(cfg.scan_line_ratio, 0.0);
        assert_eq!(cfg.crt_width_ratio, 0.0);
        assert_eq!(cfg.scale, 0.0);
        cfg.validate().unwrap();
    }

    #[test]
    fn huge_crt_width_ratio_is_capped() {
        let cfg = EffectConfig {
            crt_width_ratio: 1e6,
            ..EffectConfig::default()
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            CrtError::ConfigOutOfRange(_)
        ));
        assert_eq!(cfg.clamped().crt_width_ratio, MAX_CRT_WIDTH_RATIO);
    }

    #[test]
    fn validate_rejects_unclamped_ratio() {
        let cfg = EffectConfig {
            scan_line_ratio: 1.01,
            ..EffectConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, CrtError::ConfigOutOfRange(_)));
        assert!(err.to_string().contains("scan_line_ratio"));
    }

    #[test]
    fn partial_preset_fills_defaults() {
        let cfg =
            EffectConfig::from_json_str(r#"{ "mode": "msx2", "scan_line_ratio": 0.5 }"#).unwrap();
        assert_eq!(cfg.mode, DisplayMode::Msx2);
        assert_eq!(cfg.scan_line_ratio, 0.5);
        assert_eq!(cfg.crt_width_ratio, 0.625);
        assert_eq!(cfg.scale, 1.0);
    }

    #[test]
    fn preset_json_roundtrips_mode_name() {
        let cfg = EffectConfig {
            mode: DisplayMode::Msx1,
            ..EffectConfig::default()
        };
        let json = cfg.to_json_pretty().unwrap();
        assert!(json.contains("\"MSX1\""));
        assert_eq!(EffectConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn bad_preset_is_serde_error() {
        let err = EffectConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CrtError::Serde(_)));
    }
}
