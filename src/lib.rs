#![forbid(unsafe_code)]

pub mod blur_cpu;
pub mod composite_cpu;
pub mod config;
pub mod decode;
pub mod enhance;
pub mod error;
pub mod letterbox;
pub mod normalize;
pub mod pipeline;
pub mod resample;
pub mod scanline;
pub mod subpixel;
pub mod upscale;

pub use blur_cpu::bleed_horizontal;
pub use config::{CANONICAL_WIDTH, DisplayMode, EffectConfig};
pub use decode::{decode_rgb, open_rgb, save_rgb};
pub use error::{CrtError, CrtResult};
pub use letterbox::{composite, margin_size};
pub use normalize::normalize;
pub use pipeline::render;
pub use scanline::{darken_even_rows, scanline_background};
pub use subpixel::decompose;
pub use upscale::{CRT_ANCHOR_WIDTH, Upscaled, upscale};
