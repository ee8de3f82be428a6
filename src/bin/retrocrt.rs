use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use retrocrt::{DisplayMode, EffectConfig};

/// Upscale pixel art with a simulated CRT look.
#[derive(Parser, Debug)]
#[command(name = "retrocrt", version, about, allow_negative_numbers = true)]
struct Cli {
    /// Input image (any format the `image` crate decodes).
    #[arg(required_unless_present = "dump_config")]
    input: Option<PathBuf>,

    /// Output image; the format follows the extension.
    #[arg(short, long, default_value = "_.png")]
    output: PathBuf,

    /// Final output scale, e.g. 2.8125 takes 192 lines to 1080. 0 skips scaling.
    #[arg(short, long)]
    scale: Option<f64>,

    /// Source display: MSX1, MSX2, anything else means FAMICOM.
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<DisplayMode>,

    /// Internal CRT width relative to the output width (0.625 = 400 / 640).
    #[arg(long, visible_alias = "cw")]
    crt_width_ratio: Option<f64>,

    /// Background colour for padding and margins.
    #[arg(long = "bg", num_args = 3, value_names = ["R", "G", "B"])]
    background_color: Option<Vec<u8>>,

    /// Add the horizontal overscan margin (597 base).
    #[arg(long)]
    hmargin: bool,

    /// Add the vertical margin (448 base).
    #[arg(long)]
    vmargin: bool,

    /// Horizontal bleed strength, 0.0 - 1.0.
    #[arg(long = "xblur")]
    x_blur_ratio: Option<f64>,

    /// Phosphor triad strength, 0.0 - 1.0.
    #[arg(long = "subpixel")]
    subpixel_effect_ratio: Option<f64>,

    /// Scanline strength, 0.0 - 1.0.
    #[arg(long = "scanline")]
    scan_line_ratio: Option<f64>,

    /// JSON preset used as the base configuration; explicit flags win.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit.
    #[arg(long)]
    dump_config: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_mode(s: &str) -> Result<DisplayMode, std::convert::Infallible> {
    Ok(DisplayMode::parse_lenient(s))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .context("an input image is required")?;
    let image = retrocrt::open_rgb(input)
        .with_context(|| format!("open image '{}'", input.display()))?;
    let out = retrocrt::render(&image, &config)?;
    retrocrt::save_rgb(&cli.output, &out)
        .with_context(|| format!("write image '{}'", cli.output.display()))?;

    eprintln!("wrote {}", cli.output.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Preset (or defaults), then explicit flags, then clamping.
fn resolve_config(cli: &Cli) -> anyhow::Result<EffectConfig> {
    let mut cfg = match &cli.preset {
        Some(path) => EffectConfig::from_json_path(path)
            .with_context(|| format!("load preset '{}'", path.display()))?,
        None => EffectConfig::default(),
    };

    if let Some(scale) = cli.scale {
        cfg.scale = scale;
    }
    if let Some(mode) = cli.mode {
        cfg.mode = mode;
    }
    if let Some(r) = cli.crt_width_ratio {
        cfg.crt_width_ratio = r;
    }
    if let Some(bg) = &cli.background_color {
        cfg.background_color = <[u8; 3]>::try_from(bg.as_slice())
            .context("background colour needs exactly three values")?;
    }
    cfg.h_margin |= cli.hmargin;
    cfg.v_margin |= cli.vmargin;
    if let Some(r) = cli.x_blur_ratio {
        cfg.x_blur_ratio = r;
    }
    if let Some(r) = cli.subpixel_effect_ratio {
        cfg.subpixel_effect_ratio = r;
    }
    if let Some(r) = cli.scan_line_ratio {
        cfg.scan_line_ratio = r;
    }

    Ok(cfg.clamped())
}
