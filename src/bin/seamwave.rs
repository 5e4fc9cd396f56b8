use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use seamwave::{
    BackendKind, EnvMotion, Fps, FrameIndex, FrameRange, MotionPrefs, RenderSettings,
    RenderThreading, StaticMotion, Strip, WaveDividerConfig, WaveVariant, build_strip,
    create_backend, render_frame, render_frames,
};

#[derive(Parser, Debug)]
#[command(name = "seamwave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of a divider as a PNG.
    Frame(FrameArgs),
    /// Render every frame of one full strip loop as numbered PNGs.
    Loop(LoopArgs),
}

#[derive(Args, Debug)]
struct StripArgs {
    /// Wave variant (hero, menu, events, findus, gallery, about).
    #[arg(long, required_unless_present = "config")]
    variant: Option<String>,

    /// Divider configuration as a JSON file, instead of the shape flags.
    #[arg(long, conflicts_with_all = ["variant", "fill", "height", "flip"])]
    config: Option<PathBuf>,

    /// Fill color as a hex string; defaults to the variant's section color.
    #[arg(long)]
    fill: Option<String>,

    /// Strip height in pixels.
    #[arg(long, default_value_t = 60)]
    height: u32,

    /// Strip width in pixels.
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Mirror the strip horizontally.
    #[arg(long)]
    flip: bool,

    /// Frames per second of the animation timeline.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Force the reduced-motion fallback (otherwise SEAMWAVE_REDUCED_MOTION
    /// is consulted).
    #[arg(long)]
    reduced_motion: bool,

    /// Background color to place under the strip, hex. Transparent if unset.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    strip: StripArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct LoopArgs {
    #[command(flatten)]
    strip: StripArgs,

    /// Output directory for frame_%04d.png files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Render frames on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for --parallel.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Loop(args) => cmd_loop(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<WaveDividerConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: WaveDividerConfig =
        serde_json::from_reader(r).with_context(|| "parse divider config JSON")?;
    Ok(config)
}

fn build_from_args(args: &StripArgs) -> anyhow::Result<(Strip, WaveVariant)> {
    let config = match &args.config {
        Some(path) => read_config_json(path)?,
        None => {
            let variant: WaveVariant = args
                .variant
                .as_deref()
                .context("--variant or --config is required")?
                .parse()?;
            let fill = args
                .fill
                .clone()
                .unwrap_or_else(|| variant.suggested_fill().to_string());
            WaveDividerConfig {
                fill,
                variant,
                height: args.height,
                flip_x: args.flip,
            }
        }
    };
    let variant = config.variant;
    let fps = Fps::new(args.fps, 1)?;

    let strip = if args.reduced_motion {
        build_strip(&config, args.width, fps, &StaticMotion(true))?
    } else {
        build_strip(&config, args.width, fps, &EnvMotion)?
    };
    Ok((strip, variant))
}

fn settings_from_args(args: &StripArgs) -> anyhow::Result<RenderSettings> {
    let clear_rgba = match &args.background {
        None => None,
        Some(hex) => {
            let c = seamwave::Rgba8Premul::parse_hex(hex)
                .with_context(|| format!("invalid --background color '{hex}'"))?;
            Some([c.r, c.g, c.b, c.a])
        }
    };
    Ok(RenderSettings { clear_rgba })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (strip, _) = build_from_args(&args.strip)?;
    let settings = settings_from_args(&args.strip)?;
    let mut backend = create_backend(BackendKind::Cpu, &settings)?;

    let frame = render_frame(&strip, FrameIndex(args.frame), backend.as_mut())?;

    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_loop(args: LoopArgs) -> anyhow::Result<()> {
    let (strip, variant) = build_from_args(&args.strip)?;
    let settings = settings_from_args(&args.strip)?;
    let mut backend = create_backend(BackendKind::Cpu, &settings)?;

    // One back-layer loop covers the slower of the two layers; the front
    // wraps several times within it.
    let total = if args.strip.reduced_motion || EnvMotion.reduced_motion() {
        1
    } else {
        strip.fps.secs_to_frames_floor(variant.speed().back_secs)
    };
    let range = FrameRange::new(FrameIndex(0), FrameIndex(total.max(1)))?;

    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let frames = render_frames(&strip, range, backend.as_mut(), &threading)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (i, frame) in frames.iter().enumerate() {
        let path = args.out_dir.join(format!("frame_{i:04}.png"));
        write_png(&path, frame)?;
    }
    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn write_png(path: &Path, frame: &seamwave::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
