use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "atelier", version)]
struct Cli {
    /// Log state transitions (debug level) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay inputs against the site and print its visual state as JSON.
    Snapshot(SnapshotArgs),
    /// Render the ripple filter over an image.
    Ripple(RippleArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Site configuration JSON. Defaults to the stock site.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Timed input events (JSON array).
    #[arg(long)]
    script: Option<PathBuf>,

    /// Virtual time to snapshot at, in milliseconds.
    #[arg(long)]
    at_ms: u64,

    /// Write the snapshot here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RippleArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(long)]
    out: PathBuf,

    /// Animation frame counter driving the breathing term.
    #[arg(long, default_value_t = 0.0)]
    frames: f64,

    /// Normalized pointer position as `x,y`.
    #[arg(long, value_parser = parse_pointer, default_value = "0.5,0.5")]
    pointer: atelier::Point,

    /// Maximum displacement in pixels.
    #[arg(long)]
    scale: Option<f64>,
}

fn parse_pointer(s: &str) -> Result<atelier::Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err("pointer coordinates must be finite".to_string());
    }
    Ok(atelier::Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Ripple(args) => cmd_ripple(args),
    }
}

fn read_script(path: &Path) -> anyhow::Result<atelier::Script> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let script = atelier::Script::from_json_str(&s)
        .with_context(|| format!("parse script '{}'", path.display()))?;
    Ok(script)
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let config = match &args.in_path {
        Some(p) => atelier::SiteConfig::load(p)?,
        None => atelier::SiteConfig::default(),
    };
    let mut runtime = atelier::SiteRuntime::new(config)?;

    let until = atelier::TimeMs(args.at_ms);
    match &args.script {
        Some(p) => runtime.run_script(&read_script(p)?, until)?,
        None => runtime.advance_to(until)?,
    }
    let json = runtime.snapshot().to_json_pretty()?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("write snapshot '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_ripple(args: RippleArgs) -> anyhow::Result<()> {
    let pointer = atelier::Point::new(args.pointer.x.clamp(0.0, 1.0), args.pointer.y.clamp(0.0, 1.0));
    let params = atelier::turbulence_params(args.frames, pointer);
    let mut filter = atelier::DisplacementFilter::default();
    if let Some(scale) = args.scale {
        anyhow::ensure!(scale.is_finite(), "scale must be finite");
        filter.scale = scale;
    }

    atelier::render_ripple_file(&args.image, &args.out, params, &filter)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
