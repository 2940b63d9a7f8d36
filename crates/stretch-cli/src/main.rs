//! stretch - three-segment piecewise-linear contrast stretching
//!
//! Reads a grayscale (or colour, reduced to luma) image, maps every pixel
//! through the curve defined by `r1, r2, s1, s2`, and writes an 8-bit PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "stretch")]
#[command(author, version, about = "Three-segment piecewise contrast stretching")]
#[command(long_about = "
Maps each input intensity u through

  f(u) = alpha * u              u <  r1
  f(u) = beta * (u - r1) + s1   r1 <= u < r2
  f(u) = gamma * (u - r2) + s2  u >= r2

and clamps the result to [0, 255].

Examples:
  stretch apply photo.jpg -o enhanced_image.png
  stretch apply scan.png -o out.png --r1 50 --r2 180 --s1 10 --s2 240
  stretch apply scan.png -o out.png --preset shadows.yaml --s2 220
  stretch slopes --r1 70 --r2 140 --s1 30 --s2 200
  stretch inspect photo.jpg -x 2 -y 7
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Stretch an image and write the result as PNG
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Show the slopes and curve segments for a set of breakpoints
    #[command(visible_alias = "s")]
    Slopes(SlopesArgs),

    /// Print input/output pixel grids and one pixel's before/after values
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

/// Breakpoints shared by every command.
///
/// Flags override the preset; unset values fall back to 70/140/30/200.
#[derive(Args, Debug, Clone)]
struct CurveArgs {
    /// Lower input breakpoint (1-254)
    #[arg(long, allow_negative_numbers = true)]
    r1: Option<i32>,

    /// Upper input breakpoint (r1+1 - 255)
    #[arg(long, allow_negative_numbers = true)]
    r2: Option<i32>,

    /// Output level at r1 (0-255)
    #[arg(long, allow_negative_numbers = true)]
    s1: Option<i32>,

    /// Output level at r2 (0-255)
    #[arg(long, allow_negative_numbers = true)]
    s2: Option<i32>,

    /// YAML preset with name/r1/r2/s1/s2
    #[arg(short, long)]
    preset: Option<PathBuf>,
}

/// Arguments for the `apply` command.
#[derive(Args)]
struct ApplyArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "enhanced_image.png")]
    output: PathBuf,

    #[command(flatten)]
    curve: CurveArgs,
}

/// Arguments for the `slopes` command.
#[derive(Args)]
struct SlopesArgs {
    #[command(flatten)]
    curve: CurveArgs,
}

/// Arguments for the `inspect` command.
#[derive(Args)]
struct InspectArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Row of the selected pixel (top to bottom)
    #[arg(short, default_value = "5")]
    x: usize,

    /// Column of the selected pixel (left to right)
    #[arg(short, default_value = "5")]
    y: usize,

    /// Side length of the inspection window
    #[arg(short, long, default_value = "10")]
    grid: usize,

    #[command(flatten)]
    curve: CurveArgs,
}

/// Route tracing to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::Slopes(args) => commands::slopes::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
