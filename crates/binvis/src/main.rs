//! Command‑line entry point for the `binvis` tool.

use std::{path::PathBuf, process};

use anyhow::Result;
use binvis::{
    BlockOverride, ColorMode, Layout, RenderConfig, cmd,
    config::{self, DEFAULT_CURVE, DEFAULT_SIZE},
};
use clap::Parser;
use log::{LevelFilter, debug};
use spacecurve::registry;

/// Validate a curve name against the known set.
fn parse_curve_name(s: &str) -> Result<String, String> {
    if registry::CURVE_NAMES.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "Invalid curve name '{}'. Valid options: {}",
            s,
            registry::CURVE_NAMES.join(", ")
        ))
    }
}

/// Parse a colour policy name.
fn parse_color_mode(s: &str) -> Result<ColorMode, String> {
    s.parse().map_err(|e: binvis::Error| e.to_string())
}

/// Parse a layout name.
fn parse_layout(s: &str) -> Result<Layout, String> {
    s.parse().map_err(|e: binvis::Error| e.to_string())
}

/// Parse a `START:END[:COLOR]` block specification.
fn parse_block(s: &str) -> Result<BlockOverride, String> {
    s.parse().map_err(|e: binvis::Error| e.to_string())
}

#[derive(Parser)]
#[command(name = "binvis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Visualise a binary file by laying its bytes out along a space-filling curve")]
/// Command-line options.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    #[arg(
        short = 'b',
        long = "block",
        value_name = "START:END[:COLOR]",
        value_parser = parse_block,
        help = "Mark a block of data with a colour; hex offsets, colour defaults to red"
    )]
    /// Optional highlighted byte range.
    block: Option<BlockOverride>,

    #[arg(
        short = 'c',
        long = "color",
        value_parser = parse_color_mode,
        default_value = "class",
        help = "Colour policy (class, hilbert, entropy, gradient)"
    )]
    /// Colour policy.
    color: ColorMode,

    #[arg(
        short = 'm',
        long = "map",
        value_parser = parse_curve_name,
        default_value = DEFAULT_CURVE,
        help = &format!("Pixel layout map (options: {})", registry::CURVE_NAMES.join(", "))
    )]
    /// Curve used to lay out pixels.
    map: String,

    #[arg(
        short = 'n',
        long = "namesuffix",
        default_value = "",
        help = "Suffix appended to generated output file names"
    )]
    /// Suffix for derived output names.
    name_suffix: String,

    #[arg(short = 'p', long = "progress", help = "Show a progress bar")]
    /// Show a progress bar.
    progress: bool,

    #[arg(
        short = 's',
        long = "size",
        default_value_t = DEFAULT_SIZE,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Side length of one square, in pixels"
    )]
    /// Side length of one square.
    size: u32,

    #[arg(
        short = 't',
        long = "type",
        value_parser = parse_layout,
        default_value = "unrolled",
        help = "Image type (unrolled, square)"
    )]
    /// Canvas layout.
    layout: Layout,

    #[arg(help = "File to visualise")]
    /// Input file.
    input: PathBuf,

    #[arg(help = "Output PNG path; defaults to the input's base name with a .png extension")]
    /// Optional output path.
    output: Option<PathBuf>,
}

/// Map `-v` occurrences onto a log level.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Resolve paths and run the render.
fn handle(cli: Cli) -> Result<()> {
    let output = config::resolve_output(&cli.input, cli.output.as_deref(), &cli.name_suffix)?;
    let config = RenderConfig {
        color: cli.color,
        curve: cli.map,
        size: cli.size,
        layout: cli.layout,
        block: cli.block,
        progress: cli.progress,
        replace_output: cli.output.is_some(),
    };
    debug!("{config:?}");
    cmd::run(&config, &cli.input, &output)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level_for(cli.v))
        .parse_default_env()
        .init();

    if let Err(e) = handle(cli) {
        eprintln!("binvis: {e}");
        process::exit(1);
    }
}
