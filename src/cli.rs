use crate::config::{Settings, load_settings};
use crate::placement::Placement;
use crate::render::{render_svg, write_output};
use crate::scenario::{Scenario, parse_scenario};
use crate::search::{LastResort, Strategy};
use crate::theme::Theme;
use crate::trace::write_trace;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pplace", version, about = "Solve floating panel placements")]
pub struct Args {
    /// Scenario file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Settings file that replaces the scenario's settings
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Placement to request instead of the configured one
    #[arg(short = 'p', long = "position")]
    pub position: Option<String>,

    /// Retry strategy
    #[arg(long = "prefer", value_enum)]
    pub prefer: Option<PreferArg>,

    /// Maximum number of retries
    #[arg(long = "maxSearchDepth")]
    pub max_search_depth: Option<u32>,

    /// Placement forced once retries run out
    #[arg(long = "lastResort")]
    pub last_resort: Option<String>,

    /// Skip the search and use the requested placement
    #[arg(long = "forcePosition")]
    pub force_position: bool,

    /// Write a JSON trace of every attempt
    #[arg(long = "trace")]
    pub trace: Option<PathBuf>,

    /// Preview theme (light or dark)
    #[arg(long = "theme", default_value = "light")]
    pub theme: String,

    /// Log search steps to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PreferArg {
    Opposite,
    Adjacent,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let input = read_input(args.input.as_deref())?;
    let mut scenario = parse_scenario(&input).context("failed to parse scenario")?;
    apply_config_file(&mut scenario, args.config.as_deref())?;
    apply_overrides(&mut scenario, &args)?;
    scenario.settings.validate()?;

    let (surface, report) = scenario.run()?;
    if let Some(path) = args.trace.as_deref() {
        let requested = scenario.requested.unwrap_or(scenario.settings.position);
        write_trace(path, &report, &scenario.settings, requested)?;
    }

    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report.result())?;
            write_output(&format!("{json}\n"), args.output.as_deref())?;
        }
        OutputFormat::Svg => {
            let svg = render_svg(&surface, &report, &resolve_theme(&args.theme)?);
            write_output(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&surface, &report, &args)?,
    }

    if !report.is_placed() {
        tracing::info!("Panel left hidden");
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn apply_config_file(scenario: &mut Scenario, path: Option<&Path>) -> Result<()> {
    if path.is_some() {
        scenario.settings = load_settings(path)?;
    }
    Ok(())
}

fn apply_overrides(scenario: &mut Scenario, args: &Args) -> Result<()> {
    let settings: &mut Settings = &mut scenario.settings;
    if let Some(position) = args.position.as_deref() {
        scenario.requested = Some(position.parse::<Placement>()?);
    }
    if let Some(prefer) = args.prefer {
        settings.prefer = match prefer {
            PreferArg::Opposite => Strategy::Opposite,
            PreferArg::Adjacent => Strategy::Adjacent,
        };
    }
    if let Some(depth) = args.max_search_depth {
        settings.max_search_depth = depth;
    }
    if let Some(last_resort) = args.last_resort.as_deref() {
        settings.last_resort = match last_resort {
            "false" => LastResort::Disabled,
            "true" => LastResort::Current,
            name => LastResort::Fixed(name.parse()?),
        };
    }
    if args.force_position {
        settings.force_position = true;
    }
    Ok(())
}

fn resolve_theme(name: &str) -> Result<Theme> {
    Theme::by_name(name).ok_or_else(|| anyhow::anyhow!("Unknown theme {name:?}"))
}

#[cfg(feature = "png")]
fn write_png(
    surface: &crate::memory::MemorySurface,
    report: &crate::positioner::PositionReport,
    args: &Args,
) -> Result<()> {
    let theme = resolve_theme(&args.theme)?;
    let output = ensure_output(&args.output, "png")?;
    let svg = render_svg(surface, report, &theme);
    crate::render::write_output_png(&svg, &output, &theme)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _surface: &crate::memory::MemorySurface,
    _report: &crate::positioner::PositionReport,
    _args: &Args,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
