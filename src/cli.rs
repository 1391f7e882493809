use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::{layout_dump_json, write_layout_dump};
use crate::parser::parse_question_table;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dflow", version, about = "Decision-tree quiz flowchart renderer")]
pub struct Args {
    /// Question table (.json, .json5 or outline text) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, flowchart)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Override the root question id
    #[arg(long = "root")]
    pub root: Option<String>,

    /// Raster width for PNG output
    #[arg(short = 'w', long = "width", default_value_t = 1300.0)]
    pub width: f32,

    /// Raster height for PNG output
    #[arg(short = 'H', long = "height", default_value_t = 900.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    let input = read_input(args.input.as_deref())?;
    let mut table = parse_question_table(&input)?;
    if let Some(root) = args.root {
        table.root = root;
    }

    let layout = compute_layout(&table, &config.layout);
    if let Some(fallback) = &layout.fallback {
        tracing::warn!(fallback = %fallback.message, root = %table.root, "nothing reachable from root");
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout)?,
            None => println!("{}", layout_dump_json(&layout)?),
        },
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&layout, &config, &output)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(layout: &crate::layout::Layout, config: &crate::config::Config, output: &Path) -> Result<()> {
    let svg = render_svg(layout, &config.theme, &config.layout);
    write_output_png(&svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &crate::layout::Layout, _config: &crate::config::Config, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
