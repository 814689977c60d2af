use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_kle;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kle2svg", version, about = "Render keyboard-layout-editor layouts to SVG")]
pub struct Args {
    /// Input KLE file(s) (raw data or JSON), or '-' for stdin
    #[arg(short = 'i', long = "input", num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for a single SVG.
    /// With several inputs, a directory or a file stem to number.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, keyboard geometry, key defaults)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write the computed key geometry as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// PNG width hint
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// PNG height hint
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    if args.inputs.len() <= 1 {
        let input = args.inputs.first().map(PathBuf::as_path);
        let output = match args.output_format {
            OutputFormat::Svg => args.output.clone(),
            OutputFormat::Png => Some(ensure_output(&args.output, "png")?),
        };
        return convert(
            input,
            output.as_deref(),
            args.output_format,
            &config,
            args.dump_layout.as_deref(),
        );
    }

    anyhow::ensure!(
        args.dump_layout.is_none(),
        "--dumpLayout takes a single input"
    );
    let outputs =
        resolve_multi_outputs(args.output.as_deref(), args.output_format, args.inputs.len())?;
    for (input, output) in args.inputs.iter().zip(&outputs) {
        convert(Some(input), Some(output), args.output_format, &config, None)
            .with_context(|| format!("failed to render {}", input.display()))?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn convert(
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    config: &Config,
    dump: Option<&Path>,
) -> Result<()> {
    let source = read_input(input)?;
    let parsed = parse_kle(&source, &config.keys)?;
    if !parsed.ignored.is_empty() {
        tracing::info!(properties = ?parsed.ignored, "some KLE properties were not applied");
    }
    let drawing = compute_layout(&parsed.keyboard, &config.theme, &config.layout)?;
    if let Some(path) = dump {
        write_layout_dump(path, &drawing, &parsed.keyboard)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
    }
    let svg = render_svg(&drawing);
    match format {
        OutputFormat::Svg => write_output_svg(&svg, output),
        OutputFormat::Png => {
            let output = output.context("Output path required for png output")?;
            write_png(&svg, output, config)
        }
    }
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
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

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multiple inputs"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| base.join(format!("keyboard-{}.{}", idx + 1, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("keyboard");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| parent.join(format!("{}-{}.{}", stem, idx + 1, ext)))
        .collect())
}
