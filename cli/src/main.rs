use std::fs;
use std::io::{self, Read};

use canvas::config::{EditorConfig, Variant};
use canvas::doc::{ShapeKind, ShapeRecord, ShapeStore};
use canvas::engine::EngineCore;
use canvas::formula::{legend_line, parse_floor_count};
use canvas::input::Tool;
use canvas::render::{RenderParams, redraw};
use canvas::surface::{DrawOp, RecordingSurface, SurfaceError};
use canvas::tools::strategy;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("could not read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid record on line {line}: {source}")]
    Record { line: usize, source: serde_json::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

#[derive(Parser, Debug)]
#[command(name = "predim", about = "Blueprint annotation labels and replay")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tool identifiers offered by a variant.
    Tools {
        #[arg(long, value_enum, default_value_t = VariantArg::Parametric)]
        variant: VariantArg,
    },
    /// Print the parametric labels of every record.
    Labels(LabelsArgs),
    /// Print the freehand legend lines.
    Legend(LegendArgs),
    /// Print the display list a full redraw produces.
    Replay(ReplayArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Parametric,
    Freehand,
}

impl From<VariantArg> for Variant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Parametric => Self::Parametric,
            VariantArg::Freehand => Self::Freehand,
        }
    }
}

#[derive(Args, Debug)]
struct LabelsArgs {
    #[arg(default_value = "-", help = "Records file (JSON array or JSONL), or - for stdin")]
    input: String,

    #[arg(long, env = "PREDIM_FLOORS", default_value = "1", help = "Floor count, read like the page's number field")]
    floors: String,
}

#[derive(Args, Debug)]
struct LegendArgs {
    #[arg(default_value = "-", help = "Records file (JSON array or JSONL), or - for stdin")]
    input: String,

    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(default_value = "-", help = "Records file (JSON array or JSONL), or - for stdin")]
    input: String,

    #[arg(long, value_enum, default_value_t = VariantArg::Parametric)]
    variant: VariantArg,

    #[arg(long, env = "PREDIM_FLOORS", default_value = "1")]
    floors: String,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Tools { variant } => {
            for id in available_tools(variant.into()) {
                println!("{id}");
            }
            Ok(())
        }
        Command::Labels(args) => {
            let records = read_records(&args.input)?;
            for entry in label_report(&records, &args.floors) {
                println!("{}", serde_json::to_string(&entry)?);
            }
            Ok(())
        }
        Command::Legend(args) => {
            let records = read_records(&args.input)?;
            for line in legend_report(&records, args.dpr) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Replay(args) => {
            let records = read_records(&args.input)?;
            let ops = replay(records, &args)?;
            println!("{}", serde_json::to_string_pretty(&ops)?);
            Ok(())
        }
    }
}

fn read_records(input: &str) -> Result<Vec<ShapeRecord>, CliError> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(input)
    }
    .map_err(|source| CliError::Read { path: input.to_owned(), source })?;

    let records = parse_records(&text)?;
    tracing::info!(count = records.len(), input, "loaded records");
    Ok(records)
}

/// Records from a JSON array, or one JSON object per line. Blank lines are skipped.
fn parse_records(text: &str) -> Result<Vec<ShapeRecord>, CliError> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| CliError::Record { line: index + 1, source })?;
        records.push(record);
    }
    Ok(records)
}

/// Tool identifiers the editor accepts for `variant`, in tool-bar order.
fn available_tools(variant: Variant) -> Vec<&'static str> {
    let mut core = EngineCore::new(RecordingSurface::default(), EditorConfig::for_variant(variant));
    ShapeKind::ALL
        .iter()
        .map(|kind| Tool::Shape(*kind))
        .chain(std::iter::once(Tool::Eraser))
        .filter(|tool| core.set_tool(tool.id()).is_ok())
        .map(Tool::id)
        .collect()
}

fn label_report(records: &[ShapeRecord], floors: &str) -> Vec<Value> {
    let floors = parse_floor_count(floors);
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let labels: Vec<String> = strategy(record.kind)
                .labels(record, floors)
                .into_iter()
                .map(|label| label.text)
                .collect();
            json!({ "index": index, "kind": record.kind.id(), "labels": labels })
        })
        .collect()
}

fn legend_report(records: &[ShapeRecord], device_pixel_ratio: f64) -> Vec<String> {
    records
        .iter()
        .map(|record| legend_line(record.rect(), device_pixel_ratio))
        .collect()
}

fn replay(records: Vec<ShapeRecord>, args: &ReplayArgs) -> Result<Vec<DrawOp>, CliError> {
    let mut store = ShapeStore::new();
    store.load(records);
    let config = EditorConfig::for_variant(args.variant.into());
    let params = RenderParams {
        variant: config.variant,
        floors: parse_floor_count(&args.floors),
        font: &config.label_font,
        device_pixel_ratio: args.dpr,
    };

    let mut surface = RecordingSurface::new(args.width, args.height);
    redraw(&mut surface, None, &store, &params)?;
    tracing::debug!(ops = surface.ops().len(), "replayed");
    Ok(surface.ops().to_vec())
}
