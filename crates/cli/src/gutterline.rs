//! gutterline - Infer reading columns from detected page components
//!
//! Reads one or more page documents (`{"page": {...}, "components": [...]}`)
//! and writes the inferred region tree and column layout as JSON.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use gutterline_core::api::{PageInput, PageLayout, infer_layouts_with_threads};
use gutterline_core::params::{
    DEFAULT_CENTRALITY_WEIGHT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, DEFAULT_MIN_GAP_FACTOR,
    LayoutParams, UnitSource,
};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Which parts of the result to write.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
enum Emit {
    /// Ordered columns and snapped components (default)
    #[default]
    Layout,
    /// The region tree only
    Tree,
    /// Unit height, region tree and layout
    Both,
}

/// Infer reading columns from detected page components.
#[derive(Parser, Debug)]
#[command(name = "gutterline")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more page documents in JSON
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Partitioning options ===
    /// Minimum gutter width in page units (overrides --min-gap-factor)
    #[arg(long = "min-gap")]
    min_gap: Option<f64>,

    /// Minimum gutter width as a multiple of the unit height
    #[arg(long = "min-gap-factor", default_value_t = DEFAULT_MIN_GAP_FACTOR)]
    min_gap_factor: f64,

    /// Penalty for off-center gutters, from 0.0 to 1.0
    #[arg(short = 'W', long = "centrality-weight", default_value_t = DEFAULT_CENTRALITY_WEIGHT)]
    centrality_weight: f64,

    /// Maximum number of nodes in the region tree
    #[arg(long = "max-nodes", default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: usize,

    /// Maximum depth of the region tree
    #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    // === Unit height options ===
    /// Height of one text line in page units
    #[arg(short = 'u', long = "unit-height", conflicts_with = "unit_label")]
    unit_height: Option<f64>,

    /// Take the unit height from the first component with this type
    #[arg(short = 'l', long = "unit-label")]
    unit_label: Option<String>,

    /// Number of worker threads (default: all cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// What to write for each page
    #[arg(short = 'e', long, value_enum, default_value = "layout")]
    emit: Emit,

    /// Pretty-print the JSON output
    #[arg(short = 'p', long, action = ArgAction::SetTrue)]
    pretty: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build LayoutParams from command line arguments.
fn build_params(args: &Args) -> LayoutParams {
    let unit = match (args.unit_height, &args.unit_label) {
        (Some(h), _) => UnitSource::Explicit(h),
        (None, Some(label)) => UnitSource::Label(label.clone()),
        (None, None) => UnitSource::Estimate,
    };
    LayoutParams {
        min_gap_factor: args.min_gap_factor,
        min_gap: args.min_gap,
        centrality_weight: args.centrality_weight,
        unit,
        max_nodes: args.max_nodes,
        max_depth: args.max_depth,
    }
}

fn read_page(path: &Path) -> Result<PageInput> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn render(result: &PageLayout, emit: Emit) -> Result<Value> {
    let value = match emit {
        Emit::Layout => serde_json::to_value(&result.layout)?,
        Emit::Tree => serde_json::to_value(&result.tree)?,
        Emit::Both => json!({
            "unitHeight": result.unit_height,
            "tree": result.tree,
            "layout": result.layout,
        }),
    };
    Ok(value)
}

fn run(args: &Args) -> Result<()> {
    let params = build_params(args);
    let pages = args
        .files
        .iter()
        .map(|p| read_page(p))
        .collect::<Result<Vec<_>>>()?;

    let results = infer_layouts_with_threads(&pages, &params, args.threads)?;
    let mut docs = Vec::with_capacity(results.len());
    for (path, result) in args.files.iter().zip(results) {
        let layout = result.with_context(|| format!("error processing {}", path.display()))?;
        tracing::info!(
            file = %path.display(),
            columns = layout.layout.columns.len(),
            "page done"
        );
        docs.push(render(&layout, args.emit)?);
    }

    let doc = match docs.len() {
        0 => bail!("no input files"),
        1 => docs.remove(0),
        _ => Value::Array(docs),
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };
    if args.pretty {
        serde_json::to_writer_pretty(&mut output, &doc)?;
    } else {
        serde_json::to_writer(&mut output, &doc)?;
    }
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
