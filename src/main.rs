use anyhow::{Context, Result};
use bptload::{export, load, Bpt, LoaderConfig, YearLayout};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "bptload")]
#[command(about = "Load one year of BPT worksheets and report what was found")]
struct Cli {
    /// Year directory holding the dictionary and worksheet archives
    year_dir: PathBuf,

    /// YAML loader configuration (legacy years, dictionary schema, match policy)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also load the multi-part benchmark (county) data
    #[arg(long)]
    county: bool,

    /// Write the dictionary and every worksheet as Parquet under this directory
    #[arg(long)]
    parquet_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();

    // ─── 2) configuration ────────────────────────────────────────────
    let config = match &cli.config {
        Some(path) => LoaderConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LoaderConfig::default(),
    };
    let layout = YearLayout::resolve(&cli.year_dir, &config)
        .with_context(|| format!("resolving {}", cli.year_dir.display()))?;

    // ─── 3) load the bundle ──────────────────────────────────────────
    let bpt = Bpt::from_layout(layout.clone())
        .with_context(|| format!("loading BPT data from {}", cli.year_dir.display()))?;
    info!(
        year = %bpt.year(),
        dictionary_codes = bpt.dictionary().mapping().len(),
        "bundle loaded"
    );
    for (ws, sheet) in bpt.sheets() {
        info!(
            sheet = %ws,
            description = ws.description(),
            rows = sheet.num_rows(),
            columns = sheet.num_columns(),
            "sheet"
        );
    }

    // ─── 4) optional county data ─────────────────────────────────────
    if cli.county {
        let county = load::load_benchmark(&layout).context("loading county data")?;
        info!(
            rows = county.num_rows(),
            columns = county.num_columns(),
            "county data"
        );
    }

    // ─── 5) optional export ──────────────────────────────────────────
    if let Some(out) = &cli.parquet_out {
        let written = export::write_bundle_parquet(&bpt, out)
            .with_context(|| format!("writing parquet under {}", out.display()))?;
        info!(files = written.len(), out = %out.display(), "parquet written");
    }

    info!("all done");
    Ok(())
}
