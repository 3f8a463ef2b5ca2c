//! Metroscope - Metro Station CSV Analysis & Map Generator
//!
//! Batch pipeline: load the station CSV, profile it, clean the opening-date
//! column, compute grouped summaries, and render charts plus a station map.

use anyhow::Result;
use clap::{Parser, ValueHint};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use metroscope::charts::ChartRenderer;
use metroscope::data::{DateCleaner, StationLoader, COL_OPENING_DATE};
use metroscope::map::MapBuilder;
use metroscope::stats::{DensityEstimator, FrameProfiler, NetworkSummarizer};

#[derive(Parser, Debug)]
#[command(version, about = "Metro station CSV analysis & map generator", long_about = None)]
struct Cli {
    /// Station CSV export to analyse
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Directory receiving the rendered charts and the station map
    #[arg(short, long, default_value = "reports", value_hint = ValueHint::DirPath)]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    fs::create_dir_all(&cli.out_dir)?;

    info!("loading {}", cli.input.display());
    let mut df = StationLoader::load_csv(&cli.input)?;
    FrameProfiler::log_profile(&df);

    DateCleaner::clean(&mut df, COL_OPENING_DATE)?;

    let summary = NetworkSummarizer::summarize(&df)?;
    let distances = NetworkSummarizer::distances_by_layout(&df)?;
    let densities = DensityEstimator::curves_by_layout(&distances);

    ChartRenderer::render_all(&summary, &densities, &cli.out_dir)?;
    MapBuilder::write_html(&df, &cli.out_dir.join("stations_map.html"))?;

    info!("reports written to {}", cli.out_dir.display());
    Ok(())
}
