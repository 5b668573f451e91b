//! Application entry point for the dendrite graph viewer.
//!
//! Sets up logging, loads graph data and optional config overrides,
//! then hands everything to [`Viewer`] running under eframe.

mod sample;
mod viewer;

use anyhow::Context as _;
use clap::Parser;
use dendrite_core::config::ConfigOverrides;
use dendrite_core::node::GraphData;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use viewer::Viewer;

/// Command line options for the viewer.
#[derive(Debug, Parser)]
#[command(
    name = "dendrite-view",
    about = "Force-directed graph viewer with pseudo-3D depth and parallax"
)]
struct Args {
    /// Graph data file (JSON). Wins over `--nodes`.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Engine config overrides file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generate a random demo graph with this many nodes instead of the
    /// built-in study plan.
    #[arg(long)]
    nodes: Option<usize>,

    /// Seed for the generated demo graph.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn load_graph(args: &Args) -> anyhow::Result<GraphData> {
    if let Some(path) = &args.graph {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading graph file {}", path.display()))?;
        let data: GraphData = serde_json::from_str(&raw)
            .with_context(|| format!("parsing graph file {}", path.display()))?;
        return Ok(data);
    }
    if let Some(count) = args.nodes {
        let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
        return Ok(sample::random_graph(count, &mut rng));
    }
    Ok(sample::study_plan())
}

fn load_overrides(path: &Path) -> anyhow::Result<ConfigOverrides> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let overrides = toml::from_str(&raw)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(overrides)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let data = load_graph(&args)?;

    // A broken overrides file falls back to defaults instead of failing
    // startup.
    let overrides = match &args.config {
        Some(path) => match load_overrides(path) {
            Ok(overrides) => overrides,
            Err(error) => {
                warn!(error = %format!("{error:#}"), "ignoring config overrides");
                ConfigOverrides::default()
            }
        },
        None => ConfigOverrides::default(),
    };
    let physics = overrides.physics.resolve();
    let visual = overrides.visual.resolve();
    let parallax = overrides.parallax.resolve();

    info!(
        nodes = data.nodes.len(),
        links = data.links.len(),
        "starting viewer"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 800.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Dendrite",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(data, physics, visual, parallax)))),
    )
    .map_err(|error| anyhow::anyhow!("running the viewer: {error}"))
}
