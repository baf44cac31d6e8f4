//! Native desktop runner for the graphwalk visualizer.
//!
//! Run with: cargo run -p graphwalk-viz --features native -- [--step-ms 300]

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use eframe::{run_native, NativeOptions};
use graphwalk_engine::VisualizerConfig;
use graphwalk_viz::{GraphWalkApp, WINDOW_SIZE, WINDOW_TITLE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build weighted graphs and watch DFS, BFS, Dijkstra and Prim walk them.
#[derive(Parser, Debug)]
#[command(name = "graphwalk", version, about)]
struct Args {
    /// JSON config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delay between animation steps in milliseconds
    #[arg(long)]
    step_ms: Option<u64>,

    /// Replay the shortest-path tree when running Dijkstra
    #[arg(long)]
    animate_dijkstra: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("graphwalk=info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => VisualizerConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => VisualizerConfig::load().context("loading config")?,
    };
    if let Some(ms) = args.step_ms {
        config.step_interval_ms = ms;
    }
    if args.animate_dijkstra {
        config.animate_shortest_path_tree = true;
    }
    info!(
        step_ms = config.step_interval_ms,
        animate_dijkstra = config.animate_shortest_path_tree,
        "graphwalk_starting"
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(GraphWalkApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}
