mod app;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skill_constellation::config::ViewerConfig;
use skill_constellation::engine::LayoutKind;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, help = "JSON file with skill nodes; a sample constellation is shown without one")]
    nodes: Option<PathBuf>,
    #[arg(long, default_value_t = 14)]
    sample_size: usize,
    #[arg(long, value_enum)]
    layout: Option<LayoutKind>,
    #[arg(long, help = "TOML viewer configuration")]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path).context("failed to load viewer configuration")?,
        None => ViewerConfig::default(),
    };
    if let Some(layout) = args.layout {
        config.layout = layout;
    }

    let source = match args.nodes {
        Some(path) => app::NodeSource::File(path),
        None => app::NodeSource::Sample {
            count: args.sample_size,
        },
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Skill constellation",
        options,
        Box::new(move |cc| Ok(Box::new(app::SkillMapApp::new(cc, source, config)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
