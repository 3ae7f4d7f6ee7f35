use anyhow::Context as _;
use clap::Parser;

use juliart_grid::{
    cli::{
        args::JuliaGridArgs,
        render::{load_params, render_grid},
    },
    fractals::julia::JuliaSetGenerator,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let args = JuliaGridArgs::parse();
    let params = load_params(&args).context("unable to load grid parameters")?;

    let summary = render_grid(&params, &JuliaSetGenerator).context("grid render failed")?;
    tracing::info!(
        "Rendered {} frames; gallery at {}",
        summary.frames.len(),
        summary.index_path.display()
    );
    Ok(())
}
