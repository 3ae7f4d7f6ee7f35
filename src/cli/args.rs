use clap::Parser;
use std::path::PathBuf;

/// Render a grid of Julia sets, then build an HTML gallery and a GIF of the frames.
/// With no arguments, renders the default 20x20 grid into the current directory.
#[derive(Debug, Parser, Default)]
#[clap(author, version, about)]
pub struct JuliaGridArgs {
    /// JSON parameter file; any field left out keeps its default.
    pub params_path: Option<String>,

    /// Write all output under this directory instead of the one in the params.
    #[clap(long, short)]
    pub output_directory: Option<PathBuf>,

    /// Seed for the shared color style, for reproducible renders.
    #[clap(long, short)]
    pub seed: Option<u64>,
}
