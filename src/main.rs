use std::io;

use clap::Parser as _;
use tracing::debug;
use tracing::level_filters::LevelFilter;

use crate::app::App;
use crate::cli::{Cli, RuntimeConfig};

mod app;
mod cli;

fn main() -> anyhow::Result<()> {
    let cli_args = Cli::parse();
    setup_tracing(cli_args.log_level.into());
    debug!("Parsed CLI arguments: {cli_args:?}");

    let config = RuntimeConfig::from(cli_args);
    let stdin = io::stdin();
    let stdout = io::stdout();
    App::new(config).run(stdin.lock(), stdout.lock())
}

/// Diagnostics go to stderr so they never interleave with the prompt on stdout.
fn setup_tracing(filter: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
