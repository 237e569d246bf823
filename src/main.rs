mod cache;
mod cli;
mod display;
mod error;
mod export;
mod fetch;
mod models;
mod normalize;
mod pipeline;
mod scoring;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    cli::run(cli);
}

fn init_tracing(cli: &Cli) {
    let default_directive = if cli.verbose {
        "diffrank=debug"
    } else if cli.quiet {
        "diffrank=warn"
    } else {
        "diffrank=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
