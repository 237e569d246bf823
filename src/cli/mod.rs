mod cache_cmd;
mod config_cmd;
mod explain_cmd;
mod rank_cmd;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cache::CacheStore;
use crate::fetch::HttpFetcher;
use crate::models::{config, UserConfig};
use crate::pipeline::{RankReport, RankingPipeline};
use crate::scoring::ScoringWeights;

#[derive(Parser)]
#[command(name = "diffrank")]
#[command(about = "Rank coding problems by true difficulty", long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank problems, print the hardest and export the full list as CSV
    Rank(RankArgs),
    /// Show how a single problem's score is made up
    Explain {
        slug: String,
        #[arg(long)]
        refresh: bool,
    },
    /// Inspect or clear the local problem cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration to disk
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Default)]
pub struct RankArgs {
    /// Number of rows to print (defaults to the configured top_n)
    #[arg(long)]
    pub top: Option<usize>,

    /// CSV output path (defaults to the configured output_csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the CSV export
    #[arg(long)]
    pub no_export: bool,

    /// Ignore the cache and fetch fresh data
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Subcommand)]
pub enum CacheAction {
    Status,
    Clear,
}

pub fn run(cli: Cli) {
    match cli.command {
        None => rank_cmd::rank(RankArgs::default()),
        Some(Commands::Rank(args)) => rank_cmd::rank(args),
        Some(Commands::Explain { slug, refresh }) => explain_cmd::explain(&slug, refresh),
        Some(Commands::Cache { action }) => cache_cmd::handle_cache(action),
        Some(Commands::Config { init }) => config_cmd::handle_config(init),
    }
}

fn load_valid_config() -> UserConfig {
    let user_config = config::load_config();
    if let Err(e) = user_config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    user_config
}

fn cache_store(user_config: &UserConfig) -> CacheStore {
    CacheStore::new(user_config.cache_path.clone(), user_config.cache_expiry())
}

fn run_pipeline(user_config: &UserConfig, weights: ScoringWeights, refresh: bool) -> RankReport {
    if let Err(e) = weights.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let cache = cache_store(user_config);
    let fetcher = match HttpFetcher::new(&user_config.fetch) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match RankingPipeline::new(&cache, &fetcher, weights)
        .refresh(refresh)
        .rank()
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}. Exiting.", e);
            std::process::exit(1);
        }
    }
}
