mod filter;
mod pipeline;
mod scrape;
mod store;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tourmap_core::TourStatus;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tourmap")]
#[command(about = "Scrape, enrich and geocode the tour listing for the tour map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the listing, enrich each tour, geocode, and write the output
    /// (the default when no command is given).
    Scrape(ScrapeArgs),
    /// Print the tours visible under a filter.
    Filter(FilterArgs),
}

#[derive(Debug, Default, Args)]
pub(crate) struct ScrapeArgs {
    /// Output file; defaults to `TOURMAP_OUTPUT_PATH`.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Listing page URL; defaults to `TOURMAP_LISTING_URL`.
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Delay after every detail fetch and geocode attempt.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Leave coordinates untouched even when a key is configured.
    #[arg(long)]
    pub skip_geocode: bool,

    /// Do not resume from the existing output.
    #[arg(long)]
    pub fresh: bool,
}

#[derive(Debug, Args)]
pub(crate) struct FilterArgs {
    /// Tours file to read; defaults to `TOURMAP_OUTPUT_PATH`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Case-insensitive match against title and description.
    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long = "country")]
    pub countries: Vec<String>,

    #[arg(long = "state")]
    pub states: Vec<String>,

    /// all, completed, or incomplete.
    #[arg(long, default_value = "all")]
    pub status: TourStatus,

    #[arg(long = "type")]
    pub tour_type: Option<String>,

    /// List countries and their states instead of tours.
    #[arg(long)]
    pub facets: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = tourmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let result = match cli.command {
        Some(Commands::Scrape(args)) => scrape::run_scrape(&config, &args).await,
        Some(Commands::Filter(args)) => filter::run_filter(&config, &args),
        None => scrape::run_scrape(&config, &ScrapeArgs::default()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "tourmap failed");
    }
    result
}

#[cfg(test)]
mod tests;
