//! `tourmap scrape`: builds the HTTP clients from config, runs the pipeline
//! and writes the output.
//!
//! Nothing is written when the pipeline fails.

use std::time::Duration;

use anyhow::Context;
use tourmap_core::AppConfig;
use tourmap_geocode::GoogleGeocoder;
use tourmap_scraper::PageClient;

use crate::pipeline::{run_pipeline, PipelineOptions};
use crate::{store, ScrapeArgs};

pub(crate) async fn run_scrape(config: &AppConfig, args: &ScrapeArgs) -> anyhow::Result<()> {
    let output = args.output.as_ref().unwrap_or(&config.output_path);
    let listing_url = args.listing_url.as_ref().unwrap_or(&config.listing_url);
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.request_delay_ms));

    let api_key = if args.skip_geocode {
        tracing::info!("geocoding disabled by --skip-geocode");
        None
    } else {
        if let Some(key_tail) = config.api_key_tail() {
            tracing::info!(key_tail = %key_tail, "geocoding enabled");
        }
        config.google_maps_api_key.clone()
    };

    let pages = PageClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .context("failed to build page client")?;
    let geocoder = GoogleGeocoder::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.geocode_base_url,
    )
    .context("failed to build geocoding client")?;

    let prior = if args.fresh {
        tracing::info!("--fresh given; ignoring previous output");
        Vec::new()
    } else {
        store::load_prior_tours(output)
    };

    let options = PipelineOptions {
        listing_url: listing_url.clone(),
        delay,
        api_key,
    };
    let (tours, report) = run_pipeline(&pages, &geocoder, &prior, &options).await?;

    store::save_tours(output, &tours)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(
        path = %output.display(),
        count = tours.len(),
        "wrote {} tours to {}",
        tours.len(),
        output.display()
    );
    tracing::info!(
        listed = report.listed,
        resumed = report.resumed,
        "run complete: {}",
        report.summary()
    );
    Ok(())
}
