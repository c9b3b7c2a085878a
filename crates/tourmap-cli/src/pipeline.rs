//! Orchestrator: listing → resume → details → geocode → sort.
//!
//! Only the listing fetch is fatal. Every later failure is absorbed and
//! counted by the stage it occurs in.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use tourmap_core::{normalize_text, sort_by_title, TourRecord};
use tourmap_geocode::{resolve_geocodes, GeocodeStats, Geocoder};
use tourmap_scraper::{enrich_tour_details, parse_listing, DetailStats, DocumentSource};

/// Inputs for one pipeline run.
#[derive(Debug, Clone)]
pub(crate) struct PipelineOptions {
    pub listing_url: String,
    /// Slept after every detail fetch and every geocode attempt.
    pub delay: Duration,
    /// `None` disables geocoding.
    pub api_key: Option<String>,
}

/// Per-stage counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PipelineReport {
    pub listed: usize,
    /// Stubs matched by title to a record from the previous output.
    pub resumed: usize,
    pub details: DetailStats,
    pub geocode: GeocodeStats,
}

impl PipelineReport {
    pub(crate) fn summary(&self) -> String {
        let geocode = if self.geocode.disabled {
            "geocode=skipped".to_owned()
        } else {
            format!(
                "geocode ok={} zero={} status={} errors={} already={}",
                self.geocode.ok,
                self.geocode.zero,
                self.geocode.status_err,
                self.geocode.caught_err,
                self.geocode.already_geocoded
            )
        };
        format!(
            "listed={} resumed={} | details start={} location={} failed={} | {geocode}",
            self.listed,
            self.resumed,
            self.details.found_start,
            self.details.found_location,
            self.details.failed
        )
    }
}

/// Runs every stage and returns the sorted records.
///
/// `prior` is the output of a previous run; matching records (by normalized
/// title) lend their resolved fields to the fresh stubs.
///
/// # Errors
///
/// Returns an error only if the listing page cannot be fetched.
pub(crate) async fn run_pipeline<D: DocumentSource, G: Geocoder>(
    source: &D,
    geocoder: &G,
    prior: &[TourRecord],
    options: &PipelineOptions,
) -> anyhow::Result<(Vec<TourRecord>, PipelineReport)> {
    let mut report = PipelineReport::default();

    tracing::info!(url = %options.listing_url, "fetching tour listing");
    let html = source
        .fetch_document(&options.listing_url)
        .await
        .with_context(|| format!("failed to fetch tour listing {}", options.listing_url))?;

    let mut tours = parse_listing(&html, &options.listing_url);
    report.listed = tours.len();
    tracing::info!(count = tours.len(), "found {} tours on listing page", tours.len());

    report.resumed = absorb_prior(&mut tours, prior);
    if !prior.is_empty() {
        tracing::info!(resumed = report.resumed, prior = prior.len(), "resumed {} tours from previous output", report.resumed);
    }

    report.details = enrich_tour_details(source, &mut tours, options.delay).await;
    report.geocode =
        resolve_geocodes(geocoder, &mut tours, options.api_key.as_deref(), options.delay).await;

    sort_by_title(&mut tours);
    Ok((tours, report))
}

/// Fills each stub from the prior record with the same normalized title.
///
/// The first prior record for a title wins. Returns the number of stubs
/// matched.
fn absorb_prior(tours: &mut [TourRecord], prior: &[TourRecord]) -> usize {
    let mut by_title: HashMap<String, &TourRecord> = HashMap::with_capacity(prior.len());
    for record in prior {
        let key = normalize_text(&record.title);
        if !key.is_empty() {
            by_title.entry(key).or_insert(record);
        }
    }

    let mut matched = 0;
    for tour in tours.iter_mut() {
        if let Some(previous) = by_title.get(&normalize_text(&tour.title)) {
            tour.absorb_previous(previous);
            matched += 1;
        }
    }
    matched
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
