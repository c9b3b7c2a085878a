//! Tour detail pages: label scanning and the sequential enrichment pass.

use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};
use tourmap_core::tour::merge_text;
use tourmap_core::{normalize_text, TourRecord};

use crate::error::ScraperError;
use crate::source::DocumentSource;

const START_LABEL: &str = "Start: ";
const LOCATION_LABEL: &str = "Location: ";

static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid span selector"));

/// Fields read from a tour detail page. Empty means not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourDetail {
    pub start: String,
    pub location: String,
}

/// Scans the page's `span` elements for `Start: ` and `Location: ` labels.
///
/// The first occurrence of each label wins.
#[must_use]
pub fn parse_tour_detail(html: &str) -> TourDetail {
    let document = Html::parse_document(html);
    let mut detail = TourDetail::default();

    for span in document.select(&SPAN) {
        let text = normalize_text(&span.text().collect::<String>());
        if detail.location.is_empty() {
            if let Some(rest) = text.strip_prefix(LOCATION_LABEL) {
                detail.location = normalize_text(rest);
            }
        }
        if detail.start.is_empty() {
            if let Some(rest) = text.strip_prefix(START_LABEL) {
                detail.start = normalize_text(rest);
            }
        }
        if !detail.start.is_empty() && !detail.location.is_empty() {
            break;
        }
    }

    detail
}

/// Counters for one detail enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailStats {
    /// Records with a URL, i.e. pages visited.
    pub attempted: usize,
    pub found_start: usize,
    pub found_location: usize,
    /// Pages that returned non-2xx or failed in transport.
    pub failed: usize,
}

/// Visits each tour's detail page, one at a time, and merges `start` and
/// `location` into the record.
///
/// Records without a URL are skipped and not counted. A failed page is
/// logged and skipped; it never aborts the pass. `delay` is slept after
/// every visit regardless of outcome.
pub async fn enrich_tour_details<S: DocumentSource>(
    source: &S,
    tours: &mut [TourRecord],
    delay: Duration,
) -> DetailStats {
    let total = tours.iter().filter(|t| t.has_url()).count();
    let mut stats = DetailStats::default();
    tracing::info!(total, "visiting {total} tour pages to extract start/location");

    for tour in tours.iter_mut().filter(|t| t.has_url()) {
        stats.attempted += 1;
        let index = stats.attempted;
        let url = tour.url.trim().to_owned();
        tracing::info!(index, total, url = %url, "[{index}/{total}] fetching tour page");

        match source.fetch_document(&url).await {
            Ok(html) => {
                let detail = parse_tour_detail(&html);
                if !detail.start.is_empty() {
                    merge_text(&mut tour.details.start, &detail.start);
                    stats.found_start += 1;
                }
                if !detail.location.is_empty() {
                    merge_text(&mut tour.details.location, &detail.location);
                    stats.found_location += 1;
                }
            }
            Err(ScraperError::UnexpectedStatus { status, .. }) => {
                stats.failed += 1;
                tracing::warn!(index, total, status, url = %url, "[{index}/{total}] HTTP {status} for {url}");
            }
            Err(err) => {
                stats.failed += 1;
                tracing::warn!(index, total, url = %url, error = %err, "[{index}/{total}] ERROR {url}: {err}");
            }
        }

        tokio::time::sleep(delay).await;
    }

    tracing::info!(
        found_start = stats.found_start,
        found_location = stats.found_location,
        failed = stats.failed,
        "detail extraction complete: start={}, location={}",
        stats.found_start,
        stats.found_location
    );
    stats
}
