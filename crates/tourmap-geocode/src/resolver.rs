//! The geocoding stage: walks each ungeocoded record's query ladder and
//! merges the first usable result.

use std::time::Duration;

use tourmap_core::app_config::key_tail;
use tourmap_core::TourRecord;

use crate::geocoder::Geocoder;
use crate::ladder::{query_ladder, QueryAttempt};
use crate::types::{GeocodeResponse, GeocodeStatus};

/// Counters for one geocoding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeocodeStats {
    /// Records with a title and no coordinates.
    pub eligible: usize,
    /// Records skipped because they already carry coordinates.
    pub already_geocoded: usize,
    pub ok: usize,
    /// Records whose every rung returned `ZERO_RESULTS`.
    pub zero: usize,
    pub status_err: usize,
    pub caught_err: usize,
    /// Total requests issued.
    pub attempts: usize,
    /// No credential was configured; nothing was attempted.
    pub disabled: bool,
}

enum LadderOutcome {
    Resolved,
    Exhausted,
    StatusError,
    Failed,
}

/// Geocodes every titled record that lacks coordinates, one request at a
/// time.
///
/// With no credential (or a blank one) the pass is a logged no-op. `delay`
/// is slept after every request regardless of outcome. Records that never
/// resolve keep null coordinates.
pub async fn resolve_geocodes<G: Geocoder>(
    geocoder: &G,
    tours: &mut [TourRecord],
    api_key: Option<&str>,
    delay: Duration,
) -> GeocodeStats {
    let mut stats = GeocodeStats::default();

    let Some(api_key) = api_key.map(str::trim).filter(|k| !k.is_empty()) else {
        stats.disabled = true;
        tracing::warn!("GOOGLE_MAPS_API_KEY not set; skipping geocoding");
        return stats;
    };
    let tail = key_tail(api_key);
    tracing::info!(key_tail = %tail, "using geocoding key ending in {tail}");

    stats.already_geocoded = tours.iter().filter(|t| t.is_geocoded()).count();
    let total = tours
        .iter()
        .filter(|t| !t.is_geocoded() && !query_ladder(t).is_empty())
        .count();
    stats.eligible = total;
    tracing::info!(
        total,
        already_geocoded = stats.already_geocoded,
        "geocoding {total} tours"
    );

    let mut index = 0;
    for tour in tours.iter_mut().filter(|t| !t.is_geocoded()) {
        let ladder = query_ladder(tour);
        if ladder.is_empty() {
            continue;
        }
        index += 1;

        match walk_ladder(geocoder, tour, &ladder, api_key, delay, index, total, &mut stats).await {
            LadderOutcome::Resolved => stats.ok += 1,
            LadderOutcome::Exhausted => stats.zero += 1,
            LadderOutcome::StatusError => stats.status_err += 1,
            LadderOutcome::Failed => stats.caught_err += 1,
        }
    }

    tracing::info!(
        ok = stats.ok,
        zero = stats.zero,
        status_err = stats.status_err,
        caught_err = stats.caught_err,
        "geocoding complete: ok={}, zero={}, status={}, errors={}",
        stats.ok,
        stats.zero,
        stats.status_err,
        stats.caught_err
    );
    stats
}

#[allow(clippy::too_many_arguments)]
async fn walk_ladder<G: Geocoder>(
    geocoder: &G,
    tour: &mut TourRecord,
    ladder: &[QueryAttempt],
    api_key: &str,
    delay: Duration,
    index: usize,
    total: usize,
    stats: &mut GeocodeStats,
) -> LadderOutcome {
    for (rung, attempt) in ladder.iter().enumerate() {
        let label = attempt.label.as_str();
        let query = attempt.query.as_str();
        if rung == 0 {
            tracing::info!(index, total, label, query, "[{index}/{total}] Geocoding \"{query}\"");
        } else {
            tracing::info!(index, total, label, query, "[{index}/{total}] Retry ({label}): \"{query}\"");
        }

        stats.attempts += 1;
        let result = geocoder.geocode(query, api_key).await;
        tokio::time::sleep(delay).await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(index, total, label, query, error = %err, "[{index}/{total}] ERROR geocoding \"{query}\": {err}");
                return LadderOutcome::Failed;
            }
        };

        match response.classify() {
            GeocodeStatus::Ok => {
                apply_first_result(tour, &response);
                tracing::info!(
                    index,
                    total,
                    label,
                    lat = tour.geocode.lat(),
                    lng = tour.geocode.lng(),
                    "[{index}/{total}] OK {} - {}",
                    format_coordinates(tour),
                    tour.geocode.place_label()
                );
                return LadderOutcome::Resolved;
            }
            GeocodeStatus::ZeroResults => {
                tracing::debug!(index, total, label, query, "[{index}/{total}] ZERO_RESULTS for \"{query}\"");
            }
            GeocodeStatus::Error(status) => {
                let message = response.error_message.as_deref().unwrap_or("");
                tracing::warn!(
                    index,
                    total,
                    label,
                    status = %status,
                    error_message = message,
                    "[{index}/{total}] {status} {message}"
                );
                return LadderOutcome::StatusError;
            }
        }
    }

    tracing::info!(index, total, title = %tour.title, "[{index}/{total}] no results for \"{}\"", tour.title);
    LadderOutcome::Exhausted
}

fn apply_first_result(tour: &mut TourRecord, response: &GeocodeResponse) {
    if let Some(best) = response.results.first() {
        tour.geocode
            .merge_result(best.coordinates(), best.country(), best.state());
    }
}

fn format_coordinates(tour: &TourRecord) -> String {
    tour.geocode
        .coordinates
        .map_or_else(|| "no geometry".to_owned(), |c| format!("{},{}", c.lat, c.lng))
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
