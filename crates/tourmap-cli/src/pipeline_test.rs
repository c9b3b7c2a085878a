use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::json;
use tourmap_core::{locale_cmp, Coordinates, TourDetails};
use tourmap_geocode::{GeocodeError, GeocodeResponse};
use tourmap_scraper::ScraperError;

use super::*;

const LISTING_URL: &str = "https://tours.test/tour-list/";

/// Serves canned pages by URL; anything else is a 404.
#[derive(Default)]
struct StaticSite {
    pages: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl StaticSite {
    fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_owned(), html.to_owned());
        self
    }
}

impl DocumentSource for StaticSite {
    async fn fetch_document(&self, url: &str) -> Result<String, ScraperError> {
        self.fetched.lock().unwrap().push(url.to_owned());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScraperError::UnexpectedStatus {
                status: 404,
                url: url.to_owned(),
            })
    }
}

/// Resolves every query to the same point and records the queries.
#[derive(Default)]
struct FixedGeocoder {
    queries: Mutex<Vec<String>>,
}

impl FixedGeocoder {
    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Geocoder for FixedGeocoder {
    async fn geocode(&self, query: &str, _api_key: &str) -> Result<GeocodeResponse, GeocodeError> {
        self.queries.lock().unwrap().push(query.to_owned());
        Ok(serde_json::from_value(json!({
            "status": "OK",
            "results": [{
                "geometry": { "location": { "lat": 10.0, "lng": 20.0 } },
                "address_components": [
                    { "long_name": "Canada", "short_name": "CA", "types": ["country"] },
                    { "long_name": "Alberta", "short_name": "AB",
                      "types": ["administrative_area_level_1"] }
                ]
            }]
        }))
        .unwrap())
    }
}

fn card(slug: &str, title: &str) -> String {
    format!(
        r#"<div class="tourmaster-tour-grid-inner">
             <h3><a href="/tour/{slug}/">{title}</a></h3>
             <div class="tourmaster-tour-content">About {title}.</div>
           </div>"#
    )
}

fn listing(cards: &[(&str, &str)]) -> String {
    let body: String = cards.iter().map(|(slug, title)| card(slug, title)).collect();
    format!("<html><body>{body}</body></html>")
}

fn options(api_key: Option<&str>) -> PipelineOptions {
    PipelineOptions {
        listing_url: LISTING_URL.to_owned(),
        delay: Duration::ZERO,
        api_key: api_key.map(str::to_owned),
    }
}

#[tokio::test]
async fn listing_fetch_failure_is_fatal() {
    let site = StaticSite::default();
    let geocoder = FixedGeocoder::default();

    let err = run_pipeline(&site, &geocoder, &[], &options(Some("k")))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("failed to fetch tour listing"));
    assert!(geocoder.queries().is_empty());
}

#[tokio::test]
async fn output_is_sorted_by_title_and_keeps_unresolved_records() {
    let site = StaticSite::default()
        .page(
            LISTING_URL,
            &listing(&[("zion", "Zion"), ("acadia", "acadia"), ("banff", "Banff")]),
        )
        .page(
            "https://tours.test/tour/banff/",
            "<span>Start: Banff Avenue</span><span>Location: Alberta</span>",
        );
    let geocoder = FixedGeocoder::default();

    let (tours, report) = run_pipeline(&site, &geocoder, &[], &options(Some("k")))
        .await
        .unwrap();

    let titles: Vec<&str> = tours.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["acadia", "Banff", "Zion"]);
    assert!(tours
        .windows(2)
        .all(|w| locale_cmp(&w[0].title, &w[1].title).is_le()));

    assert_eq!(report.listed, 3);
    assert_eq!(report.details.attempted, 3);
    assert_eq!(report.details.failed, 2);
    assert_eq!(report.details.found_start, 1);
    assert_eq!(tours[1].details.start, "Banff Avenue");
    assert_eq!(tours[1].details.location, "Alberta");
    assert_eq!(report.geocode.ok, 3);
}

#[tokio::test]
async fn resume_fills_start_without_regeocoding() {
    let site = StaticSite::default()
        .page(LISTING_URL, &listing(&[("lake", "Lake Louise Tour")]))
        .page(
            "https://tours.test/tour/lake/",
            "<div><span>Start: Trailhead</span></div>",
        );
    let geocoder = FixedGeocoder::default();

    let mut previous = TourRecord::stub(
        "Lake Louise Tour".to_owned(),
        "https://tours.test/tour/lake/".to_owned(),
        TourDetails {
            duration: "2 hours".to_owned(),
            ..TourDetails::default()
        },
    );
    previous.geocode.merge_result(
        Some(Coordinates { lat: 51.4, lng: -116.2 }),
        "Canada",
        "AB",
    );
    let before = previous.geocode.clone();

    let (tours, report) = run_pipeline(&site, &geocoder, &[previous], &options(Some("k")))
        .await
        .unwrap();

    assert_eq!(report.resumed, 1);
    assert_eq!(tours[0].details.start, "Trailhead");
    assert_eq!(tours[0].details.duration, "2 hours");
    assert_eq!(tours[0].geocode, before);
    assert!(geocoder.queries().is_empty());
    assert_eq!(report.geocode.already_geocoded, 1);
}

#[tokio::test]
async fn resume_matches_normalized_titles_and_first_duplicate_wins() {
    let site = StaticSite::default().page(LISTING_URL, &listing(&[("glacier", "Glacier  Tour")]));
    let geocoder = FixedGeocoder::default();

    let mut first = TourRecord::stub("Glacier Tour".to_owned(), String::new(), TourDetails::default());
    first.details.start = "West Entrance".to_owned();
    let mut second = first.clone();
    second.details.start = "East Entrance".to_owned();
    let gone = TourRecord::stub("Retired Tour".to_owned(), String::new(), TourDetails::default());

    let (tours, report) = run_pipeline(&site, &geocoder, &[first, second, gone], &options(None))
        .await
        .unwrap();

    assert_eq!(report.resumed, 1);
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0].details.start, "West Entrance");
}

#[tokio::test]
async fn missing_key_passes_records_through() {
    let site = StaticSite::default().page(LISTING_URL, &listing(&[("a", "Alpha")]));
    let geocoder = FixedGeocoder::default();

    let (tours, report) = run_pipeline(&site, &geocoder, &[], &options(None))
        .await
        .unwrap();

    assert!(report.geocode.disabled);
    assert!(geocoder.queries().is_empty());
    assert_eq!(tours[0].geocode.lat(), None);
    assert!(report.summary().contains("geocode=skipped"));
}

#[tokio::test]
async fn requests_are_issued_in_listing_order() {
    let site = StaticSite::default().page(
        LISTING_URL,
        &listing(&[("b", "Bravo"), ("a", "Alpha")]),
    );
    let geocoder = FixedGeocoder::default();

    run_pipeline(&site, &geocoder, &[], &options(Some("k")))
        .await
        .unwrap();

    assert_eq!(
        *site.fetched.lock().unwrap(),
        [
            LISTING_URL,
            "https://tours.test/tour/b/",
            "https://tours.test/tour/a/"
        ]
    );
    assert_eq!(geocoder.queries(), ["Bravo", "Alpha"]);
}

#[test]
fn summary_reports_stage_counters() {
    let report = PipelineReport {
        listed: 4,
        resumed: 1,
        details: DetailStats {
            attempted: 4,
            found_start: 3,
            found_location: 2,
            failed: 1,
        },
        geocode: GeocodeStats {
            ok: 2,
            zero: 1,
            ..GeocodeStats::default()
        },
    };
    assert_eq!(
        report.summary(),
        "listed=4 resumed=1 | details start=3 location=2 failed=1 | geocode ok=2 zero=1 status=0 errors=0 already=0"
    );
}
