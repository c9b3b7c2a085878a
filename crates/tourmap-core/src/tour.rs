//! The tour record: the unit of work for every pipeline stage and the unit
//! of output persisted to `tours.json`.
//!
//! ## Merge rules
//!
//! Enrichment never blanks a populated field. Two flavours exist:
//!
//! - [`merge_text`] replaces the target only with a non-empty incoming
//!   value. Used when the incoming source is fresher than what is held
//!   (detail pages, geocoder results).
//! - [`fill_text`] writes only into an empty target. Used when absorbing a
//!   record from a previous run, where the fresh listing wins.
//!
//! ## Coordinates
//!
//! `lat` and `lng` are stored together as [`Coordinates`] so a record can
//! never carry one without the other. On disk they stay two nullable
//! numbers; a legacy file with only one of them set reads back as not
//! geocoded.

use serde::{Deserialize, Serialize};

pub const TOUR_TYPE_WALKING: &str = "Walking";
pub const TOUR_TYPE_DRIVING: &str = "Driving";

/// A single tour as extracted from the listing page and enriched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TourRecord {
    /// Human-facing identity key. Used for sorting and for matching against
    /// records from a previous run.
    #[serde(default)]
    pub title: String,

    /// Detail-page URL. Empty means no detail enrichment is possible.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub details: TourDetails,

    #[serde(default)]
    pub geocode: Geocode,
}

impl TourRecord {
    /// Creates a stub carrying only listing-page data.
    #[must_use]
    pub fn stub(title: String, url: String, details: TourDetails) -> Self {
        Self {
            title,
            url,
            details,
            geocode: Geocode::default(),
        }
    }

    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    #[must_use]
    pub fn is_geocoded(&self) -> bool {
        self.geocode.is_geocoded()
    }

    /// Absorbs data resolved by a previous run for the same tour.
    ///
    /// Coordinates are taken only when this record has none; every other
    /// field is filled only where this record is empty.
    pub fn absorb_previous(&mut self, prior: &TourRecord) {
        fill_text(&mut self.url, &prior.url);
        self.details.fill_missing_from(&prior.details);

        if !self.geocode.is_geocoded() {
            self.geocode.coordinates = prior.geocode.coordinates;
        }
        fill_text(&mut self.geocode.country, &prior.geocode.country);
        fill_text(&mut self.geocode.state, &prior.geocode.state);
    }
}

/// Listing- and detail-page fields. All optional; empty string means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDetails {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub audio_points: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub tour_type: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub location: String,
}

impl TourDetails {
    /// Fills each empty field from `other`, leaving populated fields alone.
    pub fn fill_missing_from(&mut self, other: &TourDetails) {
        fill_text(&mut self.description, &other.description);
        fill_text(&mut self.thumbnail, &other.thumbnail);
        fill_text(&mut self.audio_points, &other.audio_points);
        fill_text(&mut self.duration, &other.duration);
        fill_text(&mut self.tour_type, &other.tour_type);
        fill_text(&mut self.start, &other.start);
        fill_text(&mut self.location, &other.location);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Geocoding result for a tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GeocodeRepr", into = "GeocodeRepr")]
pub struct Geocode {
    pub coordinates: Option<Coordinates>,
    pub country: String,
    pub state: String,
}

impl Geocode {
    #[must_use]
    pub fn is_geocoded(&self) -> bool {
        self.coordinates.is_some()
    }

    #[must_use]
    pub fn lat(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lat)
    }

    #[must_use]
    pub fn lng(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lng)
    }

    /// Merges a geocoder result. Coordinates are replaced only when the
    /// result carried geometry; names only when non-empty.
    pub fn merge_result(&mut self, coordinates: Option<Coordinates>, country: &str, state: &str) {
        if coordinates.is_some() {
            self.coordinates = coordinates;
        }
        merge_text(&mut self.country, country);
        merge_text(&mut self.state, state);
    }

    /// `"state, country"` with empty parts omitted.
    #[must_use]
    pub fn place_label(&self) -> String {
        [self.state.as_str(), self.country.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// On-disk shape of [`Geocode`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GeocodeRepr {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    country: String,
    #[serde(default)]
    state: String,
}

impl From<GeocodeRepr> for Geocode {
    fn from(repr: GeocodeRepr) -> Self {
        let coordinates = match (repr.lat, repr.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };
        Self {
            coordinates,
            country: repr.country,
            state: repr.state,
        }
    }
}

impl From<Geocode> for GeocodeRepr {
    fn from(geocode: Geocode) -> Self {
        Self {
            lat: geocode.lat(),
            lng: geocode.lng(),
            country: geocode.country,
            state: geocode.state,
        }
    }
}

/// Replaces `target` with `incoming` when `incoming` is non-empty.
pub fn merge_text(target: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        incoming.clone_into(target);
    }
}

/// Writes `incoming` into `target` only when `target` is empty.
pub fn fill_text(target: &mut String, incoming: &str) {
    if target.is_empty() && !incoming.is_empty() {
        incoming.clone_into(target);
    }
}

#[cfg(test)]
#[path = "tour_test.rs"]
mod tests;
