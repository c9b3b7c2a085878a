//! Google Geocoding API response types.
//!
//! Only the fields the resolver reads are modelled. Every field is
//! defaulted so a sparse or partially malformed result still decodes; the
//! top-level `status` is the only required key.
//!
//! ### `status`
//! `"OK"` with at least one result, `"ZERO_RESULTS"` with none, or an error
//! status such as `"OVER_QUERY_LIMIT"`, `"REQUEST_DENIED"`,
//! `"INVALID_REQUEST"`, `"UNKNOWN_ERROR"`. Error statuses usually carry an
//! `error_message`.
//!
//! ### `address_components`
//! Each component lists its `types`; the resolver reads `"country"`
//! (long name) and `"administrative_area_level_1"` (short name, e.g. `"WY"`).

use serde::Deserialize;
use tourmap_core::Coordinates;

/// Top-level response from `GET /maps/api/geocode/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    #[must_use]
    pub fn classify(&self) -> GeocodeStatus {
        match self.status.as_str() {
            "OK" if !self.results.is_empty() => GeocodeStatus::Ok,
            "ZERO_RESULTS" => GeocodeStatus::ZeroResults,
            // OK with an empty result list is not retried.
            other => GeocodeStatus::Error(other.to_owned()),
        }
    }
}

/// Control-flow classification of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeStatus {
    /// At least one result; the first is used.
    Ok,
    /// Nothing found; the next rung of the ladder may be tried.
    ZeroResults,
    /// Any other status, including `OK` with no results; stops the ladder
    /// for the record.
    Error(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

impl GeocodeResult {
    /// Both coordinates from `geometry.location`, or neither.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.geometry
            .as_ref()
            .and_then(|g| g.location.as_ref())
            .map(|loc| Coordinates {
                lat: loc.lat,
                lng: loc.lng,
            })
    }

    fn component(&self, kind: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }

    /// Long name of the `country` component.
    #[must_use]
    pub fn country(&self) -> &str {
        self.component("country")
            .map_or("", |c| c.long_name.as_str())
    }

    /// Short name of the first-level administrative area, falling back to
    /// its long name.
    #[must_use]
    pub fn state(&self) -> &str {
        self.component("administrative_area_level_1")
            .map_or("", |c| {
                if c.short_name.is_empty() {
                    c.long_name.as_str()
                } else {
                    c.short_name.as_str()
                }
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}
