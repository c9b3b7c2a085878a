pub mod client;
pub mod error;
pub mod geocoder;
pub mod ladder;
pub mod resolver;
pub mod types;

pub use client::GoogleGeocoder;
pub use error::GeocodeError;
pub use geocoder::Geocoder;
pub use ladder::{query_ladder, AttemptLabel, QueryAttempt};
pub use resolver::{resolve_geocodes, GeocodeStats};
pub use types::{AddressComponent, GeocodeResponse, GeocodeResult, GeocodeStatus, Geometry, LatLng};
