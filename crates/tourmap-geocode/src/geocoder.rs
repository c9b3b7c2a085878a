//! The geocoding capability consumed by the resolver.

use std::future::Future;

use crate::error::GeocodeError;
use crate::types::GeocodeResponse;

/// Resolves a free-text query into a geocoding response.
///
/// API-level outcomes (`ZERO_RESULTS`, `REQUEST_DENIED`, ...) arrive as
/// `Ok` with the status in the body; `Err` is reserved for transport and
/// decoding failures.
pub trait Geocoder {
    fn geocode(
        &self,
        query: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<GeocodeResponse, GeocodeError>> + Send;
}
