//! HTTP client for the Google Geocoding API.
//!
//! One GET per query with `address` and `key` parameters. API-level
//! statuses are returned in the body untouched; only transport failures,
//! non-2xx statuses and undecodable bodies become [`GeocodeError`]s.

use std::time::Duration;

use reqwest::{Client, Url};
use tourmap_core::app_config::DEFAULT_GEOCODE_BASE_URL;

use crate::error::GeocodeError;
use crate::geocoder::Geocoder;
use crate::types::GeocodeResponse;

/// Client for the Google Geocoding JSON endpoint.
///
/// Use [`GoogleGeocoder::new`] for production or
/// [`GoogleGeocoder::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: Client,
    base_url: Url,
}

impl GoogleGeocoder {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_GEOCODE_BASE_URL)
    }

    /// Creates a client with a custom endpoint URL.
    ///
    /// `base_url` is the full endpoint path, e.g.
    /// `https://maps.googleapis.com/maps/api/geocode/json`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeocodeError::InvalidBaseUrl`] if `base_url` does
    /// not parse as an absolute http(s) URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GeocodeError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds the request URL with percent-encoded `address` and `key`.
    fn build_url(&self, query: &str, api_key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", api_key);
        url
    }

    /// Sends the lookup and decodes the response body.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a geocoding
    ///   response.
    pub async fn lookup(
        &self,
        query: &str,
        api_key: &str,
    ) -> Result<GeocodeResponse, GeocodeError> {
        let url = self.build_url(query, api_key);
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("geocode(address={query})"),
            source: e,
        })
    }
}

impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, query: &str, api_key: &str) -> Result<GeocodeResponse, GeocodeError> {
        self.lookup(query, api_key).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
