use std::path::PathBuf;

pub const DEFAULT_LISTING_URL: &str = "https://guidealong.com/tour-list/";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Clone)]
pub struct AppConfig {
    /// Geocoding credential. `None` puts the geocoding stage in pass-through mode.
    pub google_maps_api_key: Option<String>,
    pub listing_url: String,
    pub output_path: PathBuf,
    pub completed_path: PathBuf,
    pub log_level: String,
    pub request_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub geocode_base_url: String,
}

impl AppConfig {
    /// Last six characters of the API key, safe to log.
    #[must_use]
    pub fn api_key_tail(&self) -> Option<String> {
        self.google_maps_api_key.as_deref().map(key_tail)
    }
}

/// Last six characters of `key`.
#[must_use]
pub fn key_tail(key: &str) -> String {
    let skip = key.chars().count().saturating_sub(6);
    key.chars().skip(skip).collect()
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("listing_url", &self.listing_url)
            .field("output_path", &self.output_path)
            .field("completed_path", &self.completed_path)
            .field("log_level", &self.log_level)
            .field("request_delay_ms", &self.request_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("geocode_base_url", &self.geocode_base_url)
            .finish()
    }
}
