use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_GEOCODE_BASE_URL, DEFAULT_LISTING_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // An empty key is the same as no key: geocoding is skipped.
    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let listing_url = or_default("TOURMAP_LISTING_URL", DEFAULT_LISTING_URL);
    if !has_http_scheme(&listing_url) {
        return Err(ConfigError::InvalidEnvVar {
            var: "TOURMAP_LISTING_URL".to_string(),
            reason: format!("'{listing_url}' is not an http(s) URL"),
        });
    }

    let output_path = PathBuf::from(or_default("TOURMAP_OUTPUT_PATH", "src/data/tours.json"));
    let completed_path = PathBuf::from(or_default(
        "TOURMAP_COMPLETED_PATH",
        "src/data/completed.json",
    ));
    let log_level = or_default("TOURMAP_LOG_LEVEL", "info");

    let request_delay_ms = parse_u64("TOURMAP_REQUEST_DELAY_MS", "120")?;
    let request_timeout_secs = parse_u64("TOURMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TOURMAP_USER_AGENT", "tourmap/0.1 (tour-map)");
    let max_retries = parse_u32("TOURMAP_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("TOURMAP_RETRY_BACKOFF_BASE_MS", "500")?;
    let geocode_base_url = or_default("TOURMAP_GEOCODE_BASE_URL", DEFAULT_GEOCODE_BASE_URL);

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TOURMAP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        google_maps_api_key,
        listing_url,
        output_path,
        completed_path,
        log_level,
        request_delay_ms,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        geocode_base_url,
    })
}

/// Scheme-only check; full URL parsing happens in the HTTP client.
fn has_http_scheme(url: &str) -> bool {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
