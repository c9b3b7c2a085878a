//! The page-fetching capability consumed by the listing and detail stages.

use std::future::Future;

use crate::error::ScraperError;

/// Fetches an HTML document by URL.
///
/// Implemented by [`crate::PageClient`] for real HTTP. Tests and offline
/// runs substitute in-memory sources.
pub trait DocumentSource {
    /// Returns the document body, or an error for transport failures and
    /// non-2xx responses.
    fn fetch_document(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;
}
