//! Text helpers shared by the listing, detail, and geocoding stages.

/// Collapses every run of whitespace to a single space and trims both ends.
///
/// Non-breaking spaces and other Unicode whitespace count as whitespace, so
/// text scraped from `&nbsp;`-heavy markup normalizes the same way as plain
/// ASCII.
#[must_use]
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
