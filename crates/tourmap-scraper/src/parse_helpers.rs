//! Field-level cleanup for listing-card text.
//!
//! All functions take already-normalized text (see
//! [`tourmap_core::normalize_text`]).

use std::sync::LazyLock;

use regex::Regex;
use tourmap_core::{TOUR_TYPE_DRIVING, TOUR_TYPE_WALKING};

static AUDIO_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*audio\s*points\s*[:-]?\s*").expect("valid audio label regex")
});
static AUDIO_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*\+?").expect("valid audio count regex"));
static TOUR_TYPE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tour type[:\s]*").expect("valid tour type regex"));
static WALKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwalk(ing)?\b").expect("valid walking regex"));

/// `"Audio Points: 1,200+"` → `"1,200+"`.
///
/// Falls back to the label-stripped text when no count is present.
pub(crate) fn clean_audio_points(text: &str) -> String {
    let cleaned = AUDIO_LABEL.replace(text, "");
    AUDIO_COUNT
        .find(&cleaned)
        .map_or_else(|| cleaned.to_string(), |m| m.as_str().to_owned())
}

/// `"Tour Type: Walking"` → `"Walking"`.
pub(crate) fn clean_tour_type(text: &str) -> String {
    TOUR_TYPE_LABEL.replace(text, "").trim().to_owned()
}

/// Default tour type when the card carries none: walking if the title or
/// description mentions walking, otherwise driving.
pub(crate) fn default_tour_type(title: &str, description: &str) -> &'static str {
    if WALKING.is_match(title) || WALKING.is_match(description) {
        TOUR_TYPE_WALKING
    } else {
        TOUR_TYPE_DRIVING
    }
}

/// First URL of a `srcset` attribute value, if any.
pub(crate) fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .map(str::trim)
        .and_then(|candidate| candidate.split(' ').next())
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_points_strips_label_and_extracts_count() {
        assert_eq!(clean_audio_points("Audio Points: 1,200+"), "1,200+");
        assert_eq!(clean_audio_points("audio points - 85"), "85");
        assert_eq!(clean_audio_points("250+ stories"), "250+");
    }

    #[test]
    fn audio_points_without_count_keeps_cleaned_text() {
        assert_eq!(clean_audio_points("Audio Points: many"), "many");
        assert_eq!(clean_audio_points(""), "");
    }

    #[test]
    fn tour_type_strips_label() {
        assert_eq!(clean_tour_type("Tour Type: Walking"), "Walking");
        assert_eq!(clean_tour_type("tour type Driving"), "Driving");
        assert_eq!(clean_tour_type("Tour Type:"), "");
    }

    #[test]
    fn default_tour_type_detects_walking_words() {
        assert_eq!(default_tour_type("Boston Walking Tour", ""), "Walking");
        assert_eq!(default_tour_type("Savannah", "A short walk downtown"), "Walking");
        assert_eq!(default_tour_type("Yellowstone", "Scenic drive"), "Driving");
    }

    #[test]
    fn default_tour_type_requires_word_boundary() {
        assert_eq!(default_tour_type("Sidewalks of Paris", "boardwalker"), "Driving");
    }

    #[test]
    fn first_srcset_url_takes_leading_candidate() {
        assert_eq!(
            first_srcset_url("https://cdn.example.com/a-300.jpg 300w, https://cdn.example.com/a-600.jpg 600w"),
            Some("https://cdn.example.com/a-300.jpg")
        );
        assert_eq!(first_srcset_url("  /img/b.jpg"), Some("/img/b.jpg"));
        assert_eq!(first_srcset_url(""), None);
    }
}
