//! Per-record geocoding query ladder.

use std::fmt;

use tourmap_core::{normalize_text, TourRecord};

/// Which record fields a query was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLabel {
    Title,
    StartLocation,
    Start,
    Location,
}

impl AttemptLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::StartLocation => "start+location",
            Self::Start => "start",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for AttemptLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAttempt {
    pub label: AttemptLabel,
    pub query: String,
}

impl QueryAttempt {
    fn new(label: AttemptLabel, query: String) -> Self {
        Self { label, query }
    }
}

/// Builds the ordered fallback queries for a record: title, then
/// `"{start}, {location}"`, then start, then location.
///
/// Rungs whose inputs are empty are omitted. A record with an empty title
/// yields no attempts.
#[must_use]
pub fn query_ladder(tour: &TourRecord) -> Vec<QueryAttempt> {
    let title = normalize_text(&tour.title);
    if title.is_empty() {
        return Vec::new();
    }

    let start = normalize_text(&tour.details.start);
    let location = normalize_text(&tour.details.location);

    let mut ladder = vec![QueryAttempt::new(AttemptLabel::Title, title)];
    if !start.is_empty() && !location.is_empty() {
        ladder.push(QueryAttempt::new(
            AttemptLabel::StartLocation,
            format!("{start}, {location}"),
        ));
    }
    if !start.is_empty() {
        ladder.push(QueryAttempt::new(AttemptLabel::Start, start));
    }
    if !location.is_empty() {
        ladder.push(QueryAttempt::new(AttemptLabel::Location, location));
    }
    ladder
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourmap_core::TourDetails;

    fn tour(title: &str, start: &str, location: &str) -> TourRecord {
        TourRecord::stub(
            title.to_owned(),
            String::new(),
            TourDetails {
                start: start.to_owned(),
                location: location.to_owned(),
                ..TourDetails::default()
            },
        )
    }

    fn labels(ladder: &[QueryAttempt]) -> Vec<&'static str> {
        ladder.iter().map(|a| a.label.as_str()).collect()
    }

    #[test]
    fn full_ladder_in_order() {
        let ladder = query_ladder(&tour("Yellowstone Tour", "Gate", "Wyoming"));
        assert_eq!(labels(&ladder), ["title", "start+location", "start", "location"]);
        let queries: Vec<&str> = ladder.iter().map(|a| a.query.as_str()).collect();
        assert_eq!(queries, ["Yellowstone Tour", "Gate, Wyoming", "Gate", "Wyoming"]);
    }

    #[test]
    fn combined_rung_needs_both_parts() {
        assert_eq!(labels(&query_ladder(&tour("T", "Gate", ""))), ["title", "start"]);
        assert_eq!(labels(&query_ladder(&tour("T", "", "Wyoming"))), ["title", "location"]);
        assert_eq!(labels(&query_ladder(&tour("T", "  ", "\n"))), ["title"]);
    }

    #[test]
    fn empty_title_yields_nothing() {
        assert!(query_ladder(&tour("   ", "Gate", "Wyoming")).is_empty());
    }

    #[test]
    fn queries_are_whitespace_normalized() {
        let ladder = query_ladder(&tour("  Big   Sur ", " Carmel\n", ""));
        assert_eq!(ladder[0].query, "Big Sur");
        assert_eq!(ladder[1].query, "Carmel");
    }

    #[test]
    fn label_display_matches_log_names() {
        assert_eq!(AttemptLabel::StartLocation.to_string(), "start+location");
    }
}
