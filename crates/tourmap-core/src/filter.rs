//! Filtered views over the persisted tour set.
//!
//! The map UI never mutates its record list. Each filter change recomputes
//! an immutable snapshot from the full set, the completed titles, and the
//! active [`TourFilter`].

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;

use crate::tour::TourRecord;

/// Completion status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TourStatus {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl FromStr for TourStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "incomplete" => Ok(Self::Incomplete),
            other => Err(format!(
                "unknown status '{other}' (expected all, completed, or incomplete)"
            )),
        }
    }
}

/// Active filter set. The default matches every record.
#[derive(Debug, Clone, Default)]
pub struct TourFilter {
    /// Case-insensitive substring matched against title and description.
    pub search: String,
    /// Empty means every country.
    pub countries: BTreeSet<String>,
    /// Empty means every state.
    pub states: BTreeSet<String>,
    pub status: TourStatus,
    /// `None` means every tour type.
    pub tour_type: Option<String>,
}

impl TourFilter {
    fn matches(&self, tour: &TourRecord, search: &str, completed: &HashSet<&str>) -> bool {
        let matches_search = search.is_empty()
            || tour.title.to_lowercase().contains(search)
            || tour.details.description.to_lowercase().contains(search);
        let matches_country =
            self.countries.is_empty() || self.countries.contains(&tour.geocode.country);
        let matches_state = self.states.is_empty() || self.states.contains(&tour.geocode.state);

        let is_completed = completed.contains(tour.title.as_str());
        let matches_status = match self.status {
            TourStatus::All => true,
            TourStatus::Completed => is_completed,
            TourStatus::Incomplete => !is_completed,
        };

        let matches_type = self
            .tour_type
            .as_deref()
            .is_none_or(|t| tour.details.tour_type == t);

        matches_search && matches_country && matches_state && matches_status && matches_type
    }
}

/// Returns the records visible under `filter`, in their original order.
#[must_use]
pub fn filter_tours<'a>(
    tours: &'a [TourRecord],
    completed_titles: &[String],
    filter: &TourFilter,
) -> Vec<&'a TourRecord> {
    let search = filter.search.to_lowercase();
    let completed: HashSet<&str> = completed_titles.iter().map(String::as_str).collect();
    tours
        .iter()
        .filter(|t| filter.matches(t, &search, &completed))
        .collect()
}

/// Country → states present in `tours`, both ordered.
///
/// Records without a country are left out; a country whose records carry no
/// state maps to an empty set.
#[must_use]
pub fn facets<'a, I>(tours: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = &'a TourRecord>,
{
    let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for tour in tours {
        let country = &tour.geocode.country;
        if country.is_empty() {
            continue;
        }
        let states = out.entry(country.clone()).or_default();
        if !tour.geocode.state.is_empty() {
            states.insert(tour.geocode.state.clone());
        }
    }
    out
}

/// `"N tours shown"` with a completed count suffix when any are completed.
#[must_use]
pub fn summary_line(visible: &[&TourRecord], completed_titles: &[String]) -> String {
    let completed = visible
        .iter()
        .filter(|t| completed_titles.iter().any(|c| *c == t.title))
        .count();
    if completed > 0 {
        format!("{} tours shown ({completed} completed)", visible.len())
    } else {
        format!("{} tours shown", visible.len())
    }
}
