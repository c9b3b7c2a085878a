//! `tourmap filter`: prints the visible tour set for a filter, the way the
//! map page computes it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use anyhow::Context;
use tourmap_core::{facets, filter_tours, summary_line, AppConfig, TourFilter, TourRecord};

use crate::store::{self, CompletedTour};
use crate::FilterArgs;

pub(crate) fn run_filter(config: &AppConfig, args: &FilterArgs) -> anyhow::Result<()> {
    let input = args.input.as_ref().unwrap_or(&config.output_path);
    let tours = store::load_tours(input)
        .with_context(|| format!("failed to load tours from {}", input.display()))?;
    let completed = store::load_completed(&config.completed_path);

    if args.facets {
        for line in render_facets(&facets(&tours)) {
            println!("{line}");
        }
        return Ok(());
    }

    for line in render_view(&tours, &completed, &build_filter(args)) {
        println!("{line}");
    }
    Ok(())
}

fn build_filter(args: &FilterArgs) -> TourFilter {
    TourFilter {
        search: args.search.trim().to_owned(),
        countries: args.countries.iter().cloned().collect(),
        states: args.states.iter().cloned().collect(),
        status: args.status,
        tour_type: args.tour_type.clone(),
    }
}

/// One line per visible tour, then the summary line.
fn render_view(
    tours: &[TourRecord],
    completed: &[CompletedTour],
    filter: &TourFilter,
) -> Vec<String> {
    let titles: Vec<String> = completed.iter().map(|c| c.title.clone()).collect();
    let visible = filter_tours(tours, &titles, filter);

    let mut lines: Vec<String> = visible
        .iter()
        .map(|tour| {
            let mut line = tour.title.clone();
            let place = tour.geocode.place_label();
            if !place.is_empty() {
                let _ = write!(line, " ({place})");
            }
            if !tour.details.tour_type.is_empty() {
                let _ = write!(line, " [{}]", tour.details.tour_type);
            }
            if let Some(done) = completed.iter().find(|c| c.title == tour.title) {
                match done.completed_date.as_deref() {
                    Some(date) if !date.is_empty() => {
                        let _ = write!(line, " - completed {date}");
                    }
                    _ => line.push_str(" - completed"),
                }
            }
            line
        })
        .collect();
    lines.push(summary_line(&visible, &titles));
    lines
}

fn render_facets(facets: &BTreeMap<String, BTreeSet<String>>) -> Vec<String> {
    facets
        .iter()
        .map(|(country, states)| {
            if states.is_empty() {
                country.clone()
            } else {
                let states: Vec<&str> = states.iter().map(String::as_str).collect();
                format!("{country}: {}", states.join(", "))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourmap_core::{Coordinates, TourDetails, TourStatus};

    fn tour(title: &str, country: &str, state: &str, tour_type: &str) -> TourRecord {
        let mut t = TourRecord::stub(
            title.to_owned(),
            String::new(),
            TourDetails {
                tour_type: tour_type.to_owned(),
                ..TourDetails::default()
            },
        );
        t.geocode
            .merge_result(Some(Coordinates { lat: 1.0, lng: 1.0 }), country, state);
        t
    }

    fn completed(title: &str, date: Option<&str>) -> CompletedTour {
        CompletedTour {
            title: title.to_owned(),
            completed_date: date.map(str::to_owned),
        }
    }

    fn sample() -> Vec<TourRecord> {
        vec![
            tour("Acadia", "United States", "ME", "Driving"),
            tour("Banff", "Canada", "AB", "Driving"),
            tour("Boston Walk", "United States", "MA", "Walking"),
        ]
    }

    #[test]
    fn renders_places_types_and_completion() {
        let lines = render_view(
            &sample(),
            &[completed("Banff", Some("2024-08-01"))],
            &TourFilter::default(),
        );
        assert_eq!(
            lines,
            [
                "Acadia (ME, United States) [Driving]",
                "Banff (AB, Canada) [Driving] - completed 2024-08-01",
                "Boston Walk (MA, United States) [Walking]",
                "3 tours shown (1 completed)",
            ]
        );
    }

    #[test]
    fn applies_status_and_country_filters() {
        let filter = TourFilter {
            countries: ["United States".to_owned()].into_iter().collect(),
            status: TourStatus::Incomplete,
            ..TourFilter::default()
        };
        let lines = render_view(&sample(), &[completed("Acadia", None)], &filter);
        assert_eq!(lines, ["Boston Walk (MA, United States) [Walking]", "1 tours shown"]);
    }

    #[test]
    fn facets_list_countries_with_states() {
        let lines = render_facets(&facets(&sample()));
        assert_eq!(lines, ["Canada: AB", "United States: MA, ME"]);
    }
}
