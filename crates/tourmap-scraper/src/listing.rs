//! Tour listing page extraction.
//!
//! Every `h3 a[href*="/tour/"]` anchor yields one stub. Card fields are read
//! from the anchor's nearest enclosing `div`; a missing sub-element leaves
//! its field empty rather than failing the card.

use std::sync::LazyLock;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tourmap_core::{normalize_text, TourDetails, TourRecord};

use crate::parse_helpers::{
    clean_audio_points, clean_tour_type, default_tour_type, first_srcset_url,
};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid listing selector")
}

static TOUR_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"h3 a[href*="/tour/"]"#));
static CONTENT: LazyLock<Selector> = LazyLock::new(|| selector("div.tourmaster-tour-content"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static DURATION: LazyLock<Selector> =
    LazyLock::new(|| selector("div.tourmaster-tour-info-duration-text"));
static AUDIO_POINTS: LazyLock<Selector> =
    LazyLock::new(|| selector("div.tourmaster-tour-info-minimum-age"));
static TOUR_TYPE: LazyLock<Selector> =
    LazyLock::new(|| selector("div.tourmaster-tour-info-maximum-people"));
static THUMBNAIL: LazyLock<Selector> =
    LazyLock::new(|| selector("div.tourmaster-tour-thumbnail img"));

/// Parses the listing document into stubs, in document order.
///
/// Relative `href`s are resolved against `base_url`; when either cannot be
/// parsed the `href` is kept as written.
#[must_use]
pub fn parse_listing(html: &str, base_url: &str) -> Vec<TourRecord> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();
    document
        .select(&TOUR_LINK)
        .map(|link| parse_card(link, base.as_ref()))
        .collect()
}

fn parse_card(link: ElementRef<'_>, base: Option<&Url>) -> TourRecord {
    let title = normalize_text(&element_text(link));
    let url = resolve_href(link.value().attr("href").unwrap_or_default(), base);
    let card = closest_div(link);

    let description = card.map(card_description).unwrap_or_default();
    let duration = card
        .and_then(|c| first_text(c, &DURATION))
        .unwrap_or_default();
    let audio_points = card
        .and_then(|c| first_text(c, &AUDIO_POINTS))
        .map(|text| clean_audio_points(&text))
        .unwrap_or_default();

    let mut tour_type = card
        .and_then(|c| first_text(c, &TOUR_TYPE))
        .map(|text| clean_tour_type(&text))
        .unwrap_or_default();
    if tour_type.is_empty() {
        default_tour_type(&title, &description).clone_into(&mut tour_type);
    }

    let thumbnail = card.and_then(card_thumbnail).unwrap_or_default();

    TourRecord::stub(
        title,
        url,
        TourDetails {
            description,
            thumbnail,
            audio_points,
            duration,
            tour_type,
            start: String::new(),
            location: String::new(),
        },
    )
}

/// Nearest ancestor `div` of the anchor.
fn closest_div(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| normalize_text(&element_text(el)))
}

/// The content div's text, else the longest paragraph in the card.
///
/// Paragraph length is measured before normalization; on a tie the later
/// paragraph wins.
fn card_description(card: ElementRef<'_>) -> String {
    if let Some(text) = first_text(card, &CONTENT) {
        return text;
    }
    card.select(&PARAGRAPH)
        .map(element_text)
        .max_by_key(|text| text.chars().count())
        .map(|text| normalize_text(&text))
        .unwrap_or_default()
}

/// `src`, then lazy-load attributes, then the first `srcset` candidate.
fn card_thumbnail(card: ElementRef<'_>) -> Option<String> {
    let img = card.select(&THUMBNAIL).next()?;
    let attrs = img.value();
    let direct = ["src", "data-src", "data-lazy-src"]
        .into_iter()
        .filter_map(|name| attrs.attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty());
    if let Some(src) = direct {
        return Some(src.to_owned());
    }
    ["srcset", "data-srcset"]
        .into_iter()
        .filter_map(|name| attrs.attr(name))
        .find(|value| !value.trim().is_empty())
        .and_then(first_srcset_url)
        .map(str::to_owned)
}

fn resolve_href(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if Url::parse(href).is_ok() {
        return href.to_owned();
    }
    base.and_then(|b| b.join(href).ok())
        .map_or_else(|| href.to_owned(), |u| u.to_string())
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
