//! Locale-style ordering for tour titles.
//!
//! Approximates the root collation used by browsers' `localeCompare`:
//!
//! 1. Primary: strings are decomposed (NFD) and combining marks dropped, so
//!    `É` sorts with `e`. Characters compare by class (whitespace <
//!    punctuation and symbols < digits < letters), letters case-insensitively.
//! 2. Secondary: at a primary tie, unaccented sorts before accented.
//! 3. Tertiary: lowercase sorts before uppercase.
//! 4. Final tie-break on the raw code points so the order is total.
//!
//! The empty string sorts before everything else.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::tour::TourRecord;

fn primary_weight(c: char) -> (u8, char) {
    if c.is_whitespace() {
        (0, ' ')
    } else if c.is_numeric() {
        (2, c)
    } else if c.is_alphabetic() {
        (3, c.to_lowercase().next().unwrap_or(c))
    } else {
        (1, c)
    }
}

/// Base characters of the decomposed string, each with the combining marks
/// that follow it.
fn decompose(s: &str) -> Vec<(char, Vec<char>)> {
    let mut out: Vec<(char, Vec<char>)> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        match out.last_mut() {
            Some((_, marks)) if is_combining_mark(c) => marks.push(c),
            _ => out.push((c, Vec::new())),
        }
    }
    out
}

/// Compares two strings in locale order.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let da = decompose(a);
    let db = decompose(b);
    da.iter()
        .map(|(c, _)| primary_weight(*c))
        .cmp(db.iter().map(|(c, _)| primary_weight(*c)))
        .then_with(|| {
            da.iter()
                .map(|(_, marks)| marks)
                .cmp(db.iter().map(|(_, marks)| marks))
        })
        .then_with(|| {
            da.iter()
                .map(|(c, _)| c.is_uppercase())
                .cmp(db.iter().map(|(c, _)| c.is_uppercase()))
        })
        .then_with(|| a.cmp(b))
}

/// Stable ascending sort by title in locale order.
pub fn sort_by_title(tours: &mut [TourRecord]) {
    tours.sort_by(|a, b| locale_cmp(&a.title, &b.title));
}
