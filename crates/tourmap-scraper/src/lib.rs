pub mod client;
pub mod detail;
pub mod error;
pub mod listing;
mod parse_helpers;
mod rate_limit;
pub mod source;

pub use client::PageClient;
pub use detail::{enrich_tour_details, parse_tour_detail, DetailStats, TourDetail};
pub use error::ScraperError;
pub use listing::parse_listing;
pub use source::DocumentSource;
