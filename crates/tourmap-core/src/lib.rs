pub mod app_config;
pub mod collation;
pub mod config;
pub mod error;
pub mod filter;
pub mod text;
pub mod tour;

pub use app_config::AppConfig;
pub use collation::{locale_cmp, sort_by_title};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use filter::{facets, filter_tours, summary_line, TourFilter, TourStatus};
pub use text::normalize_text;
pub use tour::{Coordinates, Geocode, TourDetails, TourRecord, TOUR_TYPE_DRIVING, TOUR_TYPE_WALKING};
