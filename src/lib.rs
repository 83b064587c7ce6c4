//! Collects bezrealitky.cz listing markers and shapes them into [`Offer`] records.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod scrapers;

pub use config::{load_config, ScoutConfig};
pub use error::ScoutError;
pub use models::{Boundary, CollectionRun, LatLng, Offer, OfferId, Region};
pub use pipeline::{collect, OfferBuilder};
pub use scrapers::{BezrealitkyScraper, OfferScraper, OfferType, SearchParams};
