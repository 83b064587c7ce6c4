pub mod bezrealitky;
pub mod traits;
pub mod types;

pub use bezrealitky::BezrealitkyScraper;
pub use traits::OfferScraper;
pub use types::{OfferType, SearchParams};
