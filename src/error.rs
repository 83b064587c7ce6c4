use thiserror::Error;

use crate::config::ConfigError;

/// Every failure the collector can surface. Nothing here is retried:
/// the first error aborts the run.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {index} (uri {uri:?}) has no advertEstateOffer entry")]
    MissingEstateOffer { index: usize, uri: Option<String> },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("offer {id:?} has no {field}")]
    MissingField { id: Option<String>, field: &'static str },

    #[error("offer {id:?} has an invalid listing date {date:?}")]
    InvalidDate { id: Option<String>, date: Option<String> },

    #[error("invalid boundary polygon: {reason}")]
    InvalidBoundary { reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
