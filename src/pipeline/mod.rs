pub mod builder;
pub mod flatten;

use reqwest::Url;
use tracing::info;

use crate::error::ScoutError;
use crate::models::{CollectionRun, RawOffer};
use crate::scrapers::OfferScraper;

pub use builder::OfferBuilder;
pub use flatten::{flatten_offers, resolve_listing_url};

/// Decode a markers response body into raw marker records.
pub fn decode_markers(body: &str) -> Result<Vec<RawOffer>, ScoutError> {
    serde_json::from_str(body).map_err(|source| ScoutError::Deserialize {
        context: "markers response".to_string(),
        source,
    })
}

/// Run one collection: fetch, decode, flatten and build.
///
/// # Errors
///
/// Returns the first transport, decode or shape error; nothing is retried.
pub async fn collect<S>(
    scraper: &S,
    listing_base: &Url,
    builder: &mut OfferBuilder,
) -> Result<CollectionRun, ScoutError>
where
    S: OfferScraper + ?Sized,
{
    let body = scraper.fetch_markers().await?;
    let raw = decode_markers(&body)?;
    info!(
        "Decoded {} markers from {}",
        raw.len(),
        scraper.source_name()
    );

    let flat = flatten_offers(raw, listing_base)?;
    let run = builder.build(flat);
    info!("Collected {} offers", run.count);

    Ok(run)
}
