use reqwest::Url;
use tracing::debug;

use crate::error::ScoutError;
use crate::models::{FlatOffer, RawOffer};

/// Keys the flattener computes itself; a sub-record never overrides them.
const RESERVED_KEYS: [&str; 2] = ["url", "date"];

/// Resolve a listing `uri` against `base` with standard relative-URL rules.
/// A missing `uri` resolves to the base itself.
pub fn resolve_listing_url(base: &Url, uri: Option<&str>) -> Result<Url, ScoutError> {
    let Some(uri) = uri else {
        return Ok(base.clone());
    };
    base.join(uri).map_err(|e| ScoutError::InvalidUrl {
        url: uri.to_string(),
        reason: e.to_string(),
    })
}

/// Flatten every marker, preserving order. The first marker without an
/// `advertEstateOffer` entry aborts the whole batch.
pub fn flatten_offers(raw: Vec<RawOffer>, base: &Url) -> Result<Vec<FlatOffer>, ScoutError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, offer)| flatten_offer(index, offer, base))
        .collect()
}

fn flatten_offer(index: usize, raw: RawOffer, base: &Url) -> Result<FlatOffer, ScoutError> {
    let RawOffer {
        uri,
        time_order,
        advert_estate_offer,
    } = raw;

    let Some(mut details) = advert_estate_offer.and_then(|offers| offers.into_iter().next())
    else {
        return Err(ScoutError::MissingEstateOffer { index, uri });
    };

    let url = resolve_listing_url(base, uri.as_deref())?;
    let date = time_order.and_then(|t| t.date);

    for key in RESERVED_KEYS {
        if details.extra.remove(key).is_some() {
            debug!("Dropping sub-record key {:?} from record {}", key, index);
        }
    }

    Ok(FlatOffer::new(details, url.into(), date))
}
