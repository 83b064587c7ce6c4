pub mod boundary;

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::ScoutError;
use crate::format::group_thousands;

pub use boundary::{Boundary, LatLng, Region};

/// Length of the `YYYY-MM-DDTHH:MM:SS` prefix of a listing date.
pub const TIMESTAMP_LEN: usize = 19;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One marker record as returned by the markers endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default, deserialize_with = "lenient")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time_order: Option<TimeOrder>,
    pub advert_estate_offer: Option<Vec<EstateDetails>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOrder {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
}

/// Listing identifier, kept as the API sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferId {
    Number(Number),
    Text(String),
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferId::Number(n) => write!(f, "{n}"),
            OfferId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq<str> for OfferId {
    fn eq(&self, other: &str) -> bool {
        match self {
            OfferId::Number(n) => n.to_string() == other,
            OfferId::Text(s) => s == other,
        }
    }
}

impl PartialEq<&str> for OfferId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Listing attributes from the first `advertEstateOffer` entry.
///
/// Named fields are the ones an [`Offer`] keeps; every other key is carried
/// verbatim in `extra`. A named field holding a value of the wrong JSON type
/// is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstateDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<OfferId>,
    pub gps: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub surface: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub surface_land: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub key_offer_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub key_estate_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub key_disposition: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode an optional field, mapping a value of the wrong type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            debug!("Ignoring mistyped listing attribute: {}", err);
            Ok(None)
        }
    }
}

/// A marker with its estate details lifted to the top level and the two
/// computed fields attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatOffer {
    pub url: String,
    pub date: Option<String>,
    #[serde(flatten)]
    pub details: EstateDetails,
}

impl FlatOffer {
    pub fn new(details: EstateDetails, url: String, date: Option<String>) -> Self {
        Self { url, date, details }
    }
}

/// Final listing record. Only the record builder constructs these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    id: Option<OfferId>,
    date: Option<String>,
    url: String,
    gps: Option<Value>,
    price: Option<i64>,
    surface: Option<Number>,
    currency: Option<String>,
    surface_land: Option<Number>,
    key_offer_type: Option<String>,
    key_estate_type: Option<String>,
    key_disposition: Option<String>,
}

impl Offer {
    pub(crate) fn from_flat(flat: FlatOffer) -> Self {
        let FlatOffer { url, date, details } = flat;
        Self {
            id: details.id,
            date,
            url,
            gps: details.gps,
            price: details.price,
            surface: details.surface,
            currency: details.currency,
            surface_land: details.surface_land,
            key_offer_type: details.key_offer_type,
            key_estate_type: details.key_estate_type,
            key_disposition: details.key_disposition,
        }
    }

    pub fn id(&self) -> Option<&OfferId> {
        self.id.as_ref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn gps(&self) -> Option<&Value> {
        self.gps.as_ref()
    }

    pub fn price(&self) -> Option<i64> {
        self.price
    }

    pub fn surface(&self) -> Option<f64> {
        self.surface.as_ref().and_then(Number::as_f64)
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn surface_land(&self) -> Option<f64> {
        self.surface_land.as_ref().and_then(Number::as_f64)
    }

    pub fn key_offer_type(&self) -> Option<&str> {
        self.key_offer_type.as_deref()
    }

    pub fn key_estate_type(&self) -> Option<&str> {
        self.key_estate_type.as_deref()
    }

    pub fn key_disposition(&self) -> Option<&str> {
        self.key_disposition.as_deref()
    }

    /// The validated `YYYY-MM-DDTHH:MM:SS` prefix of the listing date.
    fn timestamp_prefix(&self) -> Result<&str, ScoutError> {
        let invalid = || ScoutError::InvalidDate {
            id: self.id.as_ref().map(ToString::to_string),
            date: self.date.clone(),
        };
        let prefix = self
            .date
            .as_deref()
            .and_then(|d| d.get(..TIMESTAMP_LEN))
            .ok_or_else(invalid)?;
        NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
        Ok(prefix)
    }

    /// When the offer was listed, ignoring any UTC offset suffix.
    pub fn listed_at(&self) -> Option<NaiveDateTime> {
        let prefix = self.date.as_deref()?.get(..TIMESTAMP_LEN)?;
        NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).ok()
    }

    /// One-line summary:
    /// `date; price currency; offer type; estate type; disposition; surface m2; url`.
    ///
    /// # Errors
    ///
    /// - [`ScoutError::InvalidDate`] when the date is missing or does not start
    ///   with a full `YYYY-MM-DDTHH:MM:SS` timestamp.
    /// - [`ScoutError::MissingField`] when the price is missing.
    pub fn summary(&self) -> Result<String, ScoutError> {
        let timestamp = self.timestamp_prefix()?;
        let price = self.price.ok_or_else(|| ScoutError::MissingField {
            id: self.id.as_ref().map(ToString::to_string),
            field: "price",
        })?;
        let surface = self
            .surface
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        Ok(format!(
            "{timestamp}; {} {}; {}; {}; {}; {surface}m2; {}",
            group_thousands(price),
            self.currency().unwrap_or_default(),
            self.key_offer_type().unwrap_or_default(),
            self.key_estate_type().unwrap_or_default(),
            self.key_disposition().unwrap_or_default(),
            self.url,
        ))
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Output of one collection run
#[derive(Debug, Clone, Serialize)]
pub struct CollectionRun {
    pub offers: Vec<Offer>,
    pub count: usize,
    pub collected_at: DateTime<Utc>,
}
