use serde::{Deserialize, Serialize};

use crate::models::Boundary;

/// Kind of offer to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    /// Sale
    #[default]
    Prodej,
    /// Rent
    Pronajem,
    /// Flat share
    Spolubydleni,
}

impl OfferType {
    pub fn as_str(self) -> &'static str {
        match self {
            OfferType::Prodej => "prodej",
            OfferType::Pronajem => "pronajem",
            OfferType::Spolubydleni => "spolubydleni",
        }
    }
}

/// Search parameters for the markers request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub offer_type: OfferType,
    /// Area to search in
    pub boundary: Boundary,
    /// Estate type code, e.g. `byt`
    pub estate_type: Option<String>,
    /// Disposition code, e.g. `3-kk`
    pub disposition: Option<String>,
}

impl SearchParams {
    /// Query parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("offerType", self.offer_type.as_str().to_string())];
        if let Some(estate_type) = &self.estate_type {
            pairs.push(("estateType", estate_type.clone()));
        }
        if let Some(disposition) = &self.disposition {
            pairs.push(("disposition", disposition.clone()));
        }
        pairs.push(("boundary", self.boundary.to_query_value()));
        pairs
    }
}
