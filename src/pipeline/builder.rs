use chrono::Utc;
use tracing::debug;

use crate::models::{CollectionRun, FlatOffer, Offer};

/// Turns flat offers into [`Offer`]s and keeps a running total of every
/// offer it has constructed. The total is never reset.
#[derive(Debug, Default)]
pub struct OfferBuilder {
    constructed: u64,
}

impl OfferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers constructed by this builder across all runs.
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    pub fn build_one(&mut self, flat: FlatOffer) -> Offer {
        self.constructed += 1;
        Offer::from_flat(flat)
    }

    /// Build one offer per flat record, in input order.
    pub fn build(&mut self, flat: Vec<FlatOffer>) -> CollectionRun {
        let offers: Vec<Offer> = flat.into_iter().map(|f| self.build_one(f)).collect();
        debug!(
            "Built {} offers ({} constructed in total)",
            offers.len(),
            self.constructed
        );

        CollectionRun {
            count: offers.len(),
            offers,
            collected_at: Utc::now(),
        }
    }
}
