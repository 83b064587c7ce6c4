use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::scrapers::traits::OfferScraper;
use crate::scrapers::types::SearchParams;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

/// Client for the bezrealitky.cz markers endpoint
pub struct BezrealitkyScraper {
    client: Client,
    markers_url: Url,
    params: SearchParams,
}

impl BezrealitkyScraper {
    /// Create a new scraper with default search parameters (sale, Czechia)
    pub fn new(config: &ScoutConfig) -> Result<Self, ScoutError> {
        Self::with_params(config, SearchParams::default())
    }

    /// Create a new scraper with custom search parameters
    pub fn with_params(config: &ScoutConfig, params: SearchParams) -> Result<Self, ScoutError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            markers_url: config.markers_url.clone(),
            params,
        })
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

#[async_trait]
impl OfferScraper for BezrealitkyScraper {
    async fn fetch_markers(&self) -> Result<String, ScoutError> {
        info!(
            "Fetching {} markers from {}",
            self.params.offer_type.as_str(),
            self.markers_url
        );

        let query = self.params.query_pairs();
        debug!("Query parameters: {:?}", query);

        let response = self
            .client
            .post(self.markers_url.clone())
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Markers endpoint returned status: {}", status);
            return Err(ScoutError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.markers_url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes of markers", body.len());

        Ok(body)
    }

    fn source_name(&self) -> &'static str {
        "Bezrealitky"
    }
}
