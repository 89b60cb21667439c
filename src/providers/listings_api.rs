use crate::models::{Listing, ListingsPayload, MarketStats};
use crate::providers::error::check_status;
use crate::providers::traits::MarketDataSource;
use crate::providers::ProviderError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on followed `next` links for one snapshot
const MAX_PAGES: usize = 50;

/// Client for the listings/statistics REST API
#[derive(Clone)]
pub struct ListingsApiClient {
    client: Client,
    base_url: String,
}

impl ListingsApiClient {
    /// Create a client against `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("prop-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        debug!("Downloaded {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MarketDataSource for ListingsApiClient {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, ProviderError> {
        info!("Fetching listings from {}", self.base_url);

        let mut listings = Vec::new();
        let mut next = Some(self.url("/api/listings/"));
        let mut pages = 0;

        while let Some(url) = next.take() {
            let payload: ListingsPayload = self.get_json(&url).await?;
            next = payload.next_page().map(str::to_string);
            listings.extend(payload.into_listings());

            pages += 1;
            if pages >= MAX_PAGES && next.is_some() {
                warn!("Stopping after {} pages, listing snapshot is partial", pages);
                break;
            }
        }

        info!("✅ Fetched {} listings", listings.len());
        Ok(listings)
    }

    async fn fetch_listing(&self, id: u64) -> Result<Listing, ProviderError> {
        self.get_json(&self.url(&format!("/api/listings/{id}/"))).await
    }

    /// Statistics endpoint: overall block plus per-city rows
    async fn fetch_stats(&self) -> Result<MarketStats, ProviderError> {
        self.get_json(&self.url("/api/listings/stats/")).await
    }

    fn source_name(&self) -> &'static str {
        "listings-api"
    }
}
