use crate::models::{MarketAnalysis, PredictionRequest, PredictionResponse};
use crate::providers::error::check_status;
use crate::providers::ProviderError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the price prediction / market analysis service
#[derive(Clone)]
pub struct AiServiceClient {
    client: Client,
    base_url: String,
}

impl AiServiceClient {
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

    /// Ask the model for a price estimate
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ProviderError> {
        let url = format!("{}/predict/", self.base_url);
        info!("Requesting prediction for {} m2 in {}", request.area, request.city);

        let response = self.client.post(&url).json(request).send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        let prediction: PredictionResponse = serde_json::from_str(&body)?;
        debug!(
            "Predicted {} with confidence {:.2}",
            prediction.predicted_price, prediction.confidence
        );
        Ok(prediction)
    }

    /// Market-wide analysis computed by the service
    pub async fn analyze(&self) -> Result<MarketAnalysis, ProviderError> {
        let url = format!("{}/analyze/", self.base_url);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}
