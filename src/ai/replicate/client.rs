use super::types::{CreatePredictionRequest, Prediction};
use crate::{Error, Result};
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://api.replicate.com";

/// Authenticated HTTP layer for the Replicate predictions API.
pub struct ReplicateHttpClient {
    client: Client,
    api_token: String,
    base_url: String,
}

impl ReplicateHttpClient {
    pub fn new(api_token: String) -> Self {
        Self::new_with_client(api_token, Client::new())
    }

    /// Share an existing connection pool.
    pub fn new_with_client(api_token: String, client: Client) -> Self {
        Self {
            client,
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Create a prediction. `Prefer: wait` asks Replicate to hold the
    /// response open until the prediction finishes where it can.
    pub async fn create_prediction(&self, request: &CreatePredictionRequest) -> Result<Prediction> {
        let url = format!("{}/v1/predictions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Replicate: {}", e);
                e
            })?;

        self.decode(response).await
    }

    /// Fetch the current state of a prediction via its poll URL.
    pub async fn get_prediction(&self, poll_url: &str) -> Result<Prediction> {
        let response = self
            .client
            .get(poll_url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to poll Replicate prediction: {}", e);
                e
            })?;

        self.decode(response).await
    }

    async fn decode(&self, response: reqwest::Response) -> Result<Prediction> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Replicate API error (status {}): {}", status, error_text);
            return Err(Error::Provider(format!(
                "Replicate API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Replicate response: {}\nBody: {}", e, body);
            Error::Provider(format!("Failed to parse Replicate response: {}", e))
        })
    }
}
