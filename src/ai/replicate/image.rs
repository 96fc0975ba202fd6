use super::client::ReplicateHttpClient;
use super::types::{
    CreatePredictionRequest, HidreamInput, Prediction, PredictionOutcome, HIDREAM_VERSION,
};
use crate::ai::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const POLL_TIMEOUT: Duration = Duration::from_secs(120);

/// Text-to-image client over the pinned hidream-l1-fast model.
///
/// Constructed without a token it still exists, but every generation fails
/// at the provider boundary; a misconfigured deployment keeps serving its
/// page and reports the problem per request.
pub struct ReplicateImageClient {
    http: Option<ReplicateHttpClient>,
}

impl ReplicateImageClient {
    pub fn new(api_token: Option<String>) -> Self {
        Self::new_with_client(api_token, reqwest::Client::new())
    }

    pub fn new_with_client(api_token: Option<String>, client: reqwest::Client) -> Self {
        Self {
            http: api_token.map(|token| ReplicateHttpClient::new_with_client(token, client)),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.map(|http| http.with_base_url(base_url));
        self
    }

    /// Follow the provider's poll URL until the prediction leaves the
    /// `starting`/`processing` states. This is part of the predictions
    /// protocol, not a generation retry.
    async fn wait_for_terminal(
        &self,
        http: &ReplicateHttpClient,
        mut prediction: Prediction,
    ) -> Result<Prediction> {
        let started = Instant::now();

        while !prediction.is_terminal() {
            if started.elapsed() >= POLL_TIMEOUT {
                return Err(Error::Provider(format!(
                    "Prediction {} timed out after {}s",
                    prediction.id,
                    POLL_TIMEOUT.as_secs()
                )));
            }

            let poll_url = prediction
                .urls
                .as_ref()
                .and_then(|urls| urls.get.clone())
                .ok_or_else(|| {
                    Error::Provider(format!(
                        "Prediction {} is pending but exposes no poll URL",
                        prediction.id
                    ))
                })?;

            tokio::time::sleep(POLL_INTERVAL).await;
            prediction = http.get_prediction(&poll_url).await?;
        }

        Ok(prediction)
    }
}

#[async_trait]
impl ImageGenerationService for ReplicateImageClient {
    async fn generate_image(&self, prompt: &str, negative_prompt: &str) -> Result<String> {
        let http = self
            .http
            .as_ref()
            .ok_or_else(|| Error::Provider("REPLICATE_API_TOKEN not set".to_string()))?;

        let request = CreatePredictionRequest {
            version: HIDREAM_VERSION.to_string(),
            input: HidreamInput::new(prompt.to_string(), negative_prompt.to_string()),
        };

        tracing::debug!("Creating Replicate prediction ({} char prompt)", prompt.len());
        let prediction = http.create_prediction(&request).await?;
        let prediction = self.wait_for_terminal(http, prediction).await?;

        match prediction.outcome() {
            PredictionOutcome::Success { url } => {
                tracing::debug!("Prediction {} produced {}", prediction.id, url);
                Ok(url)
            }
            PredictionOutcome::NoImage => {
                tracing::error!("Prediction {} succeeded without an image URL", prediction.id);
                Err(Error::Provider("Failed to generate image".to_string()))
            }
            PredictionOutcome::Failed { message } => {
                tracing::error!("Prediction {} failed: {}", prediction.id, message);
                Err(Error::Provider(message))
            }
        }
    }
}
