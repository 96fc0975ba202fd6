//! Typed HTTP caller for a running studio server.

use crate::models::{Animal, ErrorResponse, GenerateRequest, GenerateResponse};
use crate::{Error, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};

pub struct StudioApiClient {
    client: Client,
    base_url: String,
}

impl StudioApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request one generation; yields the hosted image URL.
    ///
    /// Non-2xx answers surface the server's `error` body so validation and
    /// provider failures read the same as they do in the browser.
    pub async fn generate(&self, phrase: &str, animal: Animal) -> Result<String> {
        let request = GenerateRequest {
            phrase: Some(phrase.to_string()),
            animal: Some(animal.to_string()),
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => format!("Generation endpoint answered {}", status),
            };
            return Err(Error::Api(message));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.image_url)
    }

    /// Fetch the image behind `url` into `dir`, returning the written path.
    pub async fn download_image(&self, url: &str, dir: &Path, filename: &str) -> Result<PathBuf> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "Image fetch answered {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let path = dir.join(filename);
        std::fs::write(&path, &bytes)?;
        Ok(path)
    }
}
