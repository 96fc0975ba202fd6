use super::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Builder-style mock for [`ImageGenerationService`].
///
/// Queued URLs are cycled across calls; a configured failure takes
/// precedence over any queued URL.
#[derive(Clone)]
pub struct MockImageClient {
    url_responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
    recorded_prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            url_responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
            recorded_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_url_response(self, url: String) -> Self {
        self.url_responses.lock().unwrap().push(url);
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every (prompt, negative_prompt) pair this mock was called with.
    pub fn recorded_prompts(&self) -> Vec<(String, String)> {
        self.recorded_prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, prompt: &str, negative_prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.recorded_prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), negative_prompt.to_string()));

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Provider(message));
        }

        let responses = self.url_responses.lock().unwrap();
        if responses.is_empty() {
            Ok("https://replicate.delivery/mock/output.jpg".to_string())
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
