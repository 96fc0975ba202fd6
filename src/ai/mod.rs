//! Image-generation provider integration
//!
//! Provides the service seam over the hosted text-to-image provider and a
//! mock implementation for tests.

pub mod mock;
pub mod replicate;

pub use mock::MockImageClient;
pub use replicate::ReplicateImageClient;

use crate::Result;
use async_trait::async_trait;

/// One text-to-image generation yielding a hosted image URL.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str, negative_prompt: &str) -> Result<String>;
}
