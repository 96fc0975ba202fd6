use crate::ai::ImageGenerationService;
use std::sync::Arc;

/// Shared handler state.
///
/// The provider client is the only thing requests share; each request is
/// otherwise independent and stateless.
pub struct AppState {
    pub image_gen: Arc<dyn ImageGenerationService>,
}

impl AppState {
    pub fn new(image_gen: Arc<dyn ImageGenerationService>) -> Self {
        Self { image_gen }
    }
}
