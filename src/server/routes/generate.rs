//! Generation endpoint handler.

use crate::models::{ErrorResponse, GenerateRequest, GenerateResponse};
use crate::prompts;
use crate::server::state::AppState;
use crate::Error;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// POST /api/generate - one t-shirt photo for a (phrase, animal) pair.
///
/// Invalid input answers 400 without touching the provider; a provider
/// failure answers 500 carrying the caught error's message. The handler
/// holds no state across requests.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let valid = request.validate().map_err(|e| {
        warn!("Rejected generation request: {}", e);
        error_response(e)
    })?;

    let prompt = prompts::tshirt_photo(valid.animal, &valid.phrase);
    debug!(
        "Rendered prompt for {} ({} chars)",
        valid.animal,
        prompt.len()
    );

    let image_url = state
        .image_gen
        .generate_image(&prompt, prompts::negative())
        .await
        .map_err(|e| {
            error!("Generation failed for {}: {}", valid.animal, e);
            error_response(e)
        })?;

    info!(
        "Generated image for {} with phrase {:?}",
        valid.animal, valid.phrase
    );
    Ok(Json(GenerateResponse { image_url }))
}

fn error_response(error: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match error {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}
