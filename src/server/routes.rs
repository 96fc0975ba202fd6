use crate::server::state::AppState;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

mod generate;

pub use generate::generate;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate", post(generate))
}
