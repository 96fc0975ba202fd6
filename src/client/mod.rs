//! Client-side orchestration for the studio UI.
//!
//! Session state (single-flight guard, displayed image, capped history)
//! and the typed HTTP caller used by the interactive shell.

pub mod api;
pub mod session;

pub use api::StudioApiClient;
pub use session::{download_filename, GenerationPhase, HistoryEntry, StudioSession, HISTORY_CAP};
