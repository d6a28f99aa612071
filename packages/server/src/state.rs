//! Shared application state.

use crate::engine::Engine;

/// State handed to every handler via axum's extractor.
pub struct AppState {
    pub engine: Engine,
}
