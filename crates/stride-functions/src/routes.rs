//! Router for the generation functions.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use stride_core::functions::{GENERATE_MILESTONES, SUMMARIZE_DESCRIPTION, path};
use stride_schema::SchemaRegistry;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::gemini::TextModel;
use crate::handlers;

/// Shared handler state.
pub struct AppState<M> {
    pub model: Arc<M>,
    pub schema: Arc<SchemaRegistry>,
}

impl<M> AppState<M> {
    pub fn new(model: M) -> Self {
        Self {
            model: Arc::new(model),
            schema: Arc::new(SchemaRegistry::new()),
        }
    }
}

// Derived Clone would require `M: Clone`.
impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            schema: Arc::clone(&self.schema),
        }
    }
}

/// Build the service router. Browsers call the functions directly, so every
/// route answers CORS preflights.
pub fn router<M: TextModel + 'static>(state: AppState<M>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            &path(GENERATE_MILESTONES),
            post(handlers::generate_milestones::<M>),
        )
        .route(
            &path(SUMMARIZE_DESCRIPTION),
            post(handlers::summarize_description::<M>),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
