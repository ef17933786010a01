pub mod error;
pub mod handlers;
pub mod render;

use crate::core::index::GuestIndex;
use crate::domain::ports::ConfirmationStore;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared request state: the immutable guest index plus the storage chain.
pub struct AppState {
    pub index: Arc<GuestIndex>,
    pub store: Arc<dyn ConfirmationStore>,
    pub event_date: String,
}

impl AppState {
    pub fn new(
        index: GuestIndex,
        store: Arc<dyn ConfirmationStore>,
        event_date: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            index: Arc::new(index),
            store,
            event_date: event_date.into(),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/sugerencias", get(handlers::suggestions))
        .route("/confirmar", post(handlers::confirm))
        .route("/admin", get(handlers::admin_report))
        .route("/admin/export", get(handlers::admin_export))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
