//! HTTP surface: the platform interactions webhook.

pub mod interactions;

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/interactions", post(interactions::receive_interaction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
