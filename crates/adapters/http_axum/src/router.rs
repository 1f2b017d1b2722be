//! Axum router assembly.

use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use tower_http::trace::TraceLayer;

use huebridge_app::ports::Light;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the light API under `/api` and serves the description document.
/// Unknown routes answer `404 Not found!`. Includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<L: Light + 'static>(state: AppState<L>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/description.xml", get(crate::description::handler::<L>))
        .nest("/api", crate::api::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: Uri) -> (StatusCode, &'static str) {
    tracing::info!(%uri, "unknown route");
    // Real 404 status, unlike API failures which are reported in-band with 200.
    (StatusCode::NOT_FOUND, "Not found!")
}
