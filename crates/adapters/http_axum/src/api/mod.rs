//! Bridge light API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod lights;

use axum::Router;
use axum::routing::get;

use huebridge_app::ports::Light;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<L: Light + 'static>() -> Router<AppState<L>> {
    Router::new()
        .route("/{user}/lights", get(lights::list::<L>))
        .route("/{user}/lights/{id}", get(lights::get::<L>))
        .route(
            "/{user}/lights/{id}/state",
            get(lights::get_state::<L>).put(lights::set_state::<L>),
        )
}
