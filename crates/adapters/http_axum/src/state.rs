//! Shared application state for axum handlers.

use std::sync::Arc;

use huebridge_app::ports::Light;
use huebridge_app::services::light_service::LightService;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the light type itself does not need
/// to be `Clone`, only the `Arc` wrappers are cloned.
pub struct AppState<L> {
    /// Light queries and commands.
    pub light_service: Arc<LightService<L>>,
    /// `host:port` substituted into the description document.
    pub url_base: Arc<str>,
}

impl<L> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            light_service: Arc::clone(&self.light_service),
            url_base: Arc::clone(&self.url_base),
        }
    }
}

impl<L: Light + 'static> AppState<L> {
    /// Create the state from a service that is also shared with background
    /// tasks.
    pub fn new(light_service: Arc<LightService<L>>, url_base: impl Into<Arc<str>>) -> Self {
        Self {
            light_service,
            url_base: url_base.into(),
        }
    }
}
