//! UPnP description document.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use huebridge_app::ports::Light;

use crate::state::AppState;

const TEMPLATE: &str = include_str!("../assets/description.xml");
const URL_BASE_PLACEHOLDER: &str = "##URLBASE##";

fn render(url_base: &str) -> String {
    TEMPLATE.replace(URL_BASE_PLACEHOLDER, url_base)
}

/// `GET /description.xml`
pub async fn handler<L: Light + 'static>(State(state): State<AppState<L>>) -> impl IntoResponse {
    tracing::debug!("serving description document");
    (
        [(header::CONTENT_TYPE, "application/xml")],
        render(&state.url_base),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_replace_every_placeholder() {
        let xml = render("192.168.1.20:8080");
        assert!(!xml.contains(URL_BASE_PLACEHOLDER));
        assert!(xml.contains("<URLBase>http://192.168.1.20:8080/</URLBase>"));
        assert!(xml.contains("Philips hue (192.168.1.20:8080)"));
    }

    #[test]
    fn should_advertise_bridge_uuid() {
        assert!(render("x").contains("uuid:2f402f80-da50-11e1-9b23-00178829d301"));
    }
}
