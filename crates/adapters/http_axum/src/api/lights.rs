//! JSON handlers for lights.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Map, Value, json};

use huebridge_app::ports::Light;
use huebridge_app::services::light_service::CommandAck;
use huebridge_domain::id::LightId;
use huebridge_domain::light::{LightDescriptor, StateDescriptor};

use crate::error::ApiError;
use crate::state::AppState;

/// Lights keyed by id, serialized in id order.
pub struct LightMap(Vec<(LightId, LightDescriptor)>);

impl Serialize for LightMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, descriptor) in &self.0 {
            map.serialize_entry(id, descriptor)?;
        }
        map.end()
    }
}

/// Body of the state endpoint.
#[derive(Serialize)]
pub struct StateBody {
    pub state: StateDescriptor,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<LightMap>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the show endpoint.
pub enum GetResponse {
    Ok(Json<LightDescriptor>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the state endpoint.
pub enum StateResponse {
    Ok(Json<StateBody>),
}

impl IntoResponse for StateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the set-state endpoint.
pub enum SetStateResponse {
    /// One success entry per written attribute.
    Success(CommandAck),
}

impl IntoResponse for SetStateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Success(ack) => {
                let prefix = format!("/lights/{}/state", ack.id);
                Json(json!([
                    success(format!("{prefix}/bri"), ack.brightness),
                    success(format!("{prefix}/on"), ack.on),
                ]))
                .into_response()
            }
        }
    }
}

fn success(address: String, value: impl Into<Value>) -> Value {
    let mut entry = Map::new();
    entry.insert(address, value.into());
    json!({ "success": entry })
}

/// `GET /api/{user}/lights`
pub async fn list<L: Light + 'static>(
    State(state): State<AppState<L>>,
    Path(user): Path<String>,
) -> ListResponse {
    tracing::debug!(%user, "listing lights");
    ListResponse::Ok(Json(LightMap(state.light_service.list_lights())))
}

/// `GET /api/{user}/lights/{id}`
pub async fn get<L: Light + 'static>(
    State(state): State<AppState<L>>,
    Path((user, id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError> {
    tracing::debug!(%user, %id, "showing light");
    let descriptor = state
        .light_service
        .get_light(&id)
        .map_err(|err| ApiError::new(format!("/lights/{id}"), err))?;
    Ok(GetResponse::Ok(Json(descriptor)))
}

/// `GET /api/{user}/lights/{id}/state`
pub async fn get_state<L: Light + 'static>(
    State(state): State<AppState<L>>,
    Path((user, id)): Path<(String, String)>,
) -> Result<StateResponse, ApiError> {
    tracing::debug!(%user, %id, "showing light state");
    let light_state = state
        .light_service
        .get_state(&id)
        .map_err(|err| ApiError::new(format!("/lights/{id}/state"), err))?;
    Ok(StateResponse::Ok(Json(StateBody { state: light_state })))
}

/// `PUT /api/{user}/lights/{id}/state`
///
/// The body is read raw: controllers do not reliably send a JSON content
/// type.
pub async fn set_state<L: Light + 'static>(
    State(state): State<AppState<L>>,
    Path((user, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<SetStateResponse, ApiError> {
    tracing::debug!(%user, %id, body = %String::from_utf8_lossy(&body), "setting light state");
    let ack = state
        .light_service
        .set_state(&id, &body)
        .await
        .map_err(|err| ApiError::new(format!("/lights/{id}/state"), err))?;
    Ok(SetStateResponse::Success(ack))
}
