//! Bridge-style error responses.
//!
//! Errors are reported in-band: status `200 OK` and a body of the form
//! `[{"error":{"type":N,"address":"/lights/1","description":"…"}}]`.
//! Controllers only understand this shape.

use std::error::Error;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use huebridge_domain::error::{BridgeError, DeviceError};

/// Error codes of the bridge API.
mod code {
    pub const INVALID_JSON: u16 = 2;
    pub const RESOURCE_NOT_AVAILABLE: u16 = 3;
    pub const DEVICE_UNREACHABLE: u16 = 201;
    pub const INTERNAL: u16 = 901;
}

#[derive(Serialize)]
struct ErrorEntry {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: u16,
    address: String,
    description: String,
}

/// Maps [`BridgeError`] to an in-band error response for a resource.
#[derive(Debug)]
pub struct ApiError {
    address: String,
    error: BridgeError,
}

impl ApiError {
    /// Attach the resource address the error is reported against.
    pub fn new(address: impl Into<String>, error: impl Into<BridgeError>) -> Self {
        Self {
            address: address.into(),
            error: error.into(),
        }
    }

    fn code(&self) -> u16 {
        match &self.error {
            BridgeError::Resolution(_) => code::RESOURCE_NOT_AVAILABLE,
            BridgeError::Command(_) => code::INVALID_JSON,
            BridgeError::Device(DeviceError::Unreachable(_)) => code::DEVICE_UNREACHABLE,
            BridgeError::Device(DeviceError::Rejected(_)) | BridgeError::Validation(_) => {
                code::INTERNAL
            }
        }
    }
}

/// The error followed by its chain of causes.
fn describe(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.code();
        let description = describe(&self.error);
        tracing::debug!(address = %self.address, kind, %description, "request failed");
        Json([ErrorEntry {
            error: ErrorDetail {
                kind,
                address: self.address,
                description,
            },
        }])
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use huebridge_domain::error::{ProtocolError, ResolutionError};

    use super::*;

    #[test]
    fn should_map_error_kinds_to_codes() {
        let resolution = ApiError::new("/lights/9", ResolutionError::NotPositive(0));
        assert_eq!(resolution.code(), 3);

        let command_err = serde_json::from_str::<u8>("x").unwrap_err();
        let command = ApiError::new(
            "/lights/1/state",
            huebridge_domain::error::CommandError::from(command_err),
        );
        assert_eq!(command.code(), 2);

        let unreachable = ApiError::new("/lights/1/state", DeviceError::unreachable("timed out"));
        assert_eq!(unreachable.code(), 201);

        let rejected = ApiError::new(
            "/lights/1/state",
            DeviceError::from(ProtocolError::MissingSuccessMarker {
                body: "Fail".to_string(),
            }),
        );
        assert_eq!(rejected.code(), 901);
    }

    #[test]
    fn should_describe_error_with_causes() {
        let err = BridgeError::from(ResolutionError::NotANumber("abc".to_string()));
        assert_eq!(
            describe(&err),
            "light resolution failed: light id \"abc\" is not a number"
        );
    }
}
