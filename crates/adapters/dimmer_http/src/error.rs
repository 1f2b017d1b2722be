//! Dimmer adapter error types.

use huebridge_domain::error::DeviceError;

/// Errors specific to the dimmer adapter.
#[derive(Debug, thiserror::Error)]
pub enum DimmerError {
    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The configured board address is not a usable base URL.
    #[error("invalid dimmer address {address:?}: {reason}")]
    InvalidAddress {
        /// The address as configured.
        address: String,
        /// Why it was refused.
        reason: String,
    },

    /// The HTTP round trip to the board failed.
    #[error("dimmer request failed")]
    Request(#[source] reqwest::Error),
}

impl DimmerError {
    /// Convert into a [`DeviceError`] for propagation across the port
    /// boundary. Every dimmer failure that reaches a driver call means the
    /// board could not be talked to.
    #[must_use]
    pub fn into_domain(self) -> DeviceError {
        DeviceError::unreachable(self)
    }
}

impl From<DimmerError> for DeviceError {
    fn from(err: DimmerError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_invalid_address_error() {
        let err = DimmerError::InvalidAddress {
            address: "ftp://board".to_string(),
            reason: "unsupported scheme".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid dimmer address \"ftp://board\": unsupported scheme"
        );
    }

    #[test]
    fn should_convert_into_unreachable_device_error() {
        let err: DeviceError = DimmerError::InvalidAddress {
            address: String::new(),
            reason: "empty".to_string(),
        }
        .into();
        assert!(err.is_unreachable());
    }
}
