//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`BridgeError`] via `#[from]`. The four kinds a caller can observe are
//! kept apart so the HTTP layer can report them distinctly:
//!
//! | Kind | Variant |
//! |------|---------|
//! | Unknown or malformed light id | [`BridgeError::Resolution`] |
//! | Command body of the wrong shape | [`BridgeError::Command`] |
//! | Hardware unreachable | [`DeviceError::Unreachable`] |
//! | Hardware answered but rejected the request | [`DeviceError::Rejected`] |

/// Boxed error used to carry adapter-specific transport failures across the
/// port boundary without leaking adapter types into the domain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error for every bridge operation.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The external light identifier did not resolve to a device.
    #[error("light resolution failed")]
    Resolution(#[from] ResolutionError),

    /// The inbound command body could not be understood.
    #[error("malformed command")]
    Command(#[from] CommandError),

    /// The device driver reported a failure.
    #[error("device failure")]
    Device(#[from] DeviceError),

    /// A domain object failed its invariants.
    #[error("validation failed")]
    Validation(#[from] ValidationError),
}

/// Why an external light identifier could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// The identifier is not a decimal integer.
    #[error("light id {0:?} is not a number")]
    NotANumber(String),

    /// The identifier is zero or negative.
    #[error("light id {0} must be positive")]
    NotPositive(i64),

    /// The identifier is greater than the number of registered lights.
    #[error("light {id} does not exist, the bridge has {count} lights")]
    Unknown {
        /// The requested identifier.
        id: u64,
        /// Number of registered lights.
        count: usize,
    },
}

/// Why an inbound command body was rejected.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The body is not JSON of the expected shape.
    #[error("command body is invalid: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

/// Failures reported by a device driver.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The hardware could not be reached (connect failure, timeout, dropped
    /// connection).
    #[error("device unreachable")]
    Unreachable(#[source] BoxError),

    /// The hardware answered at the transport level but the answer was not
    /// acceptable.
    #[error("device rejected the request")]
    Rejected(#[from] ProtocolError),
}

impl DeviceError {
    /// Wrap any transport failure as [`DeviceError::Unreachable`].
    pub fn unreachable(err: impl Into<BoxError>) -> Self {
        Self::Unreachable(err.into())
    }

    /// Whether this failure means the device could not be reached at all.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Protocol-level failures: the hardware answered, but not with what the
/// driver expects. The raw body is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The response body lacks the success marker.
    #[error("response does not acknowledge the command: {body:?}")]
    MissingSuccessMarker {
        /// Raw response body.
        body: String,
    },

    /// The response body could not be parsed as the expected value.
    #[error("malformed response: {body:?}")]
    MalformedResponse {
        /// Raw response body.
        body: String,
    },

    /// The response parsed, but the value lies outside the allowed range.
    #[error("value {value} is outside 0..={max}")]
    ValueOutOfRange {
        /// The parsed value.
        value: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A light was given an empty name.
    #[error("name must not be empty")]
    EmptyName,

    /// A light was given an empty unique identifier.
    #[error("unique id must not be empty")]
    EmptyUniqueId,
}
