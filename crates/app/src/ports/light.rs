//! Light port: the capability set every light driver provides.
//!
//! A driver bridges one class of hardware (an HTTP dimmer channel, a virtual
//! in-memory light, …) into the bridge. Drivers are plain values: each owns
//! its properties, its cached state and whatever client it needs, with no
//! shared base state.
//!
//! Drivers must serialize their own hardware operations: `refresh` and
//! `apply_state` on the same instance never overlap.

use std::future::Future;

use huebridge_domain::error::DeviceError;
use huebridge_domain::light::{LightDescriptor, LightProperties, LightState};

/// A bridged light.
pub trait Light: Send + Sync {
    /// Static properties, fixed at construction.
    fn properties(&self) -> &LightProperties;

    /// The last known state. Never touches the hardware.
    fn current_state(&self) -> LightState;

    /// Probe the hardware and replace the cached state with what it reports.
    ///
    /// On failure the cached state is kept except that it is marked
    /// unreachable, and the failure is returned.
    fn refresh(&self) -> impl Future<Output = Result<LightState, DeviceError>> + Send;

    /// Write the parts of `state` the hardware supports.
    ///
    /// Returns the new cached state on success. A
    /// [`DeviceError::Unreachable`] failure marks the cached state
    /// unreachable; a [`DeviceError::Rejected`] failure leaves it unchanged.
    fn apply_state(
        &self,
        state: LightState,
    ) -> impl Future<Output = Result<LightState, DeviceError>> + Send;

    /// Render the light as the bridge descriptor.
    fn describe(&self) -> LightDescriptor {
        LightDescriptor::new(self.properties(), &self.current_state())
    }
}
