//! Light service: use-cases behind the bridge's light API.
//!
//! Resolves external ids through the [`LightRegistry`], renders descriptors
//! and translates set-state commands into a requested [`LightState`] for the
//! resolved driver.

use huebridge_domain::command::LightCommand;
use huebridge_domain::error::BridgeError;
use huebridge_domain::id::LightId;
use huebridge_domain::light::{LightDescriptor, LightState, StateDescriptor};

use crate::ports::Light;
use crate::registry::LightRegistry;

/// Result of a successfully dispatched set-state command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAck {
    /// The light the command was dispatched to.
    pub id: LightId,
    /// The `on` value that was requested.
    pub on: bool,
    /// The brightness that was requested, after defaulting.
    pub brightness: u8,
}

/// Application service for light queries and commands.
pub struct LightService<L> {
    registry: LightRegistry<L>,
}

impl<L: Light> LightService<L> {
    /// Create a new service over the given registry.
    pub fn new(registry: LightRegistry<L>) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &LightRegistry<L> {
        &self.registry
    }

    /// Describe every light, in id order.
    pub fn list_lights(&self) -> Vec<(LightId, LightDescriptor)> {
        self.registry
            .iter()
            .map(|(id, light)| (id, light.describe()))
            .collect()
    }

    /// Describe a single light.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Resolution`] when `raw_id` does not name a light.
    #[tracing::instrument(skip(self))]
    pub fn get_light(&self, raw_id: &str) -> Result<LightDescriptor, BridgeError> {
        let (_, light) = self.registry.resolve(raw_id)?;
        Ok(light.describe())
    }

    /// The cached state of a single light. No hardware probe is made.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Resolution`] when `raw_id` does not name a light.
    #[tracing::instrument(skip(self))]
    pub fn get_state(&self, raw_id: &str) -> Result<StateDescriptor, BridgeError> {
        let (_, light) = self.registry.resolve(raw_id)?;
        Ok(StateDescriptor::from(&light.current_state()))
    }

    /// Parse a raw command body and dispatch it to the light.
    ///
    /// The id is resolved before the body is looked at, so an unknown light
    /// is reported as such whatever the body contains.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Resolution`] for an unknown id,
    /// [`BridgeError::Command`] for a malformed body, or
    /// [`BridgeError::Device`] when the driver fails.
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn set_state(&self, raw_id: &str, body: &[u8]) -> Result<CommandAck, BridgeError> {
        let (id, light) = self.registry.resolve(raw_id)?;
        let command = LightCommand::from_slice(body)?;
        Self::dispatch(id, light, command).await
    }

    /// Dispatch an already parsed command to a light.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Resolution`] for an unknown id or
    /// [`BridgeError::Device`] when the driver fails.
    pub async fn send_command(
        &self,
        id: LightId,
        command: LightCommand,
    ) -> Result<CommandAck, BridgeError> {
        let light = self.registry.get(id)?;
        Self::dispatch(id, light, command).await
    }

    async fn dispatch(
        id: LightId,
        light: &L,
        command: LightCommand,
    ) -> Result<CommandAck, BridgeError> {
        let command = command.normalized();
        let requested: LightState = command.to_state(&light.current_state());
        tracing::debug!(
            light = %id,
            on = command.on,
            bri = command.brightness,
            "dispatching command"
        );

        light.apply_state(requested).await.map_err(|err| {
            tracing::warn!(light = %id, error = %err, "command failed");
            err
        })?;

        Ok(CommandAck {
            id,
            on: command.on,
            brightness: command.brightness,
        })
    }

    /// Refresh every light from its hardware, one after the other.
    ///
    /// Failures are logged and counted; they never abort the sweep.
    pub async fn refresh_all(&self) -> usize {
        let mut failures = 0;
        for (id, light) in self.registry.iter() {
            match light.refresh().await {
                Ok(state) => {
                    tracing::debug!(light = %id, bri = state.brightness, on = state.on, "light refreshed");
                }
                Err(err) => {
                    failures += 1;
                    tracing::warn!(light = %id, error = %err, "light refresh failed");
                }
            }
        }
        failures
    }
}
