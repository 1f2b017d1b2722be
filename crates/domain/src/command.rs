//! Command: the simplified set-state request sent by the voice assistant.
//!
//! The assistant only ever sends `{"on": bool, "bri": 0..=255}`. Both fields
//! are optional on the wire; a missing `on` reads as `false` and a missing
//! `bri` as `0`.

use serde::Deserialize;

use crate::error::CommandError;
use crate::light::{LightState, MAX_BRIGHTNESS};

/// An inbound `PUT …/state` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct LightCommand {
    #[serde(default)]
    pub on: bool,
    #[serde(default, rename = "bri")]
    pub brightness: u8,
}

impl LightCommand {
    /// Parse a raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidBody`] when the body is not a JSON
    /// object of the expected shape (including `bri` outside `0..=255`).
    pub fn from_slice(body: &[u8]) -> Result<Self, CommandError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Apply the bridge defaulting rule: turning a light on without a
    /// brightness means full brightness. An `off` command keeps whatever
    /// brightness it carries.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.on && self.brightness == 0 {
            Self {
                brightness: MAX_BRIGHTNESS,
                ..self
            }
        } else {
            self
        }
    }

    /// Build the requested state from the light's current state, replacing
    /// only `on` and brightness. Every other field is carried over so a
    /// command never resets fields it does not mention.
    #[must_use]
    pub fn to_state(self, current: &LightState) -> LightState {
        let mut state = current.clone();
        state.on = self.on;
        state.brightness = self.brightness;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Alert;

    #[test]
    fn should_parse_full_command() {
        let cmd = LightCommand::from_slice(br#"{"on": true, "bri": 128}"#).unwrap();
        assert_eq!(
            cmd,
            LightCommand {
                on: true,
                brightness: 128
            }
        );
    }

    #[test]
    fn should_default_missing_fields() {
        let cmd = LightCommand::from_slice(br#"{"on": true}"#).unwrap();
        assert_eq!(cmd.brightness, 0);
        let cmd = LightCommand::from_slice(b"{}").unwrap();
        assert!(!cmd.on);
    }

    #[test]
    fn should_ignore_unknown_fields() {
        let cmd = LightCommand::from_slice(br#"{"on": false, "bri": 3, "hue": 100}"#).unwrap();
        assert_eq!(cmd.brightness, 3);
    }

    #[test]
    fn should_reject_malformed_bodies() {
        assert!(LightCommand::from_slice(b"not json").is_err());
        assert!(LightCommand::from_slice(b"").is_err());
        assert!(LightCommand::from_slice(br#"{"on": "yes"}"#).is_err());
        assert!(LightCommand::from_slice(br#"{"bri": 256}"#).is_err());
        assert!(LightCommand::from_slice(br#"{"bri": -1}"#).is_err());
        assert!(LightCommand::from_slice(b"[true, 3]").is_err());
    }

    #[test]
    fn should_default_to_full_brightness_when_turned_on_without_brightness() {
        let cmd = LightCommand {
            on: true,
            brightness: 0,
        }
        .normalized();
        assert_eq!(cmd.brightness, 255);
    }

    #[test]
    fn should_keep_supplied_brightness_when_turned_on() {
        let cmd = LightCommand {
            on: true,
            brightness: 12,
        }
        .normalized();
        assert_eq!(cmd.brightness, 12);
    }

    #[test]
    fn should_not_override_brightness_when_turned_off() {
        for brightness in [0, 100, 255] {
            let cmd = LightCommand {
                on: false,
                brightness,
            }
            .normalized();
            assert_eq!(cmd.brightness, brightness);
            assert!(!cmd.on);
        }
    }

    #[test]
    fn should_only_replace_on_and_brightness() {
        let mut current = LightState::default();
        current.hue = 13088;
        current.saturation = 212;
        current.color_temperature = 467;
        current.alert = Alert::Other("select".to_string());
        current.mark_reachable(false);

        let state = LightCommand {
            on: true,
            brightness: 144,
        }
        .to_state(&current);

        assert!(state.on);
        assert_eq!(state.brightness, 144);
        assert_eq!(state.hue, 13088);
        assert_eq!(state.saturation, 212);
        assert_eq!(state.color_temperature, 467);
        assert_eq!(state.alert, Alert::Other("select".to_string()));
        assert!(!state.reachable());
    }
}
