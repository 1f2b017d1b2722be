//! Light properties: the static description of a light.

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, ValidationError};

const DEFAULT_UNIQUE_ID: &str = "00:17:88:5E:D3:FF-01";
const DEFAULT_MODEL_ID: &str = "LCT010";
const DEFAULT_SW_VERSION: &str = "66012040";
const DEFAULT_MANUFACTURER: &str = "Philips";

/// How a light maps brightness onto its hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    /// Binary on/off only.
    Switchable,
    /// Continuous brightness.
    #[default]
    Dimmable,
}

impl LightType {
    /// The device-type label reported to the voice assistant.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Switchable => "On/Off plug-in unit",
            Self::Dimmable => "Dimmable light",
        }
    }
}

/// Static description of a light. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightProperties {
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    #[serde(rename = "uniqueid")]
    pub unique_id: String,
    #[serde(rename = "modelid")]
    pub model_id: String,
    #[serde(rename = "swversion")]
    pub sw_version: String,
    #[serde(rename = "manufacturername")]
    pub manufacturer: String,
}

impl LightProperties {
    /// Create a builder for constructing [`LightProperties`].
    #[must_use]
    pub fn builder() -> LightPropertiesBuilder {
        LightPropertiesBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] when `name` or `unique_id` is empty.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.unique_id.is_empty() {
            return Err(ValidationError::EmptyUniqueId.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`LightProperties`].
///
/// Every field except the name defaults to the values of a stock bridge
/// bulb, so `LightProperties::builder().name("Desk").build()` yields a
/// light the voice assistant accepts.
#[derive(Debug, Default)]
pub struct LightPropertiesBuilder {
    name: Option<String>,
    light_type: LightType,
    unique_id: Option<String>,
    model_id: Option<String>,
    sw_version: Option<String>,
    manufacturer: Option<String>,
}

impl LightPropertiesBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Select the light type; this drives the reported device-type label.
    #[must_use]
    pub fn light_type(mut self, light_type: LightType) -> Self {
        self.light_type = light_type;
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    #[must_use]
    pub fn sw_version(mut self, sw_version: impl Into<String>) -> Self {
        self.sw_version = Some(sw_version.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Consume the builder, validate, and return [`LightProperties`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] if the name is missing or blank,
    /// or the unique id is empty.
    pub fn build(self) -> Result<LightProperties, BridgeError> {
        let props = LightProperties {
            name: self.name.unwrap_or_default(),
            type_label: self.light_type.label().to_string(),
            unique_id: self
                .unique_id
                .unwrap_or_else(|| DEFAULT_UNIQUE_ID.to_string()),
            model_id: self.model_id.unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            sw_version: self
                .sw_version
                .unwrap_or_else(|| DEFAULT_SW_VERSION.to_string()),
            manufacturer: self
                .manufacturer
                .unwrap_or_else(|| DEFAULT_MANUFACTURER.to_string()),
        };
        props.validate()?;
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_with_bridge_defaults() {
        let props = LightProperties::builder()
            .name("Living Room 1")
            .build()
            .unwrap();
        assert_eq!(props.name, "Living Room 1");
        assert_eq!(props.type_label, "Dimmable light");
        assert_eq!(props.unique_id, "00:17:88:5E:D3:FF-01");
        assert_eq!(props.model_id, "LCT010");
        assert_eq!(props.sw_version, "66012040");
        assert_eq!(props.manufacturer, "Philips");
    }

    #[test]
    fn should_label_switchable_lights() {
        let props = LightProperties::builder()
            .name("Fan")
            .light_type(LightType::Switchable)
            .build()
            .unwrap();
        assert_eq!(props.type_label, "On/Off plug-in unit");
    }

    #[test]
    fn should_override_defaults() {
        let props = LightProperties::builder()
            .name("Porch")
            .unique_id("00:17:88:5E:D3:02-01")
            .model_id("LWB010")
            .sw_version("1.0")
            .manufacturer("Acme")
            .build()
            .unwrap();
        assert_eq!(props.unique_id, "00:17:88:5E:D3:02-01");
        assert_eq!(props.model_id, "LWB010");
        assert_eq!(props.sw_version, "1.0");
        assert_eq!(props.manufacturer, "Acme");
    }

    #[test]
    fn should_reject_missing_name() {
        let result = LightProperties::builder().build();
        assert!(matches!(
            result,
            Err(BridgeError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_blank_name() {
        let result = LightProperties::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(BridgeError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_empty_unique_id() {
        let result = LightProperties::builder().name("Desk").unique_id("").build();
        assert!(matches!(
            result,
            Err(BridgeError::Validation(ValidationError::EmptyUniqueId))
        ));
    }

    #[test]
    fn should_deserialize_light_type_from_snake_case() {
        let ty: LightType = serde_json::from_str("\"switchable\"").unwrap();
        assert_eq!(ty, LightType::Switchable);
        let ty: LightType = serde_json::from_str("\"dimmable\"").unwrap();
        assert_eq!(ty, LightType::Dimmable);
    }
}
