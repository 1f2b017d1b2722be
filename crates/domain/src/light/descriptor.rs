//! Descriptor: the bridge's JSON rendering of a light.
//!
//! Field order is part of the contract and follows declaration order:
//! `name, type, modelid, uniqueid, swversion, manufacturername, state`,
//! and within `state`: `on, bri, hue, sat, ct, alert, effect, reachable`.

use serde::Serialize;

use super::{Alert, Effect, LightProperties, LightState};

/// The `state` object as the bridge reports it. Color point and color mode
/// are intentionally absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDescriptor {
    pub on: bool,
    pub bri: u8,
    pub hue: i16,
    pub sat: u8,
    pub ct: i16,
    pub alert: Alert,
    pub effect: Effect,
    pub reachable: bool,
}

impl From<&LightState> for StateDescriptor {
    fn from(state: &LightState) -> Self {
        Self {
            on: state.on,
            bri: state.brightness,
            hue: state.hue,
            sat: state.saturation,
            ct: state.color_temperature,
            alert: state.alert.clone(),
            effect: state.effect.clone(),
            reachable: state.reachable(),
        }
    }
}

/// Full light descriptor as returned by the list and show endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    #[serde(rename = "modelid")]
    pub model_id: String,
    #[serde(rename = "uniqueid")]
    pub unique_id: String,
    #[serde(rename = "swversion")]
    pub sw_version: String,
    #[serde(rename = "manufacturername")]
    pub manufacturer: String,
    pub state: StateDescriptor,
}

impl LightDescriptor {
    /// Combine static properties with a state snapshot.
    #[must_use]
    pub fn new(props: &LightProperties, state: &LightState) -> Self {
        Self {
            name: props.name.clone(),
            type_label: props.type_label.clone(),
            model_id: props.model_id.clone(),
            unique_id: props.unique_id.clone(),
            sw_version: props.sw_version.clone(),
            manufacturer: props.manufacturer.clone(),
            state: StateDescriptor::from(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> LightProperties {
        LightProperties::builder()
            .name("Living Room 1")
            .build()
            .unwrap()
    }

    #[test]
    fn should_render_fields_in_bridge_order() {
        let state = LightState::default().with_measured_brightness(144);
        let json = serde_json::to_string(&LightDescriptor::new(&props(), &state)).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"name":"Living Room 1","type":"Dimmable light","modelid":"LCT010","#,
                r#""uniqueid":"00:17:88:5E:D3:FF-01","swversion":"66012040","#,
                r#""manufacturername":"Philips","state":{"on":true,"bri":144,"hue":0,"#,
                r#""sat":0,"ct":0,"alert":"none","effect":"none","reachable":true}}"#
            )
        );
    }

    #[test]
    fn should_report_unreachable_state() {
        let mut state = LightState::default();
        state.mark_reachable(false);
        let descriptor = LightDescriptor::new(&props(), &state);
        assert!(!descriptor.state.reachable);
    }

    #[test]
    fn should_omit_color_point_and_mode() {
        let json = serde_json::to_value(StateDescriptor::from(&LightState::default())).unwrap();
        assert!(json.get("xy").is_none());
        assert!(json.get("colormode").is_none());
    }
}
