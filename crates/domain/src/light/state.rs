//! Light state: the last known operational state of a light.

use serde::{Deserialize, Serialize};

/// Brightness value meaning "fully on".
pub const MAX_BRIGHTNESS: u8 = u8::MAX;

/// Alert mode of a light. Only `none` is produced by the bridge; any other
/// value is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Alert {
    #[default]
    None,
    Other(String),
}

impl From<String> for Alert {
    fn from(value: String) -> Self {
        if value == "none" {
            Self::None
        } else {
            Self::Other(value)
        }
    }
}

impl From<Alert> for String {
    fn from(value: Alert) -> Self {
        match value {
            Alert::None => "none".to_string(),
            Alert::Other(other) => other,
        }
    }
}

/// Effect mode of a light. Only `none` is produced by the bridge; any other
/// value is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Effect {
    #[default]
    None,
    Other(String),
}

impl From<String> for Effect {
    fn from(value: String) -> Self {
        if value == "none" {
            Self::None
        } else {
            Self::Other(value)
        }
    }
}

impl From<Effect> for String {
    fn from(value: Effect) -> Self {
        match value {
            Effect::None => "none".to_string(),
            Effect::Other(other) => other,
        }
    }
}

/// Operational state of a light.
///
/// Hue, saturation, color point and color temperature are part of the
/// bridge contract but no current driver reads or writes them. Drivers only
/// act on [`on`](Self::on) and [`brightness`](Self::brightness).
///
/// `reachable` is private: it reflects the outcome of the most recent
/// hardware interaction and only drivers set it, through
/// [`mark_reachable`](Self::mark_reachable).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    pub on: bool,
    #[serde(rename = "bri")]
    pub brightness: u8,
    pub hue: i16,
    #[serde(rename = "sat")]
    pub saturation: u8,
    pub xy: [f32; 2],
    #[serde(rename = "ct")]
    pub color_temperature: i16,
    pub alert: Alert,
    pub effect: Effect,
    #[serde(rename = "colormode")]
    pub color_mode: String,
    reachable: bool,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: 0,
            hue: 0,
            saturation: 0,
            xy: [0.5, 0.5],
            color_temperature: 0,
            alert: Alert::None,
            effect: Effect::None,
            color_mode: "hs".to_string(),
            reachable: true,
        }
    }
}

impl LightState {
    /// Whether the most recent hardware interaction succeeded.
    #[must_use]
    pub fn reachable(&self) -> bool {
        self.reachable
    }

    /// Record the outcome of a hardware interaction. Drivers only.
    pub fn mark_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    /// Replace the brightness, deriving `on` from it the way a dimmer
    /// reports it (any non-zero brightness is on).
    #[must_use]
    pub fn with_measured_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self.on = brightness > 0;
        self
    }

    /// The brightness a driver should write: zero when the light is
    /// requested off, the requested brightness otherwise.
    #[must_use]
    pub fn effective_brightness(&self) -> u8 {
        if self.on { self.brightness } else { 0 }
    }
}
