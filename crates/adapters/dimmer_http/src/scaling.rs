//! Brightness ↔ PWM duty conversion.
//!
//! Brightness lives in `0..=255`, duty in `0..=1023`. Writes scale up and
//! round toward the next duty step; reads truncate. Every brightness
//! therefore survives a write followed by a read, while a duty set by
//! something other than the bridge may be snapped to the nearest grid
//! value the next time the bridge writes it.

use huebridge_domain::error::ProtocolError;
use huebridge_domain::light::{LightType, MAX_BRIGHTNESS};

/// Highest duty a channel accepts.
pub const MAX_DUTY: u16 = 1023;

/// Lowest brightness that turns a switchable channel fully on.
pub const SWITCH_THRESHOLD: u8 = 127;

/// Convert a measured duty into a brightness. Values above [`MAX_DUTY`]
/// saturate.
#[must_use]
pub fn duty_to_brightness(duty: u16) -> u8 {
    u8::try_from(duty.min(MAX_DUTY) / 4).unwrap_or(MAX_BRIGHTNESS)
}

/// Duty written to a dimmable channel for `brightness`.
#[must_use]
pub fn brightness_to_duty(brightness: u8) -> u16 {
    let scaled = (u32::from(brightness) * u32::from(MAX_DUTY)).div_ceil(u32::from(MAX_BRIGHTNESS));
    u16::try_from(scaled).unwrap_or(MAX_DUTY)
}

/// Duty written to a switchable channel for `brightness`.
#[must_use]
pub fn switch_duty(brightness: u8) -> u16 {
    if brightness >= SWITCH_THRESHOLD {
        MAX_DUTY
    } else {
        0
    }
}

/// Duty written for `brightness` on a channel of the given type.
#[must_use]
pub fn duty_for(light_type: LightType, brightness: u8) -> u16 {
    match light_type {
        LightType::Dimmable => brightness_to_duty(brightness),
        LightType::Switchable => switch_duty(brightness),
    }
}

/// Parse the body of a duty read.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`ProtocolError::MalformedResponse`] when the body is not a decimal
/// integer, [`ProtocolError::ValueOutOfRange`] when it is outside
/// `0..=1023`.
pub fn parse_duty(body: &str) -> Result<u16, ProtocolError> {
    let value: i64 = body
        .trim()
        .parse()
        .map_err(|_| ProtocolError::MalformedResponse {
            body: body.to_string(),
        })?;
    u16::try_from(value)
        .ok()
        .filter(|duty| *duty <= MAX_DUTY)
        .ok_or(ProtocolError::ValueOutOfRange {
            value,
            max: i64::from(MAX_DUTY),
        })
}
