//! # huebridge-adapter-dimmer-http
//!
//! Light driver for PWM dimmer boards that expose their channels over a
//! small query-string HTTP API.
//!
//! ## Wire protocol
//!
//! | Operation | Request | Success body |
//! |-----------|---------|--------------|
//! | Read duty | `GET <base>getPwmDuty?gpio=<n>` | decimal duty, `0..=1023` |
//! | Fade to duty | `GET <base>fadePwmDuty?gpio=<n>&duty=<d>` | contains `Ok` |
//! | Set duty | `GET <base>setPwmDuty?gpio=<n>&duty=<d>` | contains `Ok` |
//!
//! Dimmable channels fade, switchable channels jump between `0` and `1023`.
//! See [`scaling`] for the brightness/duty conversion.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `huebridge-app` and `huebridge-domain`.

mod channel;
mod config;
mod error;
pub mod scaling;

pub use channel::DimmerChannel;
pub use config::DimmerConfig;
pub use error::DimmerError;
