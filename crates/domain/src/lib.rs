//! # huebridge-domain
//!
//! Pure domain model for the huebridge light bridge.
//!
//! ## Responsibilities
//! - Foundational types: the 1-based [`LightId`](id::LightId) and the error
//!   taxonomy shared by every layer
//! - Define the **state model** of a light ([`LightState`](light::LightState))
//!   and its static description ([`LightProperties`](light::LightProperties))
//! - Define the bridge **descriptor** rendering (the JSON subset the voice
//!   assistant reads)
//! - Define the inbound **command** (`{"on": …, "bri": …}`) and its
//!   translation into a requested [`LightState`](light::LightState)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod command;
pub mod light;
