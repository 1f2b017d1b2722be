//! # huebridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the bridge light API under `/api/{user}/lights` in the wire
//!   format smart-home controllers expect
//! - Serve the UPnP description document at `/description.xml`
//! - Map application results and errors into bridge-style JSON
//!
//! Any user name is accepted; the bridge has no pairing.
//!
//! ## Dependency rule
//! Depends on `huebridge-app` (for port traits and services) and
//! `huebridge-domain` (for domain types used in response mapping). Never
//! leaks axum types into the domain.

pub mod api;
mod description;
mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
