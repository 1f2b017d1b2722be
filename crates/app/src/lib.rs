//! # huebridge-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **device port** every light driver implements:
//!   - `Light`: properties, cached state, refresh, apply, describe
//! - Hold the **light registry**: a fixed, 1-indexed list of drivers that
//!   resolves external light ids
//! - Define **driving/inbound use-cases**:
//!   - `LightService`: list/show lights, read state, translate and dispatch
//!     set-state commands
//!   - `poll_loop`: background refresh of every light's state
//! - Orchestrate domain objects without knowing *how* hardware IO works
//!
//! ## Dependency rule
//! Depends on `huebridge-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod registry;
pub mod services;

#[cfg(test)]
mod test_support;
