//! Light: the state model and static description of a bridged light.
//!
//! A light is described by immutable [`LightProperties`] fixed at
//! construction and a mutable [`LightState`] owned by the driver. The
//! [`LightDescriptor`] is the rendering the bridge API hands out.

mod descriptor;
mod properties;
mod state;

pub use descriptor::{LightDescriptor, StateDescriptor};
pub use properties::{LightProperties, LightPropertiesBuilder, LightType};
pub use state::{Alert, Effect, LightState, MAX_BRIGHTNESS};
