//! Concrete light drivers behind one type.

use huebridge_adapter_dimmer_http::DimmerChannel;
use huebridge_adapter_virtual::VirtualLight;
use huebridge_app::ports::Light;
use huebridge_domain::error::{BridgeError, DeviceError};
use huebridge_domain::id::LightId;
use huebridge_domain::light::{LightProperties, LightState, LightType};

use crate::config::LightConfig;

/// Wrapper enum for the concrete driver types, so one registry can hold
/// every kind of light without dynamic dispatch.
#[derive(Debug)]
pub enum BridgeLight {
    Dimmer(DimmerChannel),
    Virtual(VirtualLight),
}

impl Light for BridgeLight {
    fn properties(&self) -> &LightProperties {
        match self {
            Self::Dimmer(l) => l.properties(),
            Self::Virtual(l) => l.properties(),
        }
    }

    fn current_state(&self) -> LightState {
        match self {
            Self::Dimmer(l) => l.current_state(),
            Self::Virtual(l) => l.current_state(),
        }
    }

    async fn refresh(&self) -> Result<LightState, DeviceError> {
        match self {
            Self::Dimmer(l) => l.refresh().await,
            Self::Virtual(l) => l.refresh().await,
        }
    }

    async fn apply_state(&self, state: LightState) -> Result<LightState, DeviceError> {
        match self {
            Self::Dimmer(l) => l.apply_state(state).await,
            Self::Virtual(l) => l.apply_state(state).await,
        }
    }
}

/// Unique id reported for the light at `id`. Controllers key their device
/// lists on it, so it must differ per light and stay stable across
/// restarts as long as the configured order does.
fn unique_id(id: LightId) -> String {
    let n = id.get();
    format!("00:17:88:5E:{:02X}:{:02X}-01", (n >> 8) & 0xFF, n & 0xFF)
}

fn properties(id: LightId, name: &str, light_type: LightType) -> Result<LightProperties, BridgeError> {
    LightProperties::builder()
        .name(name)
        .light_type(light_type)
        .unique_id(unique_id(id))
        .build()
}

/// Instantiate the configured lights, numbered in configuration order.
///
/// # Errors
///
/// Fails if a light has invalid properties or a dimmer address is unusable.
pub fn build(configs: &[LightConfig], client: &reqwest::Client) -> anyhow::Result<Vec<BridgeLight>> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            let id = LightId::from_index(index);
            let light = match config {
                LightConfig::Dimmer {
                    name,
                    address,
                    gpio,
                    light_type,
                } => BridgeLight::Dimmer(DimmerChannel::new(
                    client.clone(),
                    properties(id, name, *light_type)?,
                    *light_type,
                    address,
                    *gpio,
                )?),
                LightConfig::Virtual {
                    name,
                    light_type,
                    offline,
                } => {
                    let light = VirtualLight::new(properties(id, name, *light_type)?, *light_type);
                    light.set_reachable(!offline);
                    BridgeLight::Virtual(light)
                }
            };
            tracing::info!(%id, name = config.name(), "light configured");
            Ok(light)
        })
        .collect()
}
