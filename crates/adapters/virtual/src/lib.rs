//! # huebridge-adapter-virtual
//!
//! A light without hardware. It accepts every write, remembers it and
//! reports it back on refresh, which makes it useful to try the bridge
//! without a dimmer board and to exercise the HTTP surface in tests.
//!
//! Call [`VirtualLight::set_reachable`] with `false` to make every hardware
//! operation fail as if the device were unplugged.
//!
//! ## Dependency rule
//!
//! Depends on `huebridge-app` (port traits) and `huebridge-domain` only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use huebridge_app::ports::Light;
use huebridge_domain::error::DeviceError;
use huebridge_domain::light::{LightProperties, LightState, LightType, MAX_BRIGHTNESS};

/// A simulated light.
#[derive(Debug)]
pub struct VirtualLight {
    props: LightProperties,
    light_type: LightType,
    state: RwLock<LightState>,
    online: AtomicBool,
}

impl VirtualLight {
    /// Create a light that starts off and online.
    #[must_use]
    pub fn new(props: LightProperties, light_type: LightType) -> Self {
        Self {
            props,
            light_type,
            state: RwLock::new(LightState::default()),
            online: AtomicBool::new(true),
        }
    }

    /// Simulate plugging the light in or out.
    pub fn set_reachable(&self, reachable: bool) {
        self.online.store(reachable, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), DeviceError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            self.update(|state| state.mark_reachable(false));
            Err(DeviceError::unreachable(format!(
                "virtual light {:?} is switched off at the wall",
                self.props.name
            )))
        }
    }

    fn update(&self, f: impl FnOnce(&mut LightState)) -> LightState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
        state.clone()
    }
}

impl Light for VirtualLight {
    fn properties(&self) -> &LightProperties {
        &self.props
    }

    fn current_state(&self) -> LightState {
        self.state
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |g| g.clone())
    }

    async fn refresh(&self) -> Result<LightState, DeviceError> {
        self.check_online()?;
        Ok(self.update(|state| state.mark_reachable(true)))
    }

    async fn apply_state(&self, requested: LightState) -> Result<LightState, DeviceError> {
        self.check_online()?;
        let brightness = match (self.light_type, requested.effective_brightness()) {
            (LightType::Switchable, b) if b >= MAX_BRIGHTNESS / 2 => MAX_BRIGHTNESS,
            (LightType::Switchable, _) => 0,
            (LightType::Dimmable, b) => b,
        };
        tracing::debug!(light = %self.props.name, brightness, "virtual light updated");
        Ok(self.update(|state| {
            *state = requested;
            state.brightness = brightness;
            state.on = brightness > 0;
            state.mark_reachable(true);
        }))
    }
}
