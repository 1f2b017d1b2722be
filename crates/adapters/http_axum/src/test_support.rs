//! Scriptable [`Light`] for router tests.

use std::sync::Mutex;

use huebridge_app::ports::Light;
use huebridge_domain::error::{DeviceError, ProtocolError};
use huebridge_domain::light::{LightProperties, LightState};

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Unreachable,
    Reject,
}

pub struct StubLight {
    props: LightProperties,
    state: Mutex<LightState>,
    behaviour: Mutex<Behaviour>,
}

impl StubLight {
    pub fn named(name: &str) -> Self {
        Self {
            props: LightProperties::builder().name(name).build().unwrap(),
            state: Mutex::new(LightState::default()),
            behaviour: Mutex::new(Behaviour::Succeed),
        }
    }

    pub fn set_behaviour(&self, behaviour: Behaviour) {
        *self.behaviour.lock().unwrap() = behaviour;
    }

    fn outcome(&self) -> Result<(), DeviceError> {
        match *self.behaviour.lock().unwrap() {
            Behaviour::Succeed => Ok(()),
            Behaviour::Unreachable => Err(DeviceError::unreachable("connection refused")),
            Behaviour::Reject => Err(ProtocolError::MissingSuccessMarker {
                body: "Fail".to_string(),
            }
            .into()),
        }
    }
}

impl Light for StubLight {
    fn properties(&self) -> &LightProperties {
        &self.props
    }

    fn current_state(&self) -> LightState {
        self.state.lock().unwrap().clone()
    }

    async fn refresh(&self) -> Result<LightState, DeviceError> {
        self.outcome()?;
        Ok(self.current_state())
    }

    async fn apply_state(&self, requested: LightState) -> Result<LightState, DeviceError> {
        self.outcome()?;
        let mut state = self.state.lock().unwrap();
        *state = requested;
        Ok(state.clone())
    }
}
