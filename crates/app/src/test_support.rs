//! In-memory [`Light`] used by the unit tests of this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use huebridge_domain::error::{DeviceError, ProtocolError};
use huebridge_domain::light::{LightProperties, LightState};

use crate::ports::Light;

/// How the next hardware call of a [`StubLight`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Succeed,
    Unreachable,
    Reject,
}

pub struct StubLight {
    props: LightProperties,
    state: Mutex<LightState>,
    behaviour: Mutex<Behaviour>,
    pub applied: Mutex<Vec<LightState>>,
    pub refreshes: AtomicUsize,
}

impl StubLight {
    pub fn named(name: &str) -> Self {
        Self {
            props: LightProperties::builder().name(name).build().unwrap(),
            state: Mutex::new(LightState::default()),
            behaviour: Mutex::new(Behaviour::Succeed),
            applied: Mutex::new(Vec::new()),
            refreshes: AtomicUsize::new(0),
        }
    }

    pub fn set_behaviour(&self, behaviour: Behaviour) {
        *self.behaviour.lock().unwrap() = behaviour;
    }

    fn outcome(&self) -> Result<(), DeviceError> {
        match *self.behaviour.lock().unwrap() {
            Behaviour::Succeed => Ok(()),
            Behaviour::Unreachable => Err(DeviceError::unreachable(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out",
            ))),
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
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        match self.outcome() {
            Ok(()) => {
                state.mark_reachable(true);
                Ok(state.clone())
            }
            Err(err) => {
                state.mark_reachable(false);
                Err(err)
            }
        }
    }

    async fn apply_state(&self, requested: LightState) -> Result<LightState, DeviceError> {
        self.applied.lock().unwrap().push(requested.clone());
        let mut state = self.state.lock().unwrap();
        match self.outcome() {
            Ok(()) => {
                *state = requested;
                state.mark_reachable(true);
                Ok(state.clone())
            }
            Err(err) => {
                if err.is_unreachable() {
                    state.mark_reachable(false);
                }
                Err(err)
            }
        }
    }
}
