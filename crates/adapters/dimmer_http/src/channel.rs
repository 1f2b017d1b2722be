//! One PWM channel of a dimmer board, exposed as a [`Light`].

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use huebridge_app::ports::Light;
use huebridge_domain::error::{DeviceError, ProtocolError};
use huebridge_domain::light::{LightProperties, LightState, LightType, MAX_BRIGHTNESS};

use crate::error::DimmerError;
use crate::scaling;

/// Marker a board includes in the body of every accepted write.
const SUCCESS_MARKER: &str = "Ok";

/// A GPIO channel on a networked dimmer board.
///
/// All hardware operations on one channel are serialized by an async lock.
/// The cached state sits behind a separate short-lived lock so readers are
/// never blocked by a request in flight.
pub struct DimmerChannel {
    props: LightProperties,
    light_type: LightType,
    base_url: String,
    gpio: u8,
    client: reqwest::Client,
    io_lock: tokio::sync::Mutex<()>,
    state: RwLock<LightState>,
}

impl std::fmt::Debug for DimmerChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimmerChannel")
            .field("name", &self.props.name)
            .field("base_url", &self.base_url)
            .field("gpio", &self.gpio)
            .field("light_type", &self.light_type)
            .finish_non_exhaustive()
    }
}

impl DimmerChannel {
    /// Create a channel driver for `gpio` on the board at `address`.
    ///
    /// `client` is normally a clone of one shared client so connections
    /// to the same board are pooled. A trailing `/` is added to the address
    /// if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DimmerError::InvalidAddress`] if `address` is not an
    /// `http` or `https` URL.
    pub fn new(
        client: reqwest::Client,
        props: LightProperties,
        light_type: LightType,
        address: &str,
        gpio: u8,
    ) -> Result<Self, DimmerError> {
        let base_url = normalize_address(address)?;
        Ok(Self {
            props,
            light_type,
            base_url,
            gpio,
            client,
            io_lock: tokio::sync::Mutex::new(()),
            state: RwLock::new(LightState::default()),
        })
    }

    /// Normalized base URL of the board, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GPIO number of the channel.
    #[must_use]
    pub fn gpio(&self) -> u8 {
        self.gpio
    }

    /// Dimmable or switchable.
    #[must_use]
    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    fn read_url(&self) -> String {
        format!("{}getPwmDuty?gpio={}", self.base_url, self.gpio)
    }

    fn write_url(&self, duty: u16) -> String {
        let action = match self.light_type {
            LightType::Dimmable => "fadePwmDuty",
            LightType::Switchable => "setPwmDuty",
        };
        format!("{}{action}?gpio={}&duty={duty}", self.base_url, self.gpio)
    }

    async fn fetch(&self, url: &str) -> Result<String, DimmerError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DimmerError::Request)?;
        response.text().await.map_err(DimmerError::Request)
    }

    async fn read_brightness(&self) -> Result<u8, DeviceError> {
        let body = self.fetch(&self.read_url()).await?;
        let duty = scaling::parse_duty(&body)?;
        Ok(scaling::duty_to_brightness(duty))
    }

    async fn write_duty(&self, duty: u16) -> Result<(), DeviceError> {
        let body = self.fetch(&self.write_url(duty)).await?;
        if body.contains(SUCCESS_MARKER) {
            Ok(())
        } else {
            Err(ProtocolError::MissingSuccessMarker { body }.into())
        }
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, LightState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Light for DimmerChannel {
    fn properties(&self) -> &LightProperties {
        &self.props
    }

    fn current_state(&self) -> LightState {
        self.state
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |g| g.clone())
    }

    async fn refresh(&self) -> Result<LightState, DeviceError> {
        let _io = self.io_lock.lock().await;
        tracing::debug!(url = %self.read_url(), "reading dimmer duty");

        match self.read_brightness().await {
            Ok(brightness) => {
                let mut state = self.state_mut();
                let mut next = state.clone().with_measured_brightness(brightness);
                next.mark_reachable(true);
                *state = next.clone();
                Ok(next)
            }
            Err(err) => {
                tracing::warn!(light = %self.props.name, error = %err, "dimmer refresh failed");
                self.state_mut().mark_reachable(false);
                Err(err)
            }
        }
    }

    async fn apply_state(&self, requested: LightState) -> Result<LightState, DeviceError> {
        let _io = self.io_lock.lock().await;
        let brightness = requested.effective_brightness();
        let duty = scaling::duty_for(self.light_type, brightness);
        tracing::debug!(url = %self.write_url(duty), brightness, duty, "writing dimmer duty");

        match self.write_duty(duty).await {
            Ok(()) => {
                let written = match self.light_type {
                    LightType::Dimmable => brightness,
                    LightType::Switchable if duty > 0 => MAX_BRIGHTNESS,
                    LightType::Switchable => 0,
                };
                let mut next = requested;
                next.brightness = written;
                next.on = written > 0;
                next.mark_reachable(true);
                *self.state_mut() = next.clone();
                Ok(next)
            }
            Err(err) => {
                tracing::warn!(light = %self.props.name, error = %err, "dimmer write failed");
                if err.is_unreachable() {
                    self.state_mut().mark_reachable(false);
                }
                Err(err)
            }
        }
    }
}

fn normalize_address(address: &str) -> Result<String, DimmerError> {
    let invalid = |reason: String| DimmerError::InvalidAddress {
        address: address.to_string(),
        reason,
    };
    let url = reqwest::Url::parse(address).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    let mut base = address.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}
