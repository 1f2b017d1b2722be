//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `huebridge.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use huebridge_adapter_dimmer_http::DimmerConfig;
use huebridge_adapter_ssdp::SsdpConfig;
use huebridge_domain::light::LightType;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// SSDP discovery settings.
    pub discovery: SsdpConfig,
    /// Settings shared by all dimmer channels.
    pub dimmer: DimmerConfig,
    /// Background state polling.
    pub polling: PollingConfig,
    /// Bridged lights, in the order they are numbered.
    pub lights: Vec<LightConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Background polling configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between two sweeps. `0` disables polling.
    pub interval_secs: u64,
}

/// One bridged light.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightConfig {
    /// A channel of a networked dimmer board.
    Dimmer {
        name: String,
        /// Base URL of the board.
        address: String,
        gpio: u8,
        #[serde(default)]
        light_type: LightType,
    },
    /// An in-memory light.
    Virtual {
        name: String,
        #[serde(default)]
        light_type: LightType,
        /// Start out unreachable.
        #[serde(default)]
        offline: bool,
    },
}

impl LightConfig {
    /// Display name of the light.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Dimmer { name, .. } | Self::Virtual { name, .. } => name,
        }
    }
}

impl Config {
    /// Load configuration from `huebridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("huebridge.toml")?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HUEBRIDGE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("HUEBRIDGE_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("HUEBRIDGE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HUEBRIDGE_DISCOVERY")
            && let Some(enabled) = parse_flag(&val)
        {
            self.discovery.enabled = enabled;
        }
        if let Ok(val) = std::env::var("HUEBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Fill in derived defaults: dimmer addresses end with `/`, and an
    /// empty light list becomes a single virtual light.
    fn normalize(&mut self) {
        for light in &mut self.lights {
            if let LightConfig::Dimmer { address, .. } = light
                && !address.ends_with('/')
            {
                address.push('/');
            }
        }
        if self.lights.is_empty() {
            self.lights.push(LightConfig::Virtual {
                name: "Virtual Light".to_string(),
                light_type: LightType::Dimmable,
                offline: false,
            });
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if let Some(index) = self.lights.iter().position(|l| l.name().trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "light #{} has an empty name",
                index + 1
            )));
        }
        for light in &self.lights {
            if let LightConfig::Dimmer { name, address, .. } = light
                && !(address.starts_with("http://") || address.starts_with("https://"))
            {
                return Err(ConfigError::Validation(format!(
                    "light {name:?}: address {address:?} is not an http(s) URL"
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: huebridge_adapter_ssdp::HTTP_PORT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "huebridged=info,huebridge=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
