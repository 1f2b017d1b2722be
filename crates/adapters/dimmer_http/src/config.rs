//! Dimmer driver configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::DimmerError;

/// Settings shared by every dimmer channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DimmerConfig {
    /// Bound applied to connection setup, idle pooled connections, TCP
    /// keep-alive and whole requests, in seconds.
    pub timeout_secs: u16,
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

impl DimmerConfig {
    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_secs))
    }

    /// Build the connection-pooling HTTP client shared by all channels.
    ///
    /// The connect timeout covers both TCP and TLS establishment.
    ///
    /// # Errors
    ///
    /// Returns [`DimmerError::Client`] if the client cannot be initialised.
    pub fn build_client(&self) -> Result<reqwest::Client, DimmerError> {
        let timeout = self.timeout();
        reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .pool_idle_timeout(timeout)
            .tcp_keepalive(timeout)
            .build()
            .map_err(DimmerError::Client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_fifteen_seconds() {
        let config = DimmerConfig::default();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let config: DimmerConfig = toml::from_str("timeout_secs = 3").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: DimmerConfig = toml::from_str("").unwrap();
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn should_build_client() {
        assert!(DimmerConfig::default().build_client().is_ok());
    }
}
