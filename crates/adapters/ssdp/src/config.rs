//! Discovery configuration.

use std::net::Ipv4Addr;

use serde::Deserialize;

/// Discovery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SsdpConfig {
    /// Run the advertiser at all.
    pub enabled: bool,
    /// Address announced in `LOCATION`. Looked up with
    /// [`outbound_ip`](crate::outbound_ip) when unset.
    pub advertise_ip: Option<Ipv4Addr>,
}

impl Default for SsdpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            advertise_ip: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_enabled_by_default() {
        let config = SsdpConfig::default();
        assert!(config.enabled);
        assert!(config.advertise_ip.is_none());
    }

    #[test]
    fn should_deserialize_from_toml() {
        let config: SsdpConfig =
            toml::from_str("enabled = false\nadvertise_ip = \"192.168.1.20\"").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.advertise_ip, Some(Ipv4Addr::new(192, 168, 1, 20)));
    }
}
