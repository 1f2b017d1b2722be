//! # huebridge-adapter-ssdp
//!
//! Makes the bridge discoverable over SSDP (UDP multicast
//! `239.255.255.250:1900`).
//!
//! The advertised identity is fixed: clients look for a Hue bridge and
//! expect exactly these values.
//!
//! | Field | Value |
//! |-------|-------|
//! | Service type | [`SERVICE_TYPE`] |
//! | Device UUID | [`DEVICE_UUID`] |
//! | Location | `http://<ip>:8080/description.xml` |
//! | Max age | [`MAX_AGE_SECS`] seconds |
//! | `hue-bridgeid` | [`BRIDGE_ID`] |

use std::net::{Ipv4Addr, SocketAddrV4};

use uuid::{Uuid, uuid};

mod advertiser;
mod config;
mod error;
pub mod message;
mod net;

pub use advertiser::SsdpAdvertiser;
pub use config::SsdpConfig;
pub use error::SsdpError;
pub use message::Advertisement;
pub use net::outbound_ip;

/// SSDP multicast group and port.
pub const MULTICAST_ADDR: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(239, 255, 255, 250), 1900);

/// UPnP service type announced by the bridge.
pub const SERVICE_TYPE: &str = "urn:schemas-upnp-org:device:basic:1";

/// UUID of the emulated bridge device.
pub const DEVICE_UUID: Uuid = uuid!("2f402f80-da50-11e1-9b23-00178829d301");

/// Value of the `hue-bridgeid` header.
pub const BRIDGE_ID: &str = "001788FFFE29D301";

/// Advertisement lifetime announced in `CACHE-CONTROL`.
pub const MAX_AGE_SECS: u64 = 5;

/// Port the description document is served on. Clients assume it.
pub const HTTP_PORT: u16 = 8080;
