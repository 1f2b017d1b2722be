//! SSDP message building and parsing.
//!
//! Messages are HTTP-over-UDP: a start line, `NAME: value` headers
//! separated by CRLF, and an empty line.

use std::net::Ipv4Addr;

use crate::{BRIDGE_ID, DEVICE_UUID, HTTP_PORT, MAX_AGE_SECS, MULTICAST_ADDR, SERVICE_TYPE};

/// Product token sent in `SERVER`.
pub const SERVER_TOKEN: &str = "Linux/3.14 UPnP/1.0 IpBridge/1.17.0";

/// Search target matching every device.
pub const ST_ALL: &str = "ssdp:all";

/// Search target matching every root device.
pub const ST_ROOT_DEVICE: &str = "upnp:rootdevice";

/// What an inbound datagram asks of the advertiser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// An `M-SEARCH` request for the given search target.
    Search {
        /// Value of the `ST` header.
        search_target: String,
    },
    /// Anything else: other devices' `NOTIFY`, search responses, garbage.
    Ignored,
}

/// Classify a raw datagram.
#[must_use]
pub fn parse(datagram: &[u8]) -> Inbound {
    let Ok(text) = std::str::from_utf8(datagram) else {
        return Inbound::Ignored;
    };
    let mut lines = text.lines();
    let is_search = lines
        .next()
        .and_then(|line| line.split_whitespace().next())
        .is_some_and(|method| method.eq_ignore_ascii_case("M-SEARCH"));
    if !is_search {
        return Inbound::Ignored;
    }
    lines
        .find_map(|line| extract_header_value(line.trim(), "ST:"))
        .map_or(Inbound::Ignored, |search_target| Inbound::Search { search_target })
}

/// Extract header value from a line like `HEADER: value`.
fn extract_header_value(line: &str, header: &str) -> Option<String> {
    let prefix = line.get(..header.len())?;
    if line.len() > header.len() && prefix.eq_ignore_ascii_case(header) {
        Some(line[header.len()..].trim().to_string())
    } else {
        None
    }
}

/// Whether the notification announces or withdraws the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Alive,
    ByeBye,
}

impl NotifyKind {
    fn nts(self) -> &'static str {
        match self {
            Self::Alive => "ssdp:alive",
            Self::ByeBye => "ssdp:byebye",
        }
    }
}

/// The bridge's advertisement, bound to the address it is reachable at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    location: String,
}

impl Advertisement {
    /// Advertise the description document served on `ip`.
    #[must_use]
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            location: format!("http://{ip}:{HTTP_PORT}/description.xml"),
        }
    }

    /// URL of the description document.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The search target to answer with, if `search_target` concerns this
    /// device.
    #[must_use]
    pub fn answer_target(&self, search_target: &str) -> Option<String> {
        let device = format!("uuid:{DEVICE_UUID}");
        if search_target.eq_ignore_ascii_case(ST_ALL) {
            Some(SERVICE_TYPE.to_string())
        } else if search_target.eq_ignore_ascii_case(ST_ROOT_DEVICE) {
            Some(ST_ROOT_DEVICE.to_string())
        } else if search_target.eq_ignore_ascii_case(SERVICE_TYPE) {
            Some(SERVICE_TYPE.to_string())
        } else if search_target.eq_ignore_ascii_case(&device) {
            Some(device)
        } else {
            None
        }
    }

    /// Unicast reply to an `M-SEARCH` for `target`.
    #[must_use]
    pub fn search_response(&self, target: &str) -> String {
        let mut msg = String::from("HTTP/1.1 200 OK\r\n");
        header(&mut msg, "CACHE-CONTROL", &format!("max-age={MAX_AGE_SECS}"));
        header(&mut msg, "EXT", "");
        header(&mut msg, "LOCATION", &self.location);
        header(&mut msg, "SERVER", SERVER_TOKEN);
        header(&mut msg, "ST", target);
        header(&mut msg, "USN", &usn(target));
        header(&mut msg, "hue-bridgeid", BRIDGE_ID);
        msg.push_str("\r\n");
        msg
    }

    /// Multicast `NOTIFY` announcing or withdrawing the service.
    #[must_use]
    pub fn notify(&self, kind: NotifyKind) -> String {
        let mut msg = String::from("NOTIFY * HTTP/1.1\r\n");
        header(&mut msg, "HOST", &MULTICAST_ADDR.to_string());
        if kind == NotifyKind::Alive {
            header(&mut msg, "CACHE-CONTROL", &format!("max-age={MAX_AGE_SECS}"));
            header(&mut msg, "LOCATION", &self.location);
            header(&mut msg, "SERVER", SERVER_TOKEN);
        }
        header(&mut msg, "NT", SERVICE_TYPE);
        header(&mut msg, "NTS", kind.nts());
        header(&mut msg, "USN", &usn(SERVICE_TYPE));
        header(&mut msg, "hue-bridgeid", BRIDGE_ID);
        msg.push_str("\r\n");
        msg
    }
}

fn usn(target: &str) -> String {
    let device = format!("uuid:{DEVICE_UUID}");
    if target == device {
        device
    } else {
        format!("{device}::{target}")
    }
}

fn header(msg: &mut String, name: &str, value: &str) {
    msg.push_str(name);
    msg.push_str(": ");
    msg.push_str(value);
    msg.push_str("\r\n");
}
