//! Local address discovery.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use crate::error::SsdpError;

/// Determine the local IPv4 address used for outbound traffic.
///
/// Connects a throwaway UDP socket to a public address and reads back the
/// local end. Connecting a UDP socket sends nothing.
///
/// # Errors
///
/// Returns [`SsdpError::OutboundAddress`] if the host has no route.
pub fn outbound_ip() -> Result<Ipv4Addr, SsdpError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).map_err(SsdpError::OutboundAddress)?;
    socket
        .connect((Ipv4Addr::new(8, 8, 8, 8), 80))
        .map_err(SsdpError::OutboundAddress)?;
    match socket.local_addr().map_err(SsdpError::OutboundAddress)? {
        SocketAddr::V4(local) if !local.ip().is_unspecified() => Ok(*local.ip()),
        other => Err(SsdpError::OutboundAddress(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no usable outbound IPv4 address, got {other}"),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Advertisement;

    #[test]
    fn should_match_local_end_of_a_routed_socket() {
        // Hosts without a default route have nothing to compare against.
        let Ok(ip) = outbound_ip() else {
            return;
        };
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).unwrap();
        socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80)).unwrap();

        assert!(!ip.is_unspecified());
        assert_eq!(socket.local_addr().unwrap().ip(), ip);
    }

    #[test]
    fn should_announce_outbound_ip_in_location() {
        let Ok(ip) = outbound_ip() else {
            return;
        };

        let advertisement = Advertisement::new(ip);

        assert_eq!(
            advertisement.location(),
            format!("http://{ip}:8080/description.xml")
        );
    }
}
