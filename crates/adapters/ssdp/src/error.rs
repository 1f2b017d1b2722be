//! SSDP adapter error types.

use std::net::SocketAddr;

/// Errors raised while setting up discovery. Failures while serving are
/// logged and do not stop the advertiser.
#[derive(Debug, thiserror::Error)]
pub enum SsdpError {
    /// The SSDP socket could not be bound.
    #[error("failed to bind SSDP socket on {addr}")]
    Bind {
        /// Requested local address.
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Joining the multicast group failed.
    #[error("failed to join the SSDP multicast group")]
    JoinMulticast(#[source] std::io::Error),

    /// The outbound address could not be determined.
    #[error("failed to determine the outbound address")]
    OutboundAddress(#[source] std::io::Error),
}
