//! The advertiser task.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::MissedTickBehavior;

use crate::error::SsdpError;
use crate::message::{self, Advertisement, Inbound, NotifyKind};
use crate::{MAX_AGE_SECS, MULTICAST_ADDR};

/// Largest datagram read from the socket.
const MAX_DATAGRAM: usize = 2048;

/// Answers searches and keeps the bridge announced until shut down.
#[derive(Debug)]
pub struct SsdpAdvertiser {
    socket: UdpSocket,
    advertisement: Advertisement,
    notify_target: SocketAddr,
}

impl SsdpAdvertiser {
    /// Bind the SSDP port on all interfaces and join the multicast group
    /// through `interface`.
    ///
    /// The port is shared with other SSDP responders on the host.
    ///
    /// # Errors
    ///
    /// Returns [`SsdpError::Bind`] when port 1900 cannot be bound, or
    /// [`SsdpError::JoinMulticast`] when the group cannot be joined.
    #[allow(clippy::unused_async)]
    pub async fn bind(advertisement: Advertisement, interface: Ipv4Addr) -> Result<Self, SsdpError> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, MULTICAST_ADDR.port()));
        let socket = bind_shared(addr).map_err(|source| SsdpError::Bind { addr, source })?;
        socket
            .join_multicast_v4(*MULTICAST_ADDR.ip(), interface)
            .map_err(SsdpError::JoinMulticast)?;
        Ok(Self::new(socket, advertisement, SocketAddr::V4(MULTICAST_ADDR)))
    }

    /// Use an already bound socket. Notifications go to `notify_target`.
    #[must_use]
    pub fn new(socket: UdpSocket, advertisement: Advertisement, notify_target: SocketAddr) -> Self {
        Self {
            socket,
            advertisement,
            notify_target,
        }
    }

    /// Serve until `shutdown` resolves, then withdraw the advertisement.
    ///
    /// The socket is closed when this returns.
    pub async fn serve<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        let mut alive = tokio::time::interval(Duration::from_millis(MAX_AGE_SECS * 1000 / 2));
        alive.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut buf = [0u8; MAX_DATAGRAM];

        tracing::info!(location = %self.advertisement.location(), "SSDP advertiser started");

        loop {
            tokio::select! {
                () = shutdown.as_mut() => break,
                _ = alive.tick() => {
                    self.notify(NotifyKind::Alive).await;
                }
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok((len, peer)) => self.handle(&buf[..len], peer).await,
                    Err(err) => tracing::warn!(error = %err, "SSDP receive failed"),
                },
            }
        }

        self.notify(NotifyKind::ByeBye).await;
        tracing::info!("SSDP advertiser stopped");
    }

    async fn handle(&self, datagram: &[u8], peer: SocketAddr) {
        let Inbound::Search { search_target } = message::parse(datagram) else {
            return;
        };
        let Some(target) = self.advertisement.answer_target(&search_target) else {
            tracing::trace!(%peer, %search_target, "ignoring foreign search");
            return;
        };
        tracing::debug!(%peer, %search_target, "answering search");
        let response = self.advertisement.search_response(&target);
        if let Err(err) = self.socket.send_to(response.as_bytes(), peer).await {
            tracing::warn!(%peer, error = %err, "failed to answer search");
        }
    }

    async fn notify(&self, kind: NotifyKind) {
        let msg = self.advertisement.notify(kind);
        if let Err(err) = self.socket.send_to(msg.as_bytes(), self.notify_target).await {
            tracing::warn!(?kind, error = %err, "failed to send notification");
        }
    }
}

/// Bind a UDP socket that other processes may bind too.
///
/// Must be called within a tokio runtime.
fn bind_shared(addr: SocketAddr) -> std::io::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    #[cfg(all(unix, not(any(target_os = "solaris", target_os = "illumos"))))]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    UdpSocket::from_std(socket.into())
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    use super::*;

    async fn recv(socket: &UdpSocket) -> String {
        let mut buf = [0u8; MAX_DATAGRAM];
        let (len, _) = timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
            .await
            .expect("timed out waiting for a datagram")
            .unwrap();
        String::from_utf8_lossy(&buf[..len]).into_owned()
    }

    /// Start an advertiser on loopback whose notifications land on the
    /// returned `group` socket.
    async fn start() -> (
        SocketAddr,
        UdpSocket,
        oneshot::Sender<()>,
        tokio::task::JoinHandle<()>,
    ) {
        let group = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let advertiser = SsdpAdvertiser::new(
            socket,
            Advertisement::new(Ipv4Addr::LOCALHOST),
            group.local_addr().unwrap(),
        );
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(advertiser.serve(async {
            let _ = stopped.await;
        }));
        (addr, group, stop, task)
    }

    #[tokio::test]
    async fn should_share_the_ssdp_port() {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, MULTICAST_ADDR.port()));

        let first = bind_shared(addr).unwrap();
        let second = bind_shared(addr).unwrap();

        assert_eq!(first.local_addr().unwrap().port(), 1900);
        assert_eq!(second.local_addr().unwrap().port(), 1900);
    }

    #[tokio::test]
    async fn should_share_an_ephemeral_port() {
        let first = bind_shared("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        let second = bind_shared(addr).unwrap();

        assert_eq!(second.local_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn should_announce_on_start() {
        let (_, group, stop, task) = start().await;

        let msg = recv(&group).await;

        assert!(msg.contains("NTS: ssdp:alive"));
        stop.send(()).unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn should_answer_matching_search_only() {
        let (addr, _group, stop, task) = start().await;
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        client
            .send_to(
                b"M-SEARCH * HTTP/1.1\r\nST: urn:schemas-sonos-com:service:Queue:1\r\n\r\n",
                addr,
            )
            .await
            .unwrap();
        client
            .send_to(b"M-SEARCH * HTTP/1.1\r\nST: upnp:rootdevice\r\n\r\n", addr)
            .await
            .unwrap();
        let response = recv(&client).await;

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("\r\nST: upnp:rootdevice\r\n"));
        assert!(response.contains("\r\nLOCATION: http://127.0.0.1:8080/description.xml\r\n"));
        assert!(response.contains("\r\nhue-bridgeid: 001788FFFE29D301\r\n"));
        stop.send(()).unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn should_say_goodbye_on_shutdown() {
        let (_, group, stop, task) = start().await;

        stop.send(()).unwrap();
        task.await.unwrap();

        let mut saw_byebye = false;
        for _ in 0..4 {
            if recv(&group).await.contains("NTS: ssdp:byebye") {
                saw_byebye = true;
                break;
            }
        }
        assert!(saw_byebye);
    }
}
