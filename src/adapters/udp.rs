//! UDP datagram source.
//!
//! Binds the socket `rtl_433` sends its syslog output to and implements
//! [`DatagramSource`] with a plain blocking `recv_from` (no timeout).
//!
//! # Shutdown
//!
//! A blocked `recv_from` cannot be interrupted by a flag alone, so
//! [`ShutdownHandle::trigger`] sets the flag and then sends a zero-length
//! datagram to the bound address.  The event loop wakes, sees an empty
//! datagram with the flag raised, and exits.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, trace};

use crate::app::ports::DatagramSource;
use crate::error::{Error, Result};

pub struct UdpSource {
    socket: UdpSocket,
    local: SocketAddr,
}

impl UdpSource {
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).map_err(Error::Socket)?;
        let local = socket.local_addr().map_err(Error::Socket)?;
        info!("Listening for decoder datagrams on udp://{}", local);
        Ok(Self { socket, local })
    }

    /// Actual bound address (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }

    /// A handle that can stop [`AppService::run`](crate::app::service::AppService::run)
    /// from another thread or a signal handler.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::new(AtomicBool::new(false)),
            wake: reachable(self.local),
        }
    }
}

impl DatagramSource for UdpSource {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, from) = self.socket.recv_from(buf)?;
        trace!("udp: {} bytes from {}", len, from);
        Ok(len)
    }
}

/// Address a local peer can send to for a socket bound at `addr`.
///
/// A wildcard bind is reached through the loopback of the same family.
pub fn reachable(addr: SocketAddr) -> SocketAddr {
    match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
        }
        IpAddr::V6(ip) if ip.is_unspecified() => {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
        }
        _ => addr,
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake: SocketAddr,
}

impl ShutdownHandle {
    /// Flag polled by the event loop.
    pub fn flag(&self) -> &AtomicBool {
        &self.flag
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Raise the flag and wake the blocked receiver.
    pub fn trigger(&self) -> io::Result<()> {
        self.flag.store(true, Ordering::SeqCst);
        let any = match self.wake {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        UdpSocket::bind(any)?.send_to(&[], self.wake)?;
        Ok(())
    }
}
