//! Multicast UDP sockets.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

use tracing::debug;

use crate::net::DatagramPacket;
use crate::{Error, Result};

/// Default time-to-live for outgoing multicast datagrams.
const DEFAULT_TTL: u32 = 255;

/// A UDP socket with IPv4 multicast group management.
///
/// The socket binds to the wildcard address on a fixed port and remembers which groups it
/// joined on which interface, so [`leave_group`](MulticastSocket::leave_group) does not
/// need the interface repeated. Plain unicast traffic works through the same socket.
pub struct MulticastSocket {
    socket: UdpSocket,
    joined: Vec<(Ipv4Addr, Ipv4Addr)>,
}

impl MulticastSocket {
    /// Binds to `0.0.0.0:port`; port 0 picks a free port.
    ///
    /// Outgoing multicast starts with a time-to-live of 255, the widest scope, and can be
    /// narrowed with [`set_time_to_live`](MulticastSocket::set_time_to_live).
    pub fn bind(port: u16) -> Result<MulticastSocket> {
        let socket = UdpSocket::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))?;
        socket.set_multicast_ttl_v4(DEFAULT_TTL)?;
        Ok(MulticastSocket {
            socket,
            joined: Vec::new(),
        })
    }

    /// Joins a multicast group on the interface the system picks.
    pub fn join_group(&mut self, group: Ipv4Addr) -> Result<()> {
        self.join_group_on(group, Ipv4Addr::UNSPECIFIED)
    }

    /// Joins a multicast group on a specific local interface.
    pub fn join_group_on(&mut self, group: Ipv4Addr, interface: Ipv4Addr) -> Result<()> {
        self.socket.join_multicast_v4(&group, &interface)?;
        self.joined.push((group, interface));
        debug!(%group, %interface, "joined multicast group");
        Ok(())
    }

    /// Leaves a previously joined multicast group.
    pub fn leave_group(&mut self, group: Ipv4Addr) -> Result<()> {
        let position = self
            .joined
            .iter()
            .position(|(joined, _)| *joined == group)
            .ok_or_else(|| {
                Error::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("group {group} was never joined"),
                ))
            })?;
        let (group, interface) = self.joined.remove(position);
        self.socket.leave_multicast_v4(&group, &interface)?;
        debug!(%group, %interface, "left multicast group");
        Ok(())
    }

    /// Sets the time-to-live of outgoing multicast datagrams.
    pub fn set_time_to_live(&self, ttl: u32) -> Result<()> {
        Ok(self.socket.set_multicast_ttl_v4(ttl)?)
    }

    /// Controls whether this host's own multicast sends loop back to the socket.
    pub fn set_loopback(&self, enabled: bool) -> Result<()> {
        Ok(self.socket.set_multicast_loop_v4(enabled)?)
    }

    /// Sends the packet's payload to its address.
    pub fn send(&self, packet: &DatagramPacket) -> Result<usize> {
        let addr = packet.address().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "packet has no destination address",
            ))
        })?;
        Ok(self.socket.send_to(packet.data(), addr)?)
    }

    /// Blocks until one datagram arrives, storing payload and source in `packet`.
    ///
    /// Datagrams larger than the packet's capacity are truncated to it.
    pub fn receive(&self, packet: &mut DatagramPacket) -> Result<()> {
        self.socket.set_read_timeout(None)?;
        let (len, addr) = self.socket.recv_from(packet.buffer_mut())?;
        packet.set_received(len, addr);
        Ok(())
    }

    /// Like [`receive`](MulticastSocket::receive), giving up after `timeout`.
    ///
    /// Returns `Ok(true)` when a datagram was stored and `Ok(false)` when the timeout
    /// elapsed with nothing to read.
    pub fn receive_timeout(&self, packet: &mut DatagramPacket, timeout: Duration) -> Result<bool> {
        // A zero read timeout is rejected by the socket layer.
        let timeout = timeout.max(Duration::from_millis(1));
        self.socket.set_read_timeout(Some(timeout))?;
        match self.socket.recv_from(packet.buffer_mut()) {
            Ok((len, addr)) => {
                packet.set_received(len, addr);
                Ok(true)
            }
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                Ok(false)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}
