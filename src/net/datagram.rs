//! Datagram packets.

use std::fmt;
use std::net::SocketAddr;

/// One UDP datagram: a payload buffer plus the peer address it came from or goes to.
///
/// A packet built with [`for_receive`](DatagramPacket::for_receive) is a reusable landing
/// zone whose capacity caps the datagram size; [`data`](DatagramPacket::data) exposes only
/// the bytes of the most recent reception. A packet built with
/// [`for_send`](DatagramPacket::for_send) carries its payload and destination together.
pub struct DatagramPacket {
    buf: Vec<u8>,
    len: usize,
    addr: Option<SocketAddr>,
}

impl DatagramPacket {
    /// Creates an empty packet able to receive up to `capacity` bytes.
    pub fn for_receive(capacity: usize) -> DatagramPacket {
        DatagramPacket {
            buf: vec![0; capacity],
            len: 0,
            addr: None,
        }
    }

    /// Creates a packet carrying `payload`, addressed to `addr`.
    pub fn for_send(payload: impl Into<Vec<u8>>, addr: SocketAddr) -> DatagramPacket {
        let buf = payload.into();
        DatagramPacket {
            len: buf.len(),
            buf,
            addr: Some(addr),
        }
    }

    /// The payload: the bytes to send, or the bytes of the last reception.
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The payload length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the packet carries no payload.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The largest datagram this packet can hold.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The peer address: the destination for sending, the source after receiving.
    pub fn address(&self) -> Option<SocketAddr> {
        self.addr
    }

    /// Redirects the packet to a different destination.
    pub fn set_address(&mut self, addr: SocketAddr) {
        self.addr = Some(addr);
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    pub(crate) fn set_received(&mut self, len: usize, addr: SocketAddr) {
        self.len = len;
        self.addr = Some(addr);
    }
}

impl fmt::Debug for DatagramPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatagramPacket")
            .field("len", &self.len)
            .field("capacity", &self.buf.len())
            .field("addr", &self.addr)
            .finish()
    }
}
