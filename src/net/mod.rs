//! Packet-oriented networking with IPv4 multicast support.
//!
//! [`MulticastSocket`] wraps a UDP socket with group membership bookkeeping and a timed
//! receive; [`DatagramPacket`] is the reusable payload-plus-address unit both directions
//! share. Encoding payloads is the business of [`crate::io`].

mod datagram;
mod multicast;

pub use datagram::DatagramPacket;
pub use multicast::MulticastSocket;
