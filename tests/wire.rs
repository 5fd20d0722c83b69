//! Configuration-to-wire integration tests.
//!
//! Drives a small heartbeat exchange the way a consumer of this crate would: parameters
//! come from a property table, payloads go through the endian-aware buffers, datagrams
//! travel between two sockets on the loopback interface, and a runtime thread pumps the
//! receiving side until told to stop.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use syncommon::prelude::*;

fn loopback(port: u16) -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port))
}

#[test]
fn a_configured_heartbeat_crosses_the_loopback() -> Result<()> {
    let config = Properties::load_from_str(
        "payload.capacity = 256\nheartbeat.sender = relay-7\nheartbeat.sequence: 41\n",
    );
    let capacity: usize = config
        .get_or("payload.capacity", "1500")
        .parse()
        .expect("capacity must be numeric");
    let sequence: u32 = config
        .get_or("heartbeat.sequence", "0")
        .parse()
        .expect("sequence must be numeric");

    let receiver = MulticastSocket::bind(0)?;
    let sender = MulticastSocket::bind(0)?;
    let destination = loopback(receiver.local_addr()?.port());

    let mut payload = OutputBuffer::new(Endian::Big);
    payload.write_string(config.get_or("heartbeat.sender", "unknown"))?;
    payload.write_u32(sequence);

    sender.send(&DatagramPacket::for_send(payload.into_vec(), destination))?;

    let mut landing = DatagramPacket::for_receive(capacity);
    assert!(receiver.receive_timeout(&mut landing, Duration::from_secs(5))?);

    let mut decoded = InputBuffer::new(landing.data(), Endian::Big);
    assert_eq!(decoded.read_string()?, "relay-7");
    assert_eq!(decoded.read_u32()?, 41);
    assert_eq!(decoded.remaining(), 0);
    Ok(())
}

#[test]
fn a_background_receiver_drains_until_told_to_stop() -> Result<()> {
    let receiver = Arc::new(MulticastSocket::bind(0)?);
    let destination = loopback(receiver.local_addr()?.port());
    let stop = Arc::new(Event::new(false, "stop-receiver"));
    let received = Arc::new(Mutex::new(Vec::new()));

    let pump = {
        let receiver = Arc::clone(&receiver);
        let stop = Arc::clone(&stop);
        let received = Arc::clone(&received);
        Thread::named("receive-pump", move || {
            let mut packet = DatagramPacket::for_receive(64);
            loop {
                match receiver.receive_timeout(&mut packet, Duration::from_millis(20)) {
                    Ok(true) => received.lock().unwrap().push(packet.data().to_vec()),
                    Ok(false) => {}
                    Err(_) => break,
                }
                if stop.wait_for(Timeout::IMMEDIATE) != WaitResult::TimedOut {
                    break;
                }
            }
        })
    };
    pump.start()?;

    let sender = MulticastSocket::bind(0)?;
    for sequence in 0..3u8 {
        sender.send(&DatagramPacket::for_send(vec![0xab, sequence], destination))?;
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline && received.lock().unwrap().len() < 3 {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(received.lock().unwrap().len(), 3);

    stop.signal();
    assert_eq!(pump.join(), WaitResult::Succeeded);
    Ok(())
}

#[test]
fn a_receiver_thread_obeys_an_interrupt() -> Result<()> {
    let receiver = Arc::new(MulticastSocket::bind(0)?);
    let stop = Arc::new(Event::new(false, "stop-never-signaled"));

    let pump = {
        let receiver = Arc::clone(&receiver);
        let stop = Arc::clone(&stop);
        Thread::named("interruptible-pump", move || {
            let mut packet = DatagramPacket::for_receive(64);
            loop {
                if receiver
                    .receive_timeout(&mut packet, Duration::from_millis(20))
                    .is_err()
                {
                    break;
                }
                // The zero-timeout poll also reports a pending interrupt.
                if stop.wait_for(Timeout::IMMEDIATE) != WaitResult::TimedOut {
                    break;
                }
            }
        })
    };
    pump.start()?;

    pump.interrupt();
    assert_eq!(
        pump.join_for(Timeout::from_millis(5_000)),
        WaitResult::Succeeded
    );
    Ok(())
}
