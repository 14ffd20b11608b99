use crate::error::Sc010Error;
use crate::types::ControllerInfo;
use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};
use std::io::{Cursor, ErrorKind, Read};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::{Duration, Instant};

/// UDP port the controller answers discovery probes on.
pub const DISCOVERY_PORT: u16 = 8902;

const PROBE_MAGIC: u8 = 0xA5;
const PROBE_OPCODE: u8 = 0x01;
const REPLY_OPCODE: u8 = 0x02;
// magic + opcode + sequence echo + 6 MAC bytes + 4 IPv4 bytes
const REPLY_SIZE: usize = 14;
const DEFAULT_WAIT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Find an SC010 controller on the local network.
///
/// Broadcasts a discovery probe and waits up to `wait` (default 2 s) for a
/// controller to answer. Returns `Ok(None)` when nothing answered within the
/// window; datagrams that are not a well-formed reply to this probe are
/// ignored.
///
/// # Examples
/// ```no_run
/// match sc010::find_controller(None)? {
///     Some(info) => println!("Controller at {} ({})", info.ip, info.mac),
///     None => println!("No controller found"),
/// }
/// # Ok::<(), sc010::Sc010Error>(())
/// ```
pub fn find_controller(wait: Option<Duration>) -> Result<Option<ControllerInfo>, Sc010Error> {
    let target = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, DISCOVERY_PORT));
    find_controller_at(target, wait.unwrap_or(DEFAULT_WAIT))
}

/// Run the discovery exchange against an explicit target address.
///
/// [`find_controller`] delegates here with the broadcast address; passing a
/// unicast target probes a single known host.
pub fn find_controller_at(
    target: SocketAddr,
    wait: Duration,
) -> Result<Option<ControllerInfo>, Sc010Error> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_broadcast(true)?;

    let sequence: u16 = rand::random();
    socket.send_to(&build_probe(sequence), target)?;
    debug!("Discovery probe {sequence:#06x} sent to {target}");

    let deadline = Instant::now() + wait;
    let mut buf = [0u8; 64];

    loop {
        let now = Instant::now();
        if now >= deadline {
            debug!("Discovery window elapsed without a controller reply");
            return Ok(None);
        }
        socket.set_read_timeout(Some(POLL_INTERVAL.min(deadline - now)))?;

        match socket.recv_from(&mut buf) {
            Ok((len, from)) => {
                if let Some(info) = parse_reply(&buf[..len], sequence) {
                    debug!("Controller reply from {from}: {info}");
                    return Ok(Some(info));
                }
                trace!("Ignoring unrelated datagram from {from} ({len} bytes)");
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => continue,
            Err(e) => return Err(Sc010Error::Io(e)),
        }
    }
}

fn build_probe(sequence: u16) -> Vec<u8> {
    let mut msg = Vec::with_capacity(10);
    msg.push(PROBE_MAGIC);
    msg.push(PROBE_OPCODE);
    msg.extend_from_slice(&sequence.to_be_bytes());
    // all-stations hardware address
    msg.extend_from_slice(&[0xFF; 6]);
    msg
}

fn parse_reply(buf: &[u8], sequence: u16) -> Option<ControllerInfo> {
    if buf.len() < REPLY_SIZE {
        return None;
    }

    let mut cursor = Cursor::new(buf);
    let magic = cursor.read_u8().ok()?;
    let opcode = cursor.read_u8().ok()?;
    let echoed = cursor.read_u16::<BigEndian>().ok()?;
    if magic != PROBE_MAGIC || opcode != REPLY_OPCODE || echoed != sequence {
        return None;
    }

    let mut mac = [0u8; 6];
    cursor.read_exact(&mut mac).ok()?;
    let mut ip = [0u8; 4];
    cursor.read_exact(&mut ip).ok()?;

    Some(ControllerInfo {
        ip: Ipv4Addr::from(ip),
        mac: format_mac(&mac),
    })
}

fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}
