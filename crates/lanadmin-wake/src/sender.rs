//! UDP broadcast transmission of magic packets.
//!
//! Wake-on-LAN datagrams are addressed to a broadcast address rather than
//! the target machine: the target is asleep and owns no IP, so every
//! interface on the segment must see the packet.  The socket is created
//! for the duration of one send and released on every exit path.

use std::net::UdpSocket;

use lanadmin_core::MagicPacket;
use tracing::{debug, error};

/// Default broadcast address; reaches the local segment on most LANs.
pub const DEFAULT_BROADCAST_ADDR: &str = "255.255.255.255";

/// Standard Wake-on-LAN discard port.
pub const DEFAULT_WOL_PORT: u16 = 9;

/// Destination settings for magic packet transmission.
#[derive(Debug, Clone)]
pub struct WakeConfig {
    /// Broadcast address the datagram is sent to.
    pub broadcast_addr: String,
    /// UDP destination port.
    pub port: u16,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            broadcast_addr: DEFAULT_BROADCAST_ADDR.to_string(),
            port: DEFAULT_WOL_PORT,
        }
    }
}

/// Transmits one magic packet as a single broadcast datagram.
///
/// Returns `true` on success.  Any OS-level failure (socket creation,
/// broadcast option, send) is logged and converted to `false`; waking a
/// machine is best-effort and must never take the calling command down.
pub fn send_magic_packet(packet: &MagicPacket, config: &WakeConfig) -> bool {
    // Ephemeral local port; the socket closes when it falls out of scope,
    // on the error paths included.
    let socket = match UdpSocket::bind(("0.0.0.0", 0)) {
        Ok(socket) => socket,
        Err(e) => {
            error!("failed to open UDP socket: {e}");
            return false;
        }
    };

    if let Err(e) = socket.set_broadcast(true) {
        error!("failed to enable broadcast on UDP socket: {e}");
        return false;
    }

    let dest = (config.broadcast_addr.as_str(), config.port);
    match socket.send_to(packet.as_bytes(), dest) {
        Ok(sent) => {
            debug!(
                "sent {sent}-byte magic packet to {}:{}",
                config.broadcast_addr, config.port
            );
            true
        }
        Err(e) => {
            error!(
                "failed to send magic packet to {}:{}: {e}",
                config.broadcast_addr, config.port
            );
            false
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lanadmin_core::MacAddress;

    #[test]
    fn test_wake_config_default_is_limited_broadcast_port_nine() {
        let config = WakeConfig::default();
        assert_eq!(config.broadcast_addr, "255.255.255.255");
        assert_eq!(config.port, 9);
    }

    #[test]
    fn test_send_delivers_102_bytes_to_loopback_receiver() {
        // Arrange: a receiver on an OS-assigned loopback port stands in for
        // the broadcast segment.
        let receiver = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
        receiver
            .set_read_timeout(Some(std::time::Duration::from_secs(2)))
            .expect("set timeout");
        let port = receiver.local_addr().expect("local addr").port();

        let mac: MacAddress = "AA:BB:CC:DD:EE:FF".parse().expect("valid MAC");
        let packet = MagicPacket::for_mac(mac);
        let config = WakeConfig {
            broadcast_addr: "127.0.0.1".to_string(),
            port,
        };

        // Act
        let sent = send_magic_packet(&packet, &config);

        // Assert
        assert!(sent, "send must report success");
        let mut buf = [0u8; 256];
        let (len, _) = receiver.recv_from(&mut buf).expect("datagram must arrive");
        assert_eq!(len, 102);
        assert_eq!(&buf[..len], packet.as_bytes());
    }

    #[test]
    fn test_send_to_unresolvable_address_returns_false() {
        let packet = MagicPacket::for_mac("AA:BB:CC:DD:EE:FF".parse().expect("valid MAC"));
        let config = WakeConfig {
            broadcast_addr: "definitely-not-a-real-hostname.invalid".to_string(),
            port: 9,
        };
        assert!(!send_magic_packet(&packet, &config));
    }
}
