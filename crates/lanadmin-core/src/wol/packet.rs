//! Magic packet assembly.

use crate::wol::mac::MacAddress;

/// Total size of a magic packet in bytes: 6 sync bytes + 16 × 6-byte MAC.
pub const MAGIC_PACKET_LEN: usize = 102;

/// Number of times the target MAC is repeated after the sync bytes.
const MAC_REPETITIONS: usize = 16;

/// A fully assembled Wake-on-LAN magic packet.
///
/// Layout:
/// ```text
/// [FF FF FF FF FF FF][MAC × 16]
/// ```
/// The value is immutable once built; [`MagicPacket::as_bytes`] yields the
/// datagram to hand to a UDP socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicPacket([u8; MAGIC_PACKET_LEN]);

impl MagicPacket {
    /// Builds the magic packet that wakes the machine owning `mac`.
    pub fn for_mac(mac: MacAddress) -> Self {
        let mut buf = [0xFFu8; MAGIC_PACKET_LEN];
        for i in 0..MAC_REPETITIONS {
            let start = 6 + i * 6;
            buf[start..start + 6].copy_from_slice(mac.as_bytes());
        }
        MagicPacket(buf)
    }

    /// Returns the 102 packet bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
