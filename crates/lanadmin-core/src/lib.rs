//! # lanadmin-core
//!
//! Shared library for the LAN-Admin tools containing the byte-level wire
//! encodings both utilities are built around:
//!
//! - **`protocol`** – The framed TCP message format spoken by the backend
//!   dispatch service: a 12-byte big-endian header (payload length, client
//!   id, backend id) followed by a UTF-8 payload.  The probe tool uses this
//!   to send one command frame and scan the replies.
//!
//! - **`wol`** – The Wake-on-LAN magic packet: MAC address parsing and the
//!   fixed 102-byte UDP payload (`0xFF × 6` followed by the MAC repeated
//!   16 times) that powers on a sleeping machine.
//!
//! This crate holds only value types and byte-layout logic.  It opens no
//! sockets and performs no I/O; the `lanadmin-probe` and `lanadmin-wake`
//! binaries own the transport plumbing.

pub mod protocol;
pub mod wol;

// Re-export the most-used items at the crate root so callers can write
// `lanadmin_core::MagicPacket` instead of `lanadmin_core::wol::packet::MagicPacket`.
pub use protocol::codec::{decode_header, decode_text, encode_frame, ProtocolError};
pub use protocol::frame::{Frame, FrameHeader, HEADER_SIZE};
pub use wol::mac::MacAddress;
pub use wol::packet::{MagicPacket, MAGIC_PACKET_LEN};
pub use wol::WolError;
