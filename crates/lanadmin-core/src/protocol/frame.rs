//! Frame types for the backend dispatch protocol.
//!
//! A frame is one length-prefixed unit on the TCP connection.  The header
//! carries the payload length plus two opaque routing identifiers: the
//! client id a probe attaches to its outgoing frames and the backend id
//! naming the downstream service instance the frame targets.

/// Total size of the frame header in bytes.
pub const HEADER_SIZE: usize = 12;

/// The 12-byte header prepended to every frame on the wire.
///
/// All fields are encoded big-endian (network byte order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Declared length of the payload in bytes (not including this header).
    pub payload_len: u32,
    /// Opaque identifier of the sending client.
    pub client_id: u32,
    /// Opaque identifier of the backend instance the frame is routed to.
    pub backend_id: u32,
}

/// One decoded frame: header plus the payload bytes actually received.
///
/// The payload may be shorter than `header.payload_len` when the peer
/// closed the connection before the full payload arrived; see
/// [`Frame::is_truncated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: FrameHeader,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Returns `true` when fewer payload bytes were received than the
    /// header declared.
    ///
    /// The stream reader hands back whatever bytes arrived before an early
    /// close rather than failing, so callers that care about completeness
    /// must check this.
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < self.header.payload_len as usize
    }
}
