//! Binary codec for the backend dispatch protocol.
//!
//! Wire format:
//! ```text
//! [payload_len:4][client_id:4][backend_id:4][payload:N]
//! ```
//! Total header size: 12 bytes.  All integers are big-endian.  There is no
//! protocol version field and no checksum; the payload is UTF-8 text and
//! its length is unbounded.

use crate::protocol::frame::{FrameHeader, HEADER_SIZE};
use thiserror::Error;

/// Errors that can occur while decoding frame bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the minimum required length.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },
}

/// Encodes one frame: 12-byte header followed by `payload`.
///
/// The declared length field is always `payload.len()`; no maximum payload
/// size is enforced.
///
/// # Examples
///
/// ```rust
/// use lanadmin_core::protocol::{decode_header, encode_frame, HEADER_SIZE};
///
/// let bytes = encode_frame(b"file_list .", 100, 1);
/// let header = decode_header(&bytes).unwrap();
/// assert_eq!(header.payload_len as usize, bytes.len() - HEADER_SIZE);
/// assert_eq!(header.client_id, 100);
/// assert_eq!(header.backend_id, 1);
/// ```
pub fn encode_frame(payload: &[u8], client_id: u32, backend_id: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(&client_id.to_be_bytes());
    buf.extend_from_slice(&backend_id.to_be_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Decodes a [`FrameHeader`] from the first 12 bytes of `bytes`.
///
/// # Errors
///
/// Returns [`ProtocolError::InsufficientData`] when fewer than 12 bytes
/// are available.
pub fn decode_header(bytes: &[u8]) -> Result<FrameHeader, ProtocolError> {
    if bytes.len() < HEADER_SIZE {
        return Err(ProtocolError::InsufficientData {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let payload_len = u32::from_be_bytes(bytes[0..4].try_into().unwrap());
    let client_id = u32::from_be_bytes(bytes[4..8].try_into().unwrap());
    let backend_id = u32::from_be_bytes(bytes[8..12].try_into().unwrap());

    Ok(FrameHeader {
        payload_len,
        client_id,
        backend_id,
    })
}

/// Interprets a frame payload as UTF-8 text.
///
/// Invalid byte sequences are replaced with U+FFFD; this never fails, so
/// a garbled response still produces printable output for the operator.
pub fn decode_text(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
