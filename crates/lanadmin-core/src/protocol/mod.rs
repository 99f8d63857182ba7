//! The framed TCP protocol used to probe the backend dispatch service.

pub mod codec;
pub mod frame;

pub use codec::{decode_header, decode_text, encode_frame, ProtocolError};
pub use frame::{Frame, FrameHeader, HEADER_SIZE};
