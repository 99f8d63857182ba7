//! Wake-on-LAN magic packet construction.
//!
//! A machine whose network interface supports Wake-on-LAN powers up when it
//! sees a UDP datagram containing its own MAC address in the magic packet
//! layout: six `0xFF` bytes followed by the 6-byte MAC repeated 16 times,
//! 102 bytes in total.

pub mod mac;
pub mod packet;

use thiserror::Error;

pub use mac::MacAddress;
pub use packet::{MagicPacket, MAGIC_PACKET_LEN};

/// Errors produced while parsing a MAC address string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WolError {
    /// After stripping separators the string did not contain exactly 12
    /// hexadecimal digits.
    #[error("invalid MAC address {input:?}: expected 12 hexadecimal digits, found {found}")]
    InvalidLength { input: String, found: usize },

    /// A character that is not a hexadecimal digit remained after
    /// separator stripping.
    #[error("invalid MAC address {input:?}: {digit:?} is not a hexadecimal digit")]
    InvalidDigit { input: String, digit: char },
}
