//! MAC address parsing and formatting.

use std::fmt;
use std::str::FromStr;

use crate::wol::WolError;

/// A 6-byte hardware (MAC) address.
///
/// Parsed from common textual forms: `AA:BB:CC:DD:EE:FF`,
/// `AA-BB-CC-DD-EE-FF`, `AABB.CCDD.EEFF`, or the bare `AABBCCDDEEFF`.
/// The separators `:`, `-`, and `.` are stripped before validation;
/// exactly 12 hexadecimal digits must remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Returns the six raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl FromStr for MacAddress {
    type Err = WolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<char> = s
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .collect();

        if digits.len() != 12 {
            return Err(WolError::InvalidLength {
                input: s.to_string(),
                found: digits.len(),
            });
        }

        let mut bytes = [0u8; 6];
        for (i, pair) in digits.chunks(2).enumerate() {
            let hi = hex_value(pair[0], s)?;
            let lo = hex_value(pair[1], s)?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(MacAddress(bytes))
    }
}

fn hex_value(digit: char, input: &str) -> Result<u8, WolError> {
    digit
        .to_digit(16)
        .map(|v| v as u8)
        .ok_or_else(|| WolError::InvalidDigit {
            input: input.to_string(),
            digit,
        })
}

impl fmt::Display for MacAddress {
    /// Formats in the canonical uppercase colon-separated form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_separated() {
        let mac: MacAddress = "AA:BB:CC:DD:EE:FF".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_parse_dash_and_bare_forms_are_equal() {
        let dashed: MacAddress = "AA-BB-CC-DD-EE-FF".parse().unwrap();
        let bare: MacAddress = "AABBCCDDEEFF".parse().unwrap();
        assert_eq!(dashed, bare);
    }

    #[test]
    fn test_parse_dot_separated_cisco_form() {
        let mac: MacAddress = "AABB.CCDD.EEFF".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_parse_lowercase_digits() {
        let mac: MacAddress = "aa:bb:cc:dd:ee:01".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0x01]);
    }

    #[test]
    fn test_parse_too_few_digits_fails() {
        let result = "AA:BB:CC:DD:EE".parse::<MacAddress>();
        assert_eq!(
            result,
            Err(WolError::InvalidLength {
                input: "AA:BB:CC:DD:EE".to_string(),
                found: 10,
            })
        );
    }

    #[test]
    fn test_parse_non_hex_digit_fails() {
        let result = "ZZ:BB:CC:DD:EE:FF".parse::<MacAddress>();
        assert_eq!(
            result,
            Err(WolError::InvalidDigit {
                input: "ZZ:BB:CC:DD:EE:FF".to_string(),
                digit: 'Z',
            })
        );
    }

    #[test]
    fn test_parse_empty_string_fails() {
        assert!(matches!(
            "".parse::<MacAddress>(),
            Err(WolError::InvalidLength { found: 0, .. })
        ));
    }

    #[test]
    fn test_display_is_canonical_uppercase() {
        let mac: MacAddress = "aa-bb-cc-dd-ee-ff".parse().unwrap();
        assert_eq!(mac.to_string(), "AA:BB:CC:DD:EE:FF");
    }
}
