//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for payload dumps in logs, CLI output, and test
//! vectors. Thin wrappers over the `hex` crate with error handling for
//! hand-written input.

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }

    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "02 68 69" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Helper for creating test data from hex strings
///
/// Panics on invalid hex (intended for test code only).
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    decode_hex(hex).expect("Invalid hex in test data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let data = vec![0x02, 0x68, 0x69, 0x0f, 0xa1];
        let encoded = encode_hex(&data);
        let decoded = decode_hex(&encoded).unwrap();
        assert_eq!(data, decoded);
    }

    #[test]
    fn test_decode_with_whitespace() {
        assert_eq!(decode_hex("02 68 69").unwrap(), vec![0x02, 0x68, 0x69]);
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert_eq!(decode_hex("068"), Err(HexError::OddLength(3)));
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert_eq!(decode_hex(""), Err(HexError::EmptyString));
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_hex_compact(&[0x02, 0x68, 0x69]), "02 68 69");
    }
}
