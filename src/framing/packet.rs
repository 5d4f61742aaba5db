//! # Outer Packet Codec
//!
//! Builds and parses the length-prefixed, CRC-protected container carried
//! over the link:
//!
//! ```text
//! ┌───────────┬───────────────┬─────────────────────┐
//! │  L-field  │    Payload    │        CRC          │
//! │  (1 byte) │ (0-255 bytes) │ (2 bytes, BE, hi 1st)│
//! └───────────┴───────────────┴─────────────────────┘
//! ```
//!
//! The CRC covers `L-field || payload`; the CRC bytes themselves are
//! excluded.

use crate::constants::MAX_PAYLOAD_LEN;
use crate::framing::crc::crc16_ccitt;
use thiserror::Error;

/// Errors from parsing an outer packet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("packet too short: {actual} bytes, need at least 3")]
    TooShort { actual: usize },

    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("CRC mismatch: expected {expected:04X}, calculated {calculated:04X}")]
    CrcMismatch { expected: u16, calculated: u16 },
}

/// Build an outer packet around `payload`.
///
/// Payloads longer than 255 bytes are silently truncated so that sender
/// and receiver agree on the wire format.
pub fn make_packet(payload: &[u8]) -> Vec<u8> {
    let body = &payload[..payload.len().min(MAX_PAYLOAD_LEN)];

    let mut pkt = Vec::with_capacity(1 + body.len() + 2);
    pkt.push(body.len() as u8);
    pkt.extend_from_slice(body);

    let crc = crc16_ccitt(&pkt);
    pkt.extend_from_slice(&crc.to_be_bytes());
    pkt
}

/// Parse an outer packet, returning the payload.
///
/// Succeeds only when the length field matches the packet size exactly
/// and the CRC verifies; never returns partial output.
pub fn try_parse(pkt: &[u8]) -> Result<Vec<u8>, PacketError> {
    if pkt.len() < 3 {
        return Err(PacketError::TooShort { actual: pkt.len() });
    }

    let len = pkt[0] as usize;
    let expected = 1 + len + 2;
    if pkt.len() != expected {
        return Err(PacketError::LengthMismatch {
            expected,
            actual: pkt.len(),
        });
    }

    let crc_read = u16::from_be_bytes([pkt[expected - 2], pkt[expected - 1]]);
    let crc_calc = crc16_ccitt(&pkt[..expected - 2]);
    if crc_read != crc_calc {
        return Err(PacketError::CrcMismatch {
            expected: crc_read,
            calculated: crc_calc,
        });
    }

    Ok(pkt[1..1 + len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_empty_payload() {
        let pkt = make_packet(&[]);
        assert_eq!(pkt.len(), 3);
        assert_eq!(pkt[0], 0);
        assert_eq!(try_parse(&pkt).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn roundtrip_text_payload() {
        let pkt = make_packet(b"hi");
        assert_eq!(&pkt[..3], &[0x02, 0x68, 0x69]);
        assert_eq!(try_parse(&pkt).unwrap(), b"hi");
    }

    #[test]
    fn oversize_payload_is_truncated() {
        let payload = vec![0xAA; 300];
        let pkt = make_packet(&payload);
        assert_eq!(pkt[0], 255);
        assert_eq!(pkt.len(), 1 + 255 + 2);
        assert_eq!(try_parse(&pkt).unwrap(), &payload[..255]);
    }

    #[test]
    fn corrupted_payload_fails_crc() {
        let mut pkt = make_packet(b"hi");
        pkt[1] ^= 0x01;
        assert!(matches!(
            try_parse(&pkt),
            Err(PacketError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn short_input_is_rejected() {
        assert_eq!(try_parse(&[]), Err(PacketError::TooShort { actual: 0 }));
        assert_eq!(
            try_parse(&[0x00, 0x1D]),
            Err(PacketError::TooShort { actual: 2 })
        );
    }

    #[test]
    fn length_field_must_match_exactly() {
        let mut pkt = make_packet(b"hi");
        pkt.push(0x00);
        assert_eq!(
            try_parse(&pkt),
            Err(PacketError::LengthMismatch {
                expected: 5,
                actual: 6
            })
        );
    }
}
