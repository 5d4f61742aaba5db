//! Inner message codec tests.

use proptest::prelude::*;
use tonelink_rs::constants::BROADCAST_ADDR;
use tonelink_rs::{Message, MessageError, MessageKind};

#[test]
fn test_broadcast_announce_roundtrip() {
    let msg = Message::new(1, BROADCAST_ADDR, MessageKind::Announce, b"hi".to_vec());
    let decoded = Message::decode(&msg.encode()).unwrap();

    assert_eq!(decoded.src, 1);
    assert_eq!(decoded.dst, 0xFF);
    assert_eq!(decoded.kind, MessageKind::Announce);
    assert_eq!(decoded.data, b"hi");
    assert!(decoded.is_broadcast());
}

#[test]
fn test_direct_message_roundtrip() {
    let msg = Message::new(5, 9, MessageKind::Direct, b"ping".to_vec());
    let decoded = Message::decode(&msg.encode()).unwrap();
    assert_eq!(decoded, msg);
    assert!(!decoded.is_broadcast());
}

#[test]
fn test_kind_byte_mapping() {
    assert_eq!(MessageKind::Direct.to_byte(), 1);
    assert_eq!(MessageKind::Announce.to_byte(), 2);
    assert_eq!(MessageKind::from_byte(1), MessageKind::Direct);
    assert_eq!(MessageKind::from_byte(2), MessageKind::Announce);
    assert_eq!(MessageKind::from_byte(0x7E), MessageKind::Unassigned(0x7E));
    assert_eq!(MessageKind::Unassigned(0x7E).to_byte(), 0x7E);
}

#[test]
fn test_empty_data_roundtrip() {
    let msg = Message::new(3, 4, MessageKind::Direct, Vec::new());
    let wire = msg.encode();
    assert_eq!(wire.len(), 4);
    assert_eq!(Message::decode(&wire).unwrap(), msg);
}

#[test]
fn test_non_utf8_data_is_preserved() {
    let msg = Message::new(1, 2, MessageKind::Direct, vec![0xFF, 0xFE, 0x00]);
    let decoded = Message::decode(&msg.encode()).unwrap();
    assert_eq!(decoded.data, vec![0xFF, 0xFE, 0x00]);
    // The lossy text view must not panic on arbitrary bytes.
    let _ = decoded.text();
}

#[test]
fn test_short_and_mismatched_payloads_are_rejected() {
    assert_eq!(
        Message::decode(&[]),
        Err(MessageError::TooShort { actual: 0 })
    );
    assert_eq!(
        Message::decode(&[1, 2, 3]),
        Err(MessageError::TooShort { actual: 3 })
    );
    // LEN says 1 byte of data but none follows.
    assert!(matches!(
        Message::decode(&[1, 2, 3, 1]),
        Err(MessageError::LengthMismatch { .. })
    ));
}

proptest! {
    #[test]
    fn message_roundtrips(
        src in any::<u8>(),
        dst in any::<u8>(),
        kind in any::<u8>(),
        data in proptest::collection::vec(any::<u8>(), 0..=255)
    ) {
        let msg = Message::new(src, dst, MessageKind::from_byte(kind), data);
        prop_assert_eq!(Message::decode(&msg.encode()).unwrap(), msg);
    }

    #[test]
    fn oversize_data_always_truncates_to_cap(
        extra in 1usize..128,
    ) {
        let msg = Message::new(1, 2, MessageKind::Direct, vec![0xAA; 255 + extra]);
        let wire = msg.encode();
        prop_assert_eq!(wire.len(), 4 + 255);
        prop_assert_eq!(wire[3], 255);
    }
}
