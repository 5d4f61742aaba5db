//! Packing invariants between the 2-bit symbol stream and bytes.

use proptest::prelude::*;
use tonelink_rs::{bytes_to_symbols, symbols_to_bytes};

#[test]
fn test_known_packing_vectors() {
    assert_eq!(symbols_to_bytes(&[0, 0, 0, 0]), vec![0x00]);
    assert_eq!(symbols_to_bytes(&[3, 3, 3, 3]), vec![0xFF]);
    assert_eq!(symbols_to_bytes(&[1, 2, 3, 0]), vec![0b0110_1100]);
    assert_eq!(
        symbols_to_bytes(&[1, 2, 2, 0, 1, 2, 2, 1]),
        vec![0x68, 0x69] // "hi"
    );
}

#[test]
fn test_symbol_count_per_byte() {
    assert_eq!(bytes_to_symbols(&[0xAB, 0xCD]).len(), 8);
    assert_eq!(symbols_to_bytes(&bytes_to_symbols(&[0xAB, 0xCD])).len(), 2);
}

proptest! {
    #[test]
    fn bytes_to_symbols_roundtrips(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(symbols_to_bytes(&bytes_to_symbols(&bytes)), bytes);
    }

    #[test]
    fn symbols_to_bytes_roundtrips_whole_groups(
        syms in proptest::collection::vec(0u8..4, 0..512)
    ) {
        let whole = syms.len() / 4 * 4;
        prop_assert_eq!(bytes_to_symbols(&symbols_to_bytes(&syms)), &syms[..whole]);
    }

    #[test]
    fn trailing_symbols_never_reach_output(
        syms in proptest::collection::vec(0u8..4, 0..512)
    ) {
        prop_assert_eq!(symbols_to_bytes(&syms).len(), syms.len() / 4);
    }
}
