//! # tonelink-rs - A Rust Crate for 4-FSK Acoustic Link Reception
//!
//! The tonelink-rs crate implements the receive side of a four-tone FSK
//! acoustic link: a stream of signed 16-bit little-endian PCM samples is
//! sliced into fixed-duration symbol windows, each window is mapped to one
//! of four carrier tones by a narrowband power estimator, and the symbol
//! stream is threaded through a framing state machine that recovers
//! length-prefixed, CRC-protected packets.
//!
//! ## Features
//!
//! - Per-window 4-FSK tone detection using the Goertzel recurrence
//! - Preamble/sync framing with noise-tolerant resynchronization
//! - Outer packet codec (`[LEN][payload][CRC16]`, CRC-16/CCITT)
//! - Inner addressed message codec (`[SRC][DST][TYPE][LEN][DATA]`)
//! - Three live observation streams: symbols, running byte view, packets
//! - Cooperative stop flag for cross-thread session shutdown
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//! use tonelink_rs::{decode_stream, Listener};
//!
//! let mut pcm = File::open("capture.s16le").unwrap();
//! let mut listener = Listener {
//!     on_packet: Some(Box::new(|payload: &[u8]| {
//!         println!("packet: {} bytes", payload.len());
//!     })),
//!     ..Listener::default()
//! };
//! let stats = decode_stream(&mut pcm, &mut listener).unwrap();
//! println!("{} packets", stats.packets_received);
//! ```

pub mod constants;
pub mod dsp;
pub mod error;
pub mod framing;
pub mod logging;
pub mod receiver;
pub mod util;

pub use crate::error::LinkError;
pub use crate::logging::{init_logger, log_info};

// Core receive pipeline types
pub use dsp::{Goertzel, ToneDetector};
pub use framing::{bytes_to_symbols, crc16_ccitt, make_packet, symbols_to_bytes, try_parse};
pub use framing::{Message, MessageError, MessageKind, PacketError};
pub use receiver::{Listener, Receiver, ReceiverStats};

/// Run one receive session over `transport`, delivering observations to
/// `listener`.
///
/// Convenience wrapper that owns a [`Receiver`] for the duration of the
/// session and returns its counters.
pub fn decode_stream<T: std::io::Read>(
    transport: &mut T,
    listener: &mut Listener,
) -> Result<ReceiverStats, LinkError> {
    let mut receiver = Receiver::new();
    receiver.run(transport, listener)
}
