//! Link Parameters
//!
//! This module defines the fixed parameters of the 4-FSK acoustic link.
//! Both ends of a link must be built with the same values; none of them
//! are runtime-mutable during a session.

/// PCM sample rate of the link in Hz.
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// Bytes per PCM sample (signed 16-bit little-endian, mono).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Symbol window duration in milliseconds.
pub const SYMBOL_MS: u32 = 20;

/// The four carrier frequencies in Hz; a symbol value is its tone index.
pub const TONE_FREQS: [f32; 4] = [1_000.0, 1_400.0, 1_800.0, 2_200.0];

/// PCM samples per symbol window.
pub const SYMBOL_FRAMES: usize =
    ((SAMPLE_RATE_HZ as u64 * SYMBOL_MS as u64 + 500) / 1000) as usize;

/// Bytes per symbol window.
pub const SYMBOL_BYTES: usize = SYMBOL_FRAMES * BYTES_PER_SAMPLE;

/// Minimum run of alternating preamble symbols required before sync.
pub const PREAMBLE_SYMBOLS: usize = 8;

/// Preamble symbol expected at even positions of the run.
pub const PREAMBLE_EVEN_SYMBOL: u8 = 0;

/// Preamble symbol expected at odd positions of the run.
pub const PREAMBLE_ODD_SYMBOL: u8 = 2;

/// Three-symbol sync word marking the start of a packet body.
pub const SYNC_WORD: [u8; 3] = [1, 3, 0];

/// Symbols packed into one byte (2 bits per symbol, MSB-first).
pub const SYMBOLS_PER_BYTE: usize = 4;

/// Bits carried by one symbol.
pub const BITS_PER_SYMBOL: usize = 2;

/// Maximum outer packet payload length; encoders truncate beyond this.
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Maximum inner message data length; encoders truncate beyond this.
pub const MAX_DATA_LEN: usize = 255;

/// Destination address denoting broadcast.
pub const BROADCAST_ADDR: u8 = 0xFF;

// Inner message TYPE codes
pub const MSG_TYPE_DIRECT: u8 = 1;
pub const MSG_TYPE_ANNOUNCE: u8 = 2;
