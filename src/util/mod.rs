//! # Utility Modules
//!
//! Common helpers used throughout the tonelink-rs crate: hex
//! encoding/decoding for payload dumps and test vectors, and rate-limited
//! logging for noisy acoustic channels.

pub mod hex;
pub mod logging;

// Re-export commonly used types and functions
pub use hex::{decode_hex, encode_hex, format_hex_compact, hex_to_bytes};
pub use logging::{log_frame_hex, LogThrottle};
