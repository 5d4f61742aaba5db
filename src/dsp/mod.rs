//! # Signal-Processing Front End
//!
//! Narrowband power estimation and per-window tone detection for the
//! 4-FSK demodulator.

pub mod detector;
pub mod goertzel;

pub use detector::ToneDetector;
pub use goertzel::Goertzel;
