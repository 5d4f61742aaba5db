//! # Per-Window Tone Detection
//!
//! Maps one symbol window of PCM to the strongest of the four link tones.

use crate::constants::{BYTES_PER_SAMPLE, SAMPLE_RATE_HZ, SYMBOL_FRAMES, TONE_FREQS};
use crate::dsp::goertzel::Goertzel;

/// 4-FSK symbol detector over fixed-length PCM windows.
///
/// Holds one narrowband estimator per carrier; the estimators are
/// re-initialized for every window, so a detector can be reused for the
/// whole session.
#[derive(Debug, Clone)]
pub struct ToneDetector {
    window_len: usize,
    estimators: [Goertzel; 4],
}

impl ToneDetector {
    /// Detector for the link's fixed parameters.
    pub fn new() -> Self {
        Self::with_params(SAMPLE_RATE_HZ as f32, SYMBOL_FRAMES, TONE_FREQS)
    }

    /// Detector for explicit rate, window length and carrier frequencies.
    pub fn with_params(sample_rate: f32, window_len: usize, freqs: [f32; 4]) -> Self {
        let estimators = freqs.map(|f| Goertzel::for_frequency(window_len, f, sample_rate));
        Self {
            window_len,
            estimators,
        }
    }

    /// Samples per detection window.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Bytes per detection window.
    pub fn window_bytes(&self) -> usize {
        self.window_len * BYTES_PER_SAMPLE
    }

    /// Detect the dominant tone in one full window of little-endian
    /// signed 16-bit PCM.
    ///
    /// Returns the tone index `0..=3`; ties resolve to the lowest index.
    pub fn detect(&mut self, window: &[u8]) -> u8 {
        debug_assert_eq!(window.len(), self.window_bytes());

        for est in self.estimators.iter_mut() {
            est.reset();
        }
        for pair in window.chunks_exact(BYTES_PER_SAMPLE) {
            let raw = i16::from_le_bytes([pair[0], pair[1]]);
            let sample = raw as f32 / 32768.0;
            for est in self.estimators.iter_mut() {
                est.process(sample);
            }
        }

        let mut best = 0u8;
        let mut best_power = self.estimators[0].power();
        for (idx, est) in self.estimators.iter().enumerate().skip(1) {
            let power = est.power();
            if power > best_power {
                best = idx as u8;
                best_power = power;
            }
        }
        best
    }
}

impl Default for ToneDetector {
    fn default() -> Self {
        Self::new()
    }
}
