//! # Receive Loop and Framing State Machine
//!
//! The receiver repeatedly pulls one symbol window of PCM from the
//! transport, detects the symbol, feeds the observation streams, and
//! drives the framing state machine:
//!
//! ```text
//!            alternating 0/2 run          sync word (1,3,0)
//!   HUNT ──────────────────────► sync check ─────────────► COLLECTING
//!    ▲                               │ mismatch                 │
//!    │                               ▼                          │
//!    └──────────── reset ◄── body complete / overshoot ◄────────┘
//! ```
//!
//! While COLLECTING, the length byte recovered from the first four body
//! symbols fixes the expected body size at `(1 + LEN + 2) * 4` symbols;
//! completion hands the packed bytes to the outer packet parser. Every
//! drop path (sync mismatch, bad CRC, length mismatch, overshoot) resets
//! to HUNT and the session continues.
//!
//! Termination is cooperative: EOF or a short read from the transport,
//! or the stop flag observed before the next blocking read.

use std::io::{ErrorKind, Read};
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::{
    PREAMBLE_EVEN_SYMBOL, PREAMBLE_ODD_SYMBOL, PREAMBLE_SYMBOLS, SYMBOLS_PER_BYTE, SYMBOL_BYTES,
    SYNC_WORD,
};
use crate::dsp::ToneDetector;
use crate::error::LinkError;
use crate::framing::packet::{self, PacketError};
use crate::framing::symbols::{pack_group, symbols_to_bytes};
use crate::receiver::listener::Listener;
use crate::util::logging::{log_frame_hex, LogThrottle};

/// Counters for one receive session
#[derive(Debug, Default, Clone, Copy)]
pub struct ReceiverStats {
    pub windows_processed: u64,
    pub symbols_detected: u64,
    pub packets_received: u64,
    pub crc_errors: u64,
    pub length_errors: u64,
    pub sync_misses: u64,
    pub desyncs: u64,
}

/// Framer state. Every drop path returns to `Hunt` with a zero run.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FrameState {
    /// Searching for the alternating preamble.
    Hunt { preamble_run: usize },
    /// Accumulating body symbols after a sync match.
    Collecting { body_syms: Vec<u8> },
}

impl FrameState {
    fn hunt() -> Self {
        FrameState::Hunt { preamble_run: 0 }
    }
}

/// Receiver for one link session.
///
/// Owns the detector, the framer state and the session stream buffers;
/// borrows the transport and the listener for the duration of [`run`].
///
/// [`run`]: Receiver::run
pub struct Receiver {
    detector: ToneDetector,
    state: FrameState,
    /// Packed byte view of the whole session symbol stream.
    view: Vec<u8>,
    /// Trailing symbols not yet forming a complete byte (at most 3).
    pending: Vec<u8>,
    /// Total symbols appended to the session stream.
    stream_len: u64,
    stats: ReceiverStats,
    stop: Arc<AtomicBool>,
    error_throttle: LogThrottle,
}

impl Receiver {
    /// Receiver for the link's fixed parameters.
    pub fn new() -> Self {
        Self::with_detector(ToneDetector::new())
    }

    /// Receiver around an explicitly configured detector.
    pub fn with_detector(detector: ToneDetector) -> Self {
        Self {
            detector,
            state: FrameState::hunt(),
            view: Vec::new(),
            pending: Vec::with_capacity(SYMBOLS_PER_BYTE),
            stream_len: 0,
            stats: ReceiverStats::default(),
            stop: Arc::new(AtomicBool::new(false)),
            error_throttle: LogThrottle::new(1000, 5),
        }
    }

    /// Flag that stops the receive loop before its next blocking read.
    ///
    /// May be set from any thread; an in-flight read is not interrupted,
    /// so termination latency is bounded by one symbol window plus the
    /// transport's own blocking behavior.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Drive the receive loop until EOF, a short read, or a stop request.
    ///
    /// Bad data never surfaces as an error: corrupt or misframed packets
    /// are counted, logged at a throttled rate, and dropped while the
    /// session continues. The only `Err` is a genuine transport I/O
    /// failure.
    pub fn run<T: Read>(
        &mut self,
        transport: &mut T,
        listener: &mut Listener,
    ) -> Result<ReceiverStats, LinkError> {
        let mut window = vec![0u8; SYMBOL_BYTES];

        'session: loop {
            let sym = match self.next_symbol(transport, &mut window, listener, true)? {
                Some(sym) => sym,
                None => break 'session,
            };

            let state = mem::replace(&mut self.state, FrameState::hunt());
            self.state = match state {
                FrameState::Hunt { preamble_run } => {
                    let run = advance_preamble(preamble_run, sym);
                    if run >= PREAMBLE_SYMBOLS {
                        // Preamble satisfied: the next three windows are
                        // sync candidates, consumed inline.
                        let mut sync = [0u8; 3];
                        for slot in sync.iter_mut() {
                            match self.next_symbol(transport, &mut window, listener, false)? {
                                Some(s) => *slot = s,
                                None => break 'session,
                            }
                        }
                        // At most one progress emission for the burst,
                        // decided on the stream length after all three
                        // appends.
                        if self.stream_len % SYMBOLS_PER_BYTE as u64 == 0 {
                            self.emit_byte_progress(listener);
                        }
                        if sync == SYNC_WORD {
                            log::debug!("sync acquired after preamble run of {run}");
                            FrameState::Collecting {
                                body_syms: Vec::new(),
                            }
                        } else {
                            self.stats.sync_misses += 1;
                            log::debug!("sync mismatch: {sync:?}, returning to hunt");
                            FrameState::hunt()
                        }
                    } else {
                        FrameState::Hunt { preamble_run: run }
                    }
                }
                FrameState::Collecting { mut body_syms } => {
                    body_syms.push(sym);
                    self.collect_step(body_syms, listener)
                }
            };
        }

        Ok(self.stats)
    }

    /// One COLLECTING step after the current symbol has been appended.
    fn collect_step(&mut self, body_syms: Vec<u8>, listener: &mut Listener) -> FrameState {
        if body_syms.len() < SYMBOLS_PER_BYTE {
            return FrameState::Collecting { body_syms };
        }

        let len = pack_group(&body_syms[..SYMBOLS_PER_BYTE]) as usize;
        let need_syms = (1 + len + 2) * SYMBOLS_PER_BYTE;

        if body_syms.len() < need_syms {
            return FrameState::Collecting { body_syms };
        }
        if body_syms.len() > need_syms {
            // Overshoot means the length byte cannot be trusted.
            self.stats.desyncs += 1;
            log::debug!(
                "body overshoot: {} symbols collected, {need_syms} expected",
                body_syms.len()
            );
            return FrameState::hunt();
        }

        let pkt = symbols_to_bytes(&body_syms);
        match packet::try_parse(&pkt) {
            Ok(payload) => {
                self.stats.packets_received += 1;
                log_frame_hex("packet accepted", &payload);
                if let Some(cb) = listener.on_packet.as_mut() {
                    cb(&payload);
                }
            }
            Err(PacketError::CrcMismatch {
                expected,
                calculated,
            }) => {
                self.stats.crc_errors += 1;
                if self.error_throttle.allow() {
                    log::warn!(
                        "dropping packet with bad CRC: expected {expected:04X}, calculated {calculated:04X}"
                    );
                }
            }
            Err(err) => {
                self.stats.length_errors += 1;
                if self.error_throttle.allow() {
                    log::warn!("dropping malformed packet: {err}");
                }
            }
        }
        FrameState::hunt()
    }

    /// Read one window, detect its symbol, and feed the observation
    /// streams. Returns `None` on EOF, short read, or stop request.
    fn next_symbol<T: Read>(
        &mut self,
        transport: &mut T,
        window: &mut [u8],
        listener: &mut Listener,
        emit_progress: bool,
    ) -> Result<Option<u8>, LinkError> {
        if self.stop.load(Ordering::Relaxed) {
            log::debug!("stop requested, ending session");
            return Ok(None);
        }
        if !read_full(transport, window)? {
            return Ok(None);
        }
        self.stats.windows_processed += 1;

        let sym = self.detector.detect(window);
        self.stats.symbols_detected += 1;
        if let Some(cb) = listener.on_symbol.as_mut() {
            cb(sym);
        }

        self.push_stream_symbol(sym);
        if emit_progress && self.stream_len % SYMBOLS_PER_BYTE as u64 == 0 {
            self.emit_byte_progress(listener);
        }
        Ok(Some(sym))
    }

    /// Append one symbol to the session stream accounting.
    ///
    /// The observable byte view is the packing of the entire stream; it
    /// is maintained incrementally from a rolling tail of at most three
    /// unpacked symbols.
    fn push_stream_symbol(&mut self, sym: u8) {
        self.pending.push(sym);
        self.stream_len += 1;
        if self.pending.len() == SYMBOLS_PER_BYTE {
            self.view.push(pack_group(&self.pending));
            self.pending.clear();
        }
    }

    fn emit_byte_progress(&mut self, listener: &mut Listener) {
        if let Some(cb) = listener.on_byte_progress.as_mut() {
            cb(&self.view);
        }
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

/// Preamble run update for one symbol.
///
/// A mismatching `0` can restart a run immediately; any other mismatch
/// clears it.
fn advance_preamble(run: usize, sym: u8) -> usize {
    let expected = if run % 2 == 0 {
        PREAMBLE_EVEN_SYMBOL
    } else {
        PREAMBLE_ODD_SYMBOL
    };
    if sym == expected {
        run + 1
    } else if sym == PREAMBLE_EVEN_SYMBOL {
        1
    } else {
        0
    }
}

/// Fill `buf` completely from the transport.
///
/// Returns `Ok(false)` when the channel is exhausted before the window is
/// full: a short read, the link's EOF signal.
fn read_full<T: Read>(transport: &mut T, buf: &mut [u8]) -> Result<bool, LinkError> {
    let mut filled = 0;
    while filled < buf.len() {
        match transport.read(&mut buf[filled..]) {
            Ok(0) => return Ok(false),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(false),
            Err(e) => return Err(LinkError::Transport(e)),
        }
    }
    Ok(true)
}
