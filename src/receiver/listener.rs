//! # Listener Contract
//!
//! Observation callbacks for a receive session, modeled as a capability
//! record: each stream is an optional callable, and an absent callback is
//! simply elided while the state machine keeps running.
//!
//! All callbacks are invoked from the receiver's own thread, in strict
//! detection order. Within a single symbol window the order is symbol,
//! then byte progress (when the stream crosses a byte boundary), then
//! packet (when a body completes). For any packet, every symbol and
//! byte-progress callback for the symbols belonging to it is delivered
//! before the packet callback.

/// Callback for every detected symbol, preamble and sync included.
pub type SymbolFn = Box<dyn FnMut(u8)>;

/// Callback for the running byte view of the raw symbol stream,
/// published whenever the stream length reaches a multiple of four.
pub type ByteProgressFn = Box<dyn FnMut(&[u8])>;

/// Callback for every payload whose outer packet validated.
pub type PacketFn = Box<dyn FnMut(&[u8])>;

/// Observation callbacks for a receive session.
#[derive(Default)]
pub struct Listener {
    pub on_symbol: Option<SymbolFn>,
    pub on_byte_progress: Option<ByteProgressFn>,
    pub on_packet: Option<PacketFn>,
}

impl Listener {
    /// A listener that observes nothing.
    pub fn none() -> Self {
        Self::default()
    }
}
