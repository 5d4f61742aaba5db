//! # Receive Session
//!
//! The blocking receive loop: transport windows in, listener callbacks
//! out. One receiver owns one transport channel and drives exactly one
//! framing state machine.

pub mod framer;
pub mod listener;

pub use framer::{Receiver, ReceiverStats};
pub use listener::Listener;
