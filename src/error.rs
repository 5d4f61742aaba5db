//! # Link Error Handling
//!
//! This module defines the LinkError enum, the top-level error type of the
//! tonelink-rs crate.

use thiserror::Error;

use crate::framing::message::MessageError;
use crate::framing::packet::PacketError;

/// Represents the different error types that can occur in the link crate.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The transport failed with a genuine I/O error. EOF and short reads
    /// end a receive session cleanly and are never reported here.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// An outer packet failed to parse.
    #[error(transparent)]
    Packet(#[from] PacketError),

    /// An inner message failed to decode.
    #[error(transparent)]
    Message(#[from] MessageError),
}
