//! # Inner Message Codec
//!
//! The addressed payload carried inside an outer packet:
//! `[SRC][DST][TYPE][LEN][DATA]`, data UTF-8 by convention. `DST = 0xFF`
//! denotes broadcast; TYPE codes other than direct/announce are parsable
//! but unassigned.

use crate::constants::{BROADCAST_ADDR, MAX_DATA_LEN, MSG_TYPE_ANNOUNCE, MSG_TYPE_DIRECT};
use serde::Serialize;
use thiserror::Error;

/// Errors from decoding an inner message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("message too short: {actual} bytes, need at least 4")]
    TooShort { actual: usize },

    #[error("data length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Message TYPE field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    /// Addressed to a single node.
    Direct,
    /// Presence announcement, typically broadcast.
    Announce,
    /// Parsable but unassigned TYPE code.
    Unassigned(u8),
}

impl MessageKind {
    pub fn from_byte(b: u8) -> Self {
        match b {
            MSG_TYPE_DIRECT => MessageKind::Direct,
            MSG_TYPE_ANNOUNCE => MessageKind::Announce,
            other => MessageKind::Unassigned(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            MessageKind::Direct => MSG_TYPE_DIRECT,
            MessageKind::Announce => MSG_TYPE_ANNOUNCE,
            MessageKind::Unassigned(other) => other,
        }
    }
}

/// An addressed payload carried inside an outer packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub src: u8,
    pub dst: u8,
    pub kind: MessageKind,
    pub data: Vec<u8>,
}

impl Message {
    pub fn new(src: u8, dst: u8, kind: MessageKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            src,
            dst,
            kind,
            data: data.into(),
        }
    }

    /// Encode to wire bytes.
    ///
    /// Data beyond 255 bytes is silently truncated so that sender and
    /// receiver agree on the wire format.
    pub fn encode(&self) -> Vec<u8> {
        let data = &self.data[..self.data.len().min(MAX_DATA_LEN)];

        let mut out = Vec::with_capacity(4 + data.len());
        out.push(self.src);
        out.push(self.dst);
        out.push(self.kind.to_byte());
        out.push(data.len() as u8);
        out.extend_from_slice(data);
        out
    }

    /// Decode from an outer packet payload.
    ///
    /// Succeeds only when the header is present and the LEN field matches
    /// the remaining bytes exactly.
    pub fn decode(payload: &[u8]) -> Result<Message, MessageError> {
        if payload.len() < 4 {
            return Err(MessageError::TooShort {
                actual: payload.len(),
            });
        }

        let len = payload[3] as usize;
        if payload.len() != 4 + len {
            return Err(MessageError::LengthMismatch {
                expected: 4 + len,
                actual: payload.len(),
            });
        }

        Ok(Message {
            src: payload[0],
            dst: payload[1],
            kind: MessageKind::from_byte(payload[2]),
            data: payload[4..].to_vec(),
        })
    }

    /// Whether this message is addressed to every node.
    pub fn is_broadcast(&self) -> bool {
        self.dst == BROADCAST_ADDR
    }

    /// Data as text; the link carries UTF-8 by convention.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}
