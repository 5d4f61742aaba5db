//! # Wire Format Layers
//!
//! Everything between detected symbols and application messages: 2-bit
//! symbol packing, the CRC primitive, the outer length-prefixed packet,
//! and the inner addressed message.

pub mod crc;
pub mod message;
pub mod packet;
pub mod symbols;

pub use crc::crc16_ccitt;
pub use message::{Message, MessageError, MessageKind};
pub use packet::{make_packet, try_parse, PacketError};
pub use symbols::{bytes_to_symbols, symbols_to_bytes};
