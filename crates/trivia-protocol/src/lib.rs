//! trivia-protocol
//!
//! Wire-level encoding/decoding for the trivia game.
//!
//! This crate is responsible for turning logical game messages
//! (`trivia_core::ClientMessage` / `ServerMessage`) into bytes and
//! back again.
//!
//! - [`wire_types`]    : opcodes, separator / terminator bytes
//! - [`frame_codec`]   : untyped frames and the field tokenizer
//! - [`message_codec`] : typed messages on top of frames
//! - [`frame_buffer`]  : turns a byte stream into complete frames

pub mod wire_types;
pub mod frame_codec;
pub mod message_codec;
pub mod frame_buffer;

pub use wire_types::{Opcode, FIELD_SEPARATOR, FRAME_TERMINATOR, MAX_FRAME_LEN};

pub use frame_codec::{decode_frame, encode_frame, FieldTokenizer, ProtocolError};

pub use message_codec::{decode_client, decode_server, encode_client, encode_server};

pub use frame_buffer::FrameBuffer;
