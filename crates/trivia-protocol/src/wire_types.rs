//! Low-level wire types and constants.
//!
//! This module defines:
//! - The field separator and frame terminator bytes.
//! - Opcodes for every message type.
//! - The upper bound on a buffered frame.
//!
//! The actual encode/decode logic lives in `frame_codec` and
//! `message_codec`.

use std::fmt;

/// Separates the fields of a frame.
pub const FIELD_SEPARATOR: u8 = b'|';

/// Ends every frame. Never part of field content.
pub const FRAME_TERMINATOR: u8 = b'\\';

/// Largest frame body (terminator excluded) a reader will buffer.
pub const MAX_FRAME_LEN: usize = 4096;

/// Message types. The numeric value is sent as the first field.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// server -> client, no fields.
    NameQuery = 0,

    /// client -> server: name.
    NameReturn = 1,

    /// Reserved, never sent.
    GameStart = 2,

    /// server -> client: index, prompt, option0, option1, option2.
    QuestionSend = 3,

    /// client -> server: choice digit.
    QuestionResponse = 4,

    /// server -> client: correct option text.
    AnswerBroadcast = 5,

    /// server -> client, no fields.
    Disconnect = 6,
}

impl Opcode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Opcode::NameQuery),
            1 => Some(Opcode::NameReturn),
            2 => Some(Opcode::GameStart),
            3 => Some(Opcode::QuestionSend),
            4 => Some(Opcode::QuestionResponse),
            5 => Some(Opcode::AnswerBroadcast),
            6 => Some(Opcode::Disconnect),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Number of fields that follow the opcode.
    pub fn field_count(self) -> usize {
        match self {
            Opcode::NameQuery | Opcode::GameStart | Opcode::Disconnect => 0,
            Opcode::NameReturn | Opcode::QuestionResponse | Opcode::AnswerBroadcast => 1,
            Opcode::QuestionSend => 5,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.as_u8())
    }
}

/// Whether `field` can be sent without breaking the framing.
pub fn is_valid_field(field: &str) -> bool {
    !field
        .bytes()
        .any(|b| b == FIELD_SEPARATOR || b == FRAME_TERMINATOR)
}
