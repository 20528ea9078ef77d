//! Frame-level encoding/decoding.
//!
//! A frame is a run of ASCII fields joined by `|` and closed by a single
//! `\`:
//!
//! ```text
//! 3|0|Largest planet?|Mars|Jupiter|Venus\
//! ^ opcode            ^ fields ...       ^ terminator
//! ```
//!
//! This module knows nothing about what the fields mean; see
//! `message_codec` for the typed layer.

use std::str::Split;

use thiserror::Error;

use crate::wire_types::{
    is_valid_field, Opcode, FIELD_SEPARATOR, FRAME_TERMINATOR, MAX_FRAME_LEN,
};

/// Errors that can arise when encoding/decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Frame bytes are not valid UTF-8.
    #[error("frame is not valid UTF-8")]
    InvalidUtf8,

    /// First field is not an integer.
    #[error("invalid opcode field: {0:?}")]
    InvalidOpcode(String),

    /// Integer opcode with no known message type.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(u8),

    /// Known opcode that is not valid in this direction.
    #[error("unexpected opcode: {0}")]
    UnexpectedOpcode(Opcode),

    /// Wrong number of fields for the opcode.
    #[error("{opcode} expects {expected} field(s), got {got}")]
    FieldCount {
        opcode: Opcode,
        expected: usize,
        got: usize,
    },

    /// A field failed to parse.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// A field to encode contains `|` or `\`.
    #[error("field contains a reserved byte: {0:?}")]
    ReservedByte(String),

    /// No terminator within the frame size limit.
    #[error("frame exceeds {limit} bytes")]
    FrameTooLong { limit: usize },
}

/// Append one frame (opcode, fields, terminator) to `out`.
pub fn encode_frame(opcode: Opcode, fields: &[&str], out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    if let Some(bad) = fields.iter().find(|f| !is_valid_field(f)) {
        return Err(ProtocolError::ReservedByte(bad.to_string()));
    }

    out.extend_from_slice(opcode.as_u8().to_string().as_bytes());
    for field in fields {
        out.push(FIELD_SEPARATOR);
        out.extend_from_slice(field.as_bytes());
    }
    out.push(FRAME_TERMINATOR);

    Ok(())
}

/// Split a frame into its opcode and owned fields.
///
/// A trailing terminator is stripped if present, so both a raw frame and
/// a body handed out by `FrameBuffer` are accepted. Only the opcode is
/// validated here; field counts are checked by `message_codec`.
pub fn decode_frame(frame: &[u8]) -> Result<(Opcode, Vec<String>), ProtocolError> {
    let mut tokens = FieldTokenizer::new(frame)?;
    let opcode = tokens.opcode()?;
    let fields = tokens.by_ref().map(str::to_string).collect();
    Ok((opcode, fields))
}

/// Walks the `|`-separated fields of one frame body.
#[derive(Debug, Clone)]
pub struct FieldTokenizer<'a> {
    fields: Split<'a, char>,
    consumed: usize,
}

impl<'a> FieldTokenizer<'a> {
    pub fn new(frame: &'a [u8]) -> Result<Self, ProtocolError> {
        if frame.len() > MAX_FRAME_LEN + 1 {
            return Err(ProtocolError::FrameTooLong {
                limit: MAX_FRAME_LEN,
            });
        }

        let body = match frame.split_last() {
            Some((&FRAME_TERMINATOR, body)) => body,
            _ => frame,
        };
        let text = std::str::from_utf8(body).map_err(|_| ProtocolError::InvalidUtf8)?;

        Ok(FieldTokenizer {
            fields: text.split(FIELD_SEPARATOR as char),
            consumed: 0,
        })
    }

    /// Parse the first field as an opcode. Must be called first.
    pub fn opcode(&mut self) -> Result<Opcode, ProtocolError> {
        let raw = self.next().unwrap_or_default();
        let value = raw
            .trim()
            .parse::<u8>()
            .map_err(|_| ProtocolError::InvalidOpcode(raw.to_string()))?;
        Opcode::from_u8(value).ok_or(ProtocolError::UnknownOpcode(value))
    }

    /// Take the next field, failing with a field-count error if missing.
    pub fn expect_field(&mut self, opcode: Opcode) -> Result<&'a str, ProtocolError> {
        let got = self.consumed.saturating_sub(1);
        self.next().ok_or(ProtocolError::FieldCount {
            opcode,
            expected: opcode.field_count(),
            got,
        })
    }

    /// Fail if any field is left over.
    pub fn finish(mut self, opcode: Opcode) -> Result<(), ProtocolError> {
        if self.next().is_none() {
            return Ok(());
        }
        let got = self.consumed - 1 + self.count();
        Err(ProtocolError::FieldCount {
            opcode,
            expected: opcode.field_count(),
            got,
        })
    }
}

impl<'a> Iterator for FieldTokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let field = self.fields.next()?;
        self.consumed += 1;
        Some(field)
    }
}
