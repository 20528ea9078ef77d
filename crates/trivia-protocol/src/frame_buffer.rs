//! Incremental frame accumulation.
//!
//! TCP hands us bytes in arbitrary chunks: half a frame, or three frames
//! at once. `FrameBuffer` keeps whatever has arrived and hands out one
//! complete frame body at a time, so I/O chunking never leaks into the
//! protocol layer.

use bytes::{Bytes, BytesMut};

use crate::frame_codec::ProtocolError;
use crate::wire_types::{FRAME_TERMINATOR, MAX_FRAME_LEN};

#[derive(Debug)]
pub struct FrameBuffer {
    buf: BytesMut,
    max_frame_len: usize,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer::with_limit(MAX_FRAME_LEN)
    }

    /// Buffer that rejects frame bodies longer than `max_frame_len`.
    pub fn with_limit(max_frame_len: usize) -> Self {
        FrameBuffer {
            buf: BytesMut::with_capacity(1024),
            max_frame_len,
        }
    }

    /// Append freshly read bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the oldest complete frame body (terminator stripped).
    ///
    /// `Ok(None)` means more bytes are needed.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>, ProtocolError> {
        match self.buf.iter().position(|&b| b == FRAME_TERMINATOR) {
            Some(end) if end > self.max_frame_len => Err(self.too_long()),
            Some(end) => {
                let mut frame = self.buf.split_to(end + 1);
                frame.truncate(end);
                Ok(Some(frame.freeze()))
            }
            None if self.buf.len() > self.max_frame_len => Err(self.too_long()),
            None => Ok(None),
        }
    }

    /// Bytes received but not yet part of a complete frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn too_long(&self) -> ProtocolError {
        ProtocolError::FrameTooLong {
            limit: self.max_frame_len,
        }
    }
}
