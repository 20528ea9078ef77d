//! Framed reader over one player connection.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;
use trivia_protocol::FrameBuffer;

/// Buffers partial reads and yields one complete frame body at a time.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    buffer: FrameBuffer,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        FrameReader {
            inner,
            buffer: FrameBuffer::new(),
        }
    }

    /// Next frame body, or `None` once the peer has closed.
    ///
    /// Cancel-safe: bytes are only moved into the buffer after a read
    /// completes, so dropping the future loses nothing.
    pub async fn read_frame(&mut self) -> anyhow::Result<Option<Bytes>> {
        let mut chunk = [0u8; 1024];

        loop {
            if let Some(frame) = self.buffer.next_frame()? {
                return Ok(Some(frame));
            }

            let n = self.inner.read(&mut chunk).await?;
            if n == 0 {
                if !self.buffer.is_empty() {
                    debug!(pending = self.buffer.pending(), "dropping unterminated frame at EOF");
                }
                return Ok(None);
            }
            self.buffer.extend(&chunk[..n]);
        }
    }
}
