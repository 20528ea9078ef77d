// crates/trivia-client/src/network.rs

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};
use trivia_core::{ClientMessage, ServerMessage};
use trivia_protocol::{decode_server, encode_client, FrameBuffer};

/// The client's end of the game connection.
pub struct ServerConnection<S> {
    stream: S,
    read_buffer: FrameBuffer,
}

impl ServerConnection<TcpStream> {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        info!("Connecting to {}...", addr);
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("Failed to connect to server: {}:{}", addr.ip(), addr.port()))?;
        stream.set_nodelay(true)?;
        info!("Connected successfully");
        Ok(Self::new(stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> ServerConnection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            read_buffer: FrameBuffer::new(),
        }
    }

    pub async fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        let frame = encode_client(msg)?;
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;

        debug!("Sent message: {:?}", msg);
        Ok(())
    }

    /// Next server message, or `None` once the server has closed.
    ///
    /// Frames that do not decode are logged and skipped. Safe to drop
    /// mid-read: nothing leaves the socket before it is buffered.
    pub async fn read_message(&mut self) -> Result<Option<ServerMessage>> {
        loop {
            while let Some(frame) = self.read_buffer.next_frame()? {
                match decode_server(&frame) {
                    Ok(msg) => {
                        debug!("Received from server: {:?}", msg);
                        return Ok(Some(msg));
                    }
                    Err(e) => warn!("Skipping frame {:?}: {}", String::from_utf8_lossy(&frame), e),
                }
            }

            let mut buf = [0u8; 1024];
            let n = self.stream.read(&mut buf).await?;
            if n == 0 {
                return Ok(None); // Connection closed
            }
            self.read_buffer.extend(&buf[..n]);
        }
    }
}
