//! Broadcast dispatcher.
//!
//! Every seated player has one write half here, kept in registry order.
//! A broadcast encodes the message once and writes the same bytes to
//! every open sink.

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use trivia_core::{PlayerId, ServerMessage};
use trivia_protocol::encode_server;

#[derive(Debug)]
struct Sink<W> {
    player: PlayerId,
    writer: W,
    closed: bool,
}

#[derive(Debug)]
pub struct Broadcaster<W> {
    sinks: Vec<Sink<W>>,
    pause: Duration,
}

impl<W: AsyncWrite + Unpin> Broadcaster<W> {
    pub fn new(pause: Duration) -> Self {
        Broadcaster {
            sinks: Vec::new(),
            pause,
        }
    }

    /// Add the write half for `player`. Call in registry order.
    pub fn add(&mut self, player: PlayerId, writer: W) {
        self.sinks.push(Sink {
            player,
            writer,
            closed: false,
        });
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Send `msg` to every open sink and return how many got it.
    ///
    /// A failing sink is logged, marked closed and skipped from then on.
    pub async fn broadcast(&mut self, msg: &ServerMessage) -> anyhow::Result<usize> {
        let frame = encode_server(msg)?;
        let mut delivered = 0;

        for sink in self.sinks.iter_mut().filter(|s| !s.closed) {
            let result = async {
                sink.writer.write_all(&frame).await?;
                sink.writer.flush().await
            }
            .await;

            match result {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(player = %sink.player, error = %e, "broadcast write failed");
                    sink.closed = true;
                }
            }
        }
        debug!(?msg, delivered, "broadcast");

        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        Ok(delivered)
    }

    /// Stop writing to `player`, e.g. after its peer went away.
    pub fn mark_closed(&mut self, player: PlayerId) {
        if let Some(sink) = self.sinks.iter_mut().find(|s| s.player == player) {
            sink.closed = true;
        }
    }

    /// Close the write side of every connection.
    pub async fn shutdown(&mut self) {
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.writer.shutdown().await {
                debug!(player = %sink.player, error = %e, "shutdown failed");
            }
            sink.closed = true;
        }
    }
}
