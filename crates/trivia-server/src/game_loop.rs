//! Multiplexed connection loop.
//!
//! This task owns the `GameContext` and every player connection. Each
//! iteration waits until some player has a complete frame, feeds that
//! one frame to the game and broadcasts whatever the game produced
//! before waiting again. There is exactly one mutator, so no locks.
//!
//! When several players are ready at once, the lowest registry index
//! wins: `select_all` polls the read futures in the order they were
//! added.

use std::time::Duration;

use bytes::Bytes;
use futures::future::select_all;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use trivia_core::{ClientMessage, ConnectionId, GameContext, Phase, PlayerId, ServerMessage};
use trivia_protocol::decode_client;

use crate::broadcast::Broadcaster;
use crate::framed::FrameReader;
use crate::types::GameOutcome;

type ReadEvent = (PlayerId, anyhow::Result<Option<Bytes>>);

pub struct ConnectionLoop<R, W> {
    game: GameContext,
    readers: Vec<(PlayerId, FrameReader<R>)>,
    out: Broadcaster<W>,
}

impl<R, W> ConnectionLoop<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(game: GameContext, broadcast_pause: Duration) -> Self {
        ConnectionLoop {
            game,
            readers: Vec::new(),
            out: Broadcaster::new(broadcast_pause),
        }
    }

    /// Seat a freshly accepted connection.
    pub fn add_player(
        &mut self,
        connection: ConnectionId,
        reader: R,
        writer: W,
    ) -> anyhow::Result<PlayerId> {
        let id = self.game.register(connection)?;
        self.readers.push((id, FrameReader::new(reader)));
        self.out.add(id, writer);
        Ok(id)
    }

    pub fn game(&self) -> &GameContext {
        &self.game
    }

    /// Drive the match to its end. Never fails: connection problems
    /// turn into [`GameOutcome::Aborted`].
    pub async fn run(mut self) -> GameOutcome {
        if self.readers.is_empty() {
            return GameOutcome::aborted(&self.game, None, "no players seated");
        }

        for msg in self.game.begin() {
            self.send(&msg).await;
        }

        loop {
            if self.game.is_ended() {
                self.out.shutdown().await;
                return GameOutcome::completed(&self.game);
            }

            let (player, event) = next_event(&mut self.readers).await;
            match event {
                Ok(Some(frame)) => self.dispatch(player, &frame).await,
                Ok(None) => {
                    println!("Lost connection!");
                    return self.abort(player, "connection closed by peer").await;
                }
                Err(e) => {
                    error!(player = %player, error = %e, "read failed");
                    return self.abort(player, e.to_string()).await;
                }
            }
        }
    }

    async fn dispatch(&mut self, player: PlayerId, frame: &[u8]) {
        let msg = match decode_client(frame) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(
                    player = %player,
                    error = %e,
                    frame = %String::from_utf8_lossy(frame),
                    "ignoring undecodable frame"
                );
                return;
            }
        };
        debug!(player = %player, ?msg, "received");

        let was_named = self.game.player(player).is_some_and(|p| p.is_named());
        let phase_before = self.game.phase();
        let is_name = matches!(msg, ClientMessage::NameReturn { .. });

        let outputs = self.game.handle(player, msg);

        if is_name && !was_named {
            if let Some(p) = self.game.player(player).filter(|p| p.is_named()) {
                println!("Hi {}!", p.name);
            }
        }
        if phase_before == Phase::WaitingForNames && self.game.phase() != Phase::WaitingForNames {
            println!("The game starts now!");
        }

        for msg in &outputs {
            self.send(msg).await;
        }
    }

    async fn send(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::QuestionSend {
                index,
                prompt,
                options,
            } => {
                println!("Question {}: {}", index + 1, prompt);
                for (i, option) in options.iter().enumerate() {
                    println!("Press {}: {}", i + 1, option);
                }
            }
            ServerMessage::Disconnect if self.game.is_ended() => {
                if let Some((_, winner)) = self.game.winner() {
                    println!("Congrats, {}!", winner.name);
                }
            }
            _ => {}
        }

        if let Err(e) = self.out.broadcast(msg).await {
            error!(error = %e, ?msg, "could not encode broadcast");
        }
    }

    async fn abort(mut self, player: PlayerId, reason: impl Into<String>) -> GameOutcome {
        let reason = reason.into();
        warn!(player = %player, phase = ?self.game.phase(), %reason, "player lost, ending game");

        self.out.mark_closed(player);
        if let Err(e) = self.out.broadcast(&ServerMessage::Disconnect).await {
            error!(error = %e, "could not send disconnect");
        }
        self.out.shutdown().await;

        info!("all connections closed");
        GameOutcome::aborted(&self.game, Some(player), reason)
    }
}

/// Wait for the first complete frame (or close, or error) on any
/// connection. Ties go to the earliest entry in `readers`.
async fn next_event<R: AsyncRead + Unpin>(readers: &mut [(PlayerId, FrameReader<R>)]) -> ReadEvent {
    let pending = readers.iter_mut().map(|(id, reader)| {
        let id = *id;
        Box::pin(async move { (id, reader.read_frame().await) })
    });
    let (ready, _index, _rest) = select_all(pending).await;
    ready
}
