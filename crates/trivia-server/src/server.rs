//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Loads the question bank.
//! - Listens on the configured address/port.
//! - Accepts exactly `players` connections and seats each one.
//! - Hands every connection to a single `ConnectionLoop` and waits for
//!   the match to finish.

use anyhow::Context;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tracing::info;

use trivia_core::{load_questions, GameContext, QuestionBank};

use crate::config::Config;
use crate::game_loop::ConnectionLoop;
use crate::types::{next_connection_id, GameOutcome};

/// Run one match with the given configuration.
pub async fn run(config: Config) -> anyhow::Result<GameOutcome> {
    let bank = load_questions(&config.question_file)?;
    info!(
        file = %config.question_file.display(),
        questions = bank.len(),
        "question bank loaded"
    );

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await.context("Bind failed.")?;
    info!(%addr, players = config.players, "listening");
    println!("Welcome to 392 Trivia!");

    serve(listener, bank, &config).await
}

/// Accept the players on an already bound listener, then play.
pub async fn serve(
    listener: TcpListener,
    bank: QuestionBank,
    config: &Config,
) -> anyhow::Result<GameOutcome> {
    let game = GameContext::new(bank, config.players);
    let mut game_loop: ConnectionLoop<OwnedReadHalf, OwnedWriteHalf> =
        ConnectionLoop::new(game, config.broadcast_pause);

    for _ in 0..config.players {
        let (stream, peer_addr) = listener.accept().await.context("Accept failed.")?;
        stream.set_nodelay(true)?;

        let connection = next_connection_id();
        let (reader, writer) = stream.into_split();
        let player = game_loop.add_player(connection, reader, writer)?;

        println!("New connection detected!");
        info!(player = %player, connection = %connection, %peer_addr, "accepted");
    }
    println!("Max connection reached!");

    // No more players are taken once the match is full.
    drop(listener);

    Ok(game_loop.run().await)
}
