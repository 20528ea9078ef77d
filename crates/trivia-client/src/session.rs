//! One player's view of a match.
//!
//! The session reacts to server frames in order. While a question is
//! open it waits on two things at once: the player's keystroke and the
//! next server frame. Whichever arrives first wins; a server frame means
//! someone else already answered, and it is handled like any other.

use std::io::{self, Write};

use anyhow::Result;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};
use trivia_core::{ClientMessage, ServerMessage};
use trivia_protocol::{FIELD_SEPARATOR, FRAME_TERMINATOR};

use crate::input::InputSource;
use crate::network::ServerConnection;

/// What the player saw, returned when the session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub name: String,
    pub questions_seen: usize,
    pub answers_sent: usize,

    /// Correct option texts in the order they were announced.
    pub answers_received: Vec<String>,

    /// True when the server ended the game with `Disconnect` rather than
    /// just closing the socket.
    pub said_goodbye: bool,
}

/// Play the session, printing player-facing text to stdout.
pub async fn run_session<S, I>(conn: &mut ServerConnection<S>, input: &mut I) -> Result<SessionSummary>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: InputSource,
{
    run_session_with_console(conn, input, &mut io::stdout()).await
}

/// Same as [`run_session`], with the console text going to `console`.
pub async fn run_session_with_console<S, I, O>(
    conn: &mut ServerConnection<S>,
    input: &mut I,
    console: &mut O,
) -> Result<SessionSummary>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: InputSource,
    O: Write,
{
    let mut summary = SessionSummary::default();
    let mut carried: Option<ServerMessage> = None;

    loop {
        let msg = match carried.take() {
            Some(msg) => msg,
            None => match conn.read_message().await? {
                Some(msg) => msg,
                None => {
                    info!("server closed the connection");
                    writeln!(console, "socket closed.")?;
                    break;
                }
            },
        };

        match msg {
            ServerMessage::NameQuery => {
                let name = ask_name(input, console).await?;
                conn.send(&ClientMessage::NameReturn { name: name.clone() })
                    .await?;
                summary.name = name;
            }
            ServerMessage::QuestionSend {
                index,
                prompt,
                options,
            } => {
                summary.questions_seen += 1;
                writeln!(console, "Question {}: {}", index + 1, prompt)?;
                for (i, option) in options.iter().enumerate() {
                    writeln!(console, "Press {}: {}", i + 1, option)?;
                }
                console.flush()?;

                tokio::select! {
                    biased;

                    next = conn.read_message() => match next? {
                        Some(msg) => carried = Some(msg),
                        None => {
                            info!("server closed the connection");
                            writeln!(console, "socket closed.")?;
                            break;
                        }
                    },
                    key = read_answer_key(input) => {
                        let choice = key?.to_string();
                        conn.send(&ClientMessage::QuestionResponse { choice }).await?;
                        summary.answers_sent += 1;
                    }
                }
            }
            ServerMessage::AnswerBroadcast { answer } => {
                writeln!(console, "{}", answer)?;
                summary.answers_received.push(answer);
            }
            ServerMessage::GameStart => debug!("ignoring GameStart"),
            ServerMessage::Disconnect => {
                summary.said_goodbye = true;
                break;
            }
        }
    }

    Ok(summary)
}

/// Prompt until the player gives a usable name.
async fn ask_name<I: InputSource, O: Write>(input: &mut I, console: &mut O) -> Result<String> {
    loop {
        write!(console, "Please type your name: ")?;
        console.flush()?;

        let name = sanitize_name(&input.read_name().await?);
        if !name.is_empty() {
            return Ok(name);
        }
    }
}

/// Next keystroke that can travel in a frame.
async fn read_answer_key<I: InputSource>(input: &mut I) -> Result<char> {
    loop {
        let key = input.read_key().await?;
        if !is_reserved(key) {
            return Ok(key);
        }
        debug!(?key, "ignoring reserved key");
    }
}

fn is_reserved(c: char) -> bool {
    c == FIELD_SEPARATOR as char || c == FRAME_TERMINATOR as char
}

fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !is_reserved(*c) && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_lose_reserved_bytes() {
        assert_eq!(sanitize_name("a|b\\c"), "abc");
        assert_eq!(sanitize_name(" zoe "), "zoe");
        assert_eq!(sanitize_name("|\\"), "");
    }
}
