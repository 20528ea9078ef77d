//! Message types exchanged between the trivia server and its players.
//!
//! These are **transport-agnostic** logical messages:
//! - [`ClientMessage`]: what a player sends, consumed by the game.
//! - [`ServerMessage`]: what the game broadcasts.
//!
//! Note: the pipe-delimited wire format lives in the `trivia-protocol`
//! crate; this module is purely logical.

/// A message from a player to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Answer to [`ServerMessage::NameQuery`].
    NameReturn { name: String },

    /// Answer to the active question: the pressed key, `'1'..='3'` when
    /// the player behaves.
    QuestionResponse { choice: String },
}

/// A message from the server, always sent to every player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Ask every player for a name.
    NameQuery,

    /// Reserved on the wire; the server never sends it.
    GameStart,

    /// A question and its three options.
    QuestionSend {
        /// 0-based position of the question in the bank.
        index: usize,
        prompt: String,
        options: [String; 3],
    },

    /// Text of the correct option of the question just answered.
    AnswerBroadcast { answer: String },

    /// The game is over; players should leave.
    Disconnect,
}

impl ServerMessage {
    /// Convenience constructor for a question broadcast.
    pub fn question(index: usize, question: &crate::Question) -> Self {
        ServerMessage::QuestionSend {
            index,
            prompt: question.prompt().to_string(),
            options: question.options().clone(),
        }
    }

    /// Convenience constructor for an answer broadcast.
    pub fn answer(answer: impl Into<String>) -> Self {
        ServerMessage::AnswerBroadcast {
            answer: answer.into(),
        }
    }
}
