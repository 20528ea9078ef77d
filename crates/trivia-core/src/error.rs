//! Error types for the trivia core.
//!
//! The state machine itself is infallible: events that do not fit the
//! current phase are ignored. Errors only come from loading questions
//! and from filling the fixed-size player registry.

use std::path::PathBuf;

use thiserror::Error;

/// A question that cannot be represented on the wire or is internally
/// inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("Expected prompt string (received empty line).")]
    EmptyPrompt,

    #[error("Duplicate option.")]
    DuplicateOption,

    /// Only `Question::new` can report this; the file parser derives
    /// the index from the options themselves.
    #[error("Correct answer index {0} is out of range.")]
    AnswerOutOfRange(usize),

    #[error("Reserved character in question text.")]
    ReservedCharacter,
}

/// Fatal error while reading a question file.
#[derive(Debug, Error)]
pub enum QuestionFileError {
    /// The file could not be opened or read.
    #[error("Failed to read question file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line broke the prompt / options / answer / separator cycle.
    #[error("Parsing error: {file}({line}) ~ {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// The file parsed but contained no complete question.
    #[error("Parsing error: {file} ~ No questions found.")]
    Empty { file: String },
}

/// Errors from the fixed-capacity player registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("player registry is full ({capacity} players)")]
    Full { capacity: usize },

    #[error("connection {0} is already registered")]
    AlreadyRegistered(u64),

    #[error("unknown player id {0}")]
    UnknownPlayer(usize),
}
