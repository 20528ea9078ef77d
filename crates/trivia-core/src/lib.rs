//! trivia-core
//!
//! Pure trivia game logic:
//! - questions and the question bank
//! - question-file parser
//! - player registry
//! - messages (client/server)
//! - game state machine

pub mod question;
pub mod question_file;
pub mod player;
pub mod messages;
pub mod game;
pub mod error;

pub use question::{Question, QuestionBank, OPTION_COUNT};
pub use question_file::{load_questions, parse_questions};

pub use player::{ConnectionId, Player, PlayerId, PlayerRegistry};

pub use messages::{ClientMessage, ServerMessage};

pub use game::{GameContext, Phase};
pub use error::{QuestionError, QuestionFileError, RegistryError};
