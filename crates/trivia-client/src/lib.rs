//! trivia-client
//!
//! The player side of the trivia game.
//!
//! - [`config`]  : command line
//! - [`network`] : framed connection to the server
//! - [`input`]   : keyboard or scripted player input
//! - [`session`] : reacts to the server until the game ends

pub mod config;
pub mod input;
pub mod network;
pub mod session;

pub use input::{InputError, InputSource, ScriptedInput, TerminalInput};
pub use network::ServerConnection;
pub use session::{run_session, run_session_with_console, SessionSummary};
