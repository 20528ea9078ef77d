//! trivia-server
//!
//! Hosts one trivia match over TCP for a fixed number of players.
//!
//! - [`config`]    : command line and environment knobs
//! - [`server`]    : bind, accept, hand off to the loop
//! - [`game_loop`] : the single task that owns the game
//! - [`broadcast`] : same frame to every player
//! - [`framed`]    : frames out of a byte stream

pub mod broadcast;
pub mod config;
pub mod framed;
pub mod game_loop;
pub mod server;
pub mod types;

pub use config::Config;
pub use types::{GameOutcome, Standing};
