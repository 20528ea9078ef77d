//! Shared types for the trivia TCP server.
//!
//! This module defines:
//! - connection id allocation for accepted sockets
//! - `Standing`: a player's final name and score
//! - `GameOutcome`: how the connection loop ended

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use trivia_core::{ConnectionId, GameContext, PlayerId};

/// Process-wide counter for assigning unique `ConnectionId`s.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_connection_id() -> ConnectionId {
    ConnectionId(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
}

/// One row of the final scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub score: i32,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every question was answered.
    Completed {
        winner: Option<Standing>,
        standings: Vec<Standing>,
    },

    /// A player dropped out (or the loop could not read), so the match
    /// was torn down early.
    Aborted {
        player: Option<PlayerId>,
        reason: String,
        standings: Vec<Standing>,
    },
}

impl GameOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, GameOutcome::Completed { .. })
    }

    pub fn standings(&self) -> &[Standing] {
        match self {
            GameOutcome::Completed { standings, .. } | GameOutcome::Aborted { standings, .. } => {
                standings
            }
        }
    }

    pub(crate) fn completed(game: &GameContext) -> Self {
        GameOutcome::Completed {
            winner: game.winner().map(|(id, p)| Standing {
                player: id,
                name: p.name.clone(),
                score: p.score,
            }),
            standings: standings(game),
        }
    }

    pub(crate) fn aborted(game: &GameContext, player: Option<PlayerId>, reason: impl Into<String>) -> Self {
        GameOutcome::Aborted {
            player,
            reason: reason.into(),
            standings: standings(game),
        }
    }
}

fn standings(game: &GameContext) -> Vec<Standing> {
    game.players()
        .iter()
        .map(|(id, p)| Standing {
            player: id,
            name: p.name.clone(),
            score: p.score,
        })
        .collect()
}
