//! Game state machine.
//!
//! [`GameContext`] owns everything one match needs: the question bank,
//! the player registry and the phase bookkeeping. It consumes
//! [`ClientMessage`]s one at a time and returns the [`ServerMessage`]s
//! that must be broadcast, in order. It never touches the network.
//!
//! Phases only move forward:
//!
//! ```text
//! WaitingForNames --(last name)--> InProgress --(last answer)--> Ended
//! ```
//!
//! The first response to a question settles it: the responder is scored,
//! the answer is broadcast and the next question goes out in the same
//! step. Late responses from other players land on the next question.

use tracing::{debug, info};

use crate::error::RegistryError;
use crate::messages::{ClientMessage, ServerMessage};
use crate::player::{ConnectionId, Player, PlayerId, PlayerRegistry};
use crate::question::{Question, QuestionBank};

/// Coarse stage of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    WaitingForNames,
    InProgress,
    Ended,
}

/// The single owner of a match's mutable state.
#[derive(Debug, Clone)]
pub struct GameContext {
    bank: QuestionBank,
    players: PlayerRegistry,
    phase: Phase,
    question_index: usize,

    /// Set between broadcasting a question and receiving its first response.
    question_pending: bool,

    /// Index into `bank` of the question awaiting a response.
    active_question: Option<usize>,
}

impl GameContext {
    /// Create a match over `bank` for exactly `players` players.
    pub fn new(bank: QuestionBank, players: usize) -> Self {
        GameContext {
            bank,
            players: PlayerRegistry::with_capacity(players),
            phase: Phase::WaitingForNames,
            question_index: 0,
            question_pending: false,
            active_question: None,
        }
    }

    /// Seat the player behind `connection` (accept phase).
    pub fn register(&mut self, connection: ConnectionId) -> Result<PlayerId, RegistryError> {
        let id = self.players.register(connection)?;
        debug!(player = %id, connection = %connection, "player seated");
        Ok(id)
    }

    /// Messages that open the match: everyone is asked for a name.
    pub fn begin(&self) -> Vec<ServerMessage> {
        vec![ServerMessage::NameQuery]
    }

    /// Apply one inbound message and return what must be broadcast.
    ///
    /// Messages that do not fit the current phase are ignored.
    pub fn handle(&mut self, from: PlayerId, msg: ClientMessage) -> Vec<ServerMessage> {
        let mut out = Vec::new();

        match msg {
            ClientMessage::NameReturn { name } => self.on_name_return(from, name, &mut out),
            ClientMessage::QuestionResponse { choice } => {
                self.on_question_response(from, &choice, &mut out)
            }
        }

        out
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn on_name_return(&mut self, from: PlayerId, name: String, out: &mut Vec<ServerMessage>) {
        if self.phase != Phase::WaitingForNames {
            debug!(player = %from, phase = ?self.phase, "ignoring late name");
            return;
        }

        if let Err(e) = self.players.set_name(from, name.as_str()) {
            debug!(player = %from, error = %e, "ignoring name");
            return;
        }
        info!(player = %from, name = %name, "player named");

        if self.players.all_named() {
            info!("all players named, game starts");
            self.phase = Phase::InProgress;
            self.advance(out);
        }
    }

    fn on_question_response(&mut self, from: PlayerId, choice: &str, out: &mut Vec<ServerMessage>) {
        if self.phase != Phase::InProgress || !self.question_pending {
            debug!(player = %from, phase = ?self.phase, "ignoring response");
            return;
        }
        let Some(question) = self.active_question.and_then(|i| self.bank.get(i)) else {
            return;
        };

        let correct = question.is_correct_choice(choice);
        let answer = question.correct_option().to_string();

        let Ok(player) = self.players.get_mut(from) else {
            debug!(player = %from, "ignoring response from unknown player");
            return;
        };
        if correct {
            player.score += 1;
        } else {
            player.score -= 1;
        }
        debug!(
            player = %from,
            choice,
            correct,
            score = player.score,
            "response scored"
        );

        out.push(ServerMessage::answer(answer));

        self.question_pending = false;
        self.active_question = None;
        self.question_index += 1;
        self.advance(out);
    }

    /// Ask the next question, or end the match when none are left.
    fn advance(&mut self, out: &mut Vec<ServerMessage>) {
        if self.question_index >= self.bank.len() {
            self.finish(out);
            return;
        }
        if self.question_pending {
            return;
        }

        if let Some(question) = self.bank.get(self.question_index) {
            info!(index = self.question_index, prompt = question.prompt(), "asking question");
            out.push(ServerMessage::question(self.question_index, question));
            self.active_question = Some(self.question_index);
            self.question_pending = true;
        }
    }

    fn finish(&mut self, out: &mut Vec<ServerMessage>) {
        self.phase = Phase::Ended;
        self.question_pending = false;
        self.active_question = None;

        if let Some((id, winner)) = self.winner() {
            info!(player = %id, name = %winner.name, score = winner.score, "game over");
        }
        out.push(ServerMessage::Disconnect);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn question_pending(&self) -> bool {
        self.question_pending
    }

    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active_question.and_then(|i| self.bank.get(i))
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Player with the strictly highest score; ties go to the lowest
    /// registry index. `None` only when nobody is seated.
    pub fn winner(&self) -> Option<(PlayerId, &Player)> {
        let mut best: Option<(PlayerId, &Player)> = None;
        for (id, player) in self.players.iter() {
            match best {
                Some((_, b)) if player.score <= b.score => {}
                _ => best = Some((id, player)),
            }
        }
        best
    }
}
