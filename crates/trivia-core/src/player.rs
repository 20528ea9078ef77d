//! Players and the fixed-capacity player registry.

use std::fmt;

use indexmap::IndexMap;

use crate::error::RegistryError;

/// Opaque handle for an accepted connection.
///
/// The networking layer picks the value; we only guarantee that each
/// connection is registered once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a player in the registry (accept order, 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub connection: ConnectionId,

    /// Empty until the player answers the name query.
    pub name: String,

    /// +1 per correct answer, -1 per wrong one.
    pub score: i32,
}

impl Player {
    pub fn new(connection: ConnectionId) -> Self {
        Player {
            connection,
            name: String::new(),
            score: 0,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Connection -> Player, in accept order, with a capacity fixed at
/// startup. Players are never removed.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    players: IndexMap<ConnectionId, Player>,
    capacity: usize,
}

impl PlayerRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        PlayerRegistry {
            players: IndexMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Add the player behind `connection`, returning its registry index.
    pub fn register(&mut self, connection: ConnectionId) -> Result<PlayerId, RegistryError> {
        if self.players.contains_key(&connection) {
            return Err(RegistryError::AlreadyRegistered(connection.0));
        }
        if self.is_full() {
            return Err(RegistryError::Full {
                capacity: self.capacity,
            });
        }

        let (index, _) = self.players.insert_full(connection, Player::new(connection));
        Ok(PlayerId(index))
    }

    pub fn set_name(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), RegistryError> {
        let player = self.get_mut(id)?;
        player.name = name.into();
        Ok(())
    }

    /// True once every seat is taken and every player has a name.
    pub fn all_named(&self) -> bool {
        self.is_full() && self.players.values().all(Player::is_named)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get_index(id.0).map(|(_, p)| p)
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player, RegistryError> {
        self.players
            .get_index_mut(id.0)
            .map(|(_, p)| p)
            .ok_or(RegistryError::UnknownPlayer(id.0))
    }

    pub fn lookup(&self, connection: ConnectionId) -> Option<PlayerId> {
        self.players.get_index_of(&connection).map(PlayerId)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    /// Players in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players
            .values()
            .enumerate()
            .map(|(i, p)| (PlayerId(i), p))
    }
}
