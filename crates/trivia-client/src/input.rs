//! Where a player's name and answers come from.
//!
//! [`TerminalInput`] reads the real keyboard; [`ScriptedInput`] replays
//! a fixed script so sessions can be driven from tests.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input closed")]
    Closed,

    #[error("interrupted")]
    Interrupted,

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A source of player input.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    /// One whitespace-free token typed as the player's name.
    async fn read_name(&mut self) -> Result<String, InputError>;

    /// A single keystroke, no Enter needed.
    ///
    /// Dropping the future abandons the wait; implementations must leave
    /// the terminal as they found it.
    async fn read_key(&mut self) -> Result<char, InputError>;
}

/// Keyboard input. Raw mode is on only while a keystroke is awaited.
#[derive(Default)]
pub struct TerminalInput {
    events: Option<EventStream>,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    async fn read_name(&mut self) -> Result<String, InputError> {
        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            io::stdin().read_line(&mut line).map(|n| (n, line))
        })
        .await
        .map_err(|e| InputError::Io(io::Error::new(io::ErrorKind::Other, e)))?;

        let (n, line) = line?;
        if n == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.split_whitespace().next().unwrap_or_default().to_string())
    }

    async fn read_key(&mut self) -> Result<char, InputError> {
        let _raw = RawModeGuard::enable()?;
        let events = self.events.get_or_insert_with(EventStream::new);

        loop {
            match events.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Err(InputError::Interrupted);
                    }
                    KeyCode::Char(c) => return Ok(c),
                    other => debug!(?other, "ignoring key"),
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Err(InputError::Closed),
            }
        }
    }
}

/// Puts the terminal into raw mode and restores it on drop.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

/// Pre-recorded input. Once the keys run out the player goes silent:
/// `read_key` never completes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    names: VecDeque<String>,
    keys: VecDeque<char>,
}

impl ScriptedInput {
    pub fn new(name: impl Into<String>, keys: &str) -> Self {
        Self {
            names: VecDeque::from([name.into()]),
            keys: keys.chars().collect(),
        }
    }

    /// Queue another name, used if the previous one was rejected.
    pub fn then_name(mut self, name: impl Into<String>) -> Self {
        self.names.push_back(name.into());
        self
    }

    pub fn keys_left(&self) -> usize {
        self.keys.len()
    }
}

impl InputSource for ScriptedInput {
    async fn read_name(&mut self) -> Result<String, InputError> {
        self.names.pop_front().ok_or(InputError::Closed)
    }

    async fn read_key(&mut self) -> Result<char, InputError> {
        match self.keys.pop_front() {
            Some(c) => Ok(c),
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn script_replays_in_order() {
        let mut input = ScriptedInput::new("ann", "13").then_name("bea");
        assert_eq!(input.read_name().await.unwrap(), "ann");
        assert_eq!(input.read_name().await.unwrap(), "bea");
        assert!(matches!(input.read_name().await, Err(InputError::Closed)));

        assert_eq!(input.read_key().await.unwrap(), '1');
        assert_eq!(input.read_key().await.unwrap(), '3');
        assert_eq!(input.keys_left(), 0);
    }

    #[tokio::test]
    async fn exhausted_script_stays_silent() {
        let mut input = ScriptedInput::new("ann", "");
        let waited = tokio::time::timeout(Duration::from_millis(20), input.read_key()).await;
        assert!(waited.is_err());
    }
}
