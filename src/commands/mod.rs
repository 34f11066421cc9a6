//! Chat commands and the static command registry.
//!
//! A [`Command`] responds to free-text input turn by turn and reports whether
//! it is finished through its [`Outcome`]. Stateless commands finish on the
//! first turn; stateful ones keep their session alive by returning
//! [`Outcome::Continuing`]. Cancellation is an ordinary return value, not a
//! thrown signal.

pub mod collection;
pub mod start;

pub use collection::Collection;
pub use start::Start;

use async_trait::async_trait;
use std::sync::Arc;

use crate::message::TextMessage;
use crate::tesera::GameSource;

/// Dependencies a command needs to respond: the injected remote source and
/// the configured collection owner logins.
pub struct CommandContext {
    pub source: Arc<dyn GameSource>,
    pub owner_logins: Vec<String>,
}

/// Which command a cancellation is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelTarget {
    /// The command that is responding right now
    Current,
    /// The command that was discarded when the current one was started
    Previous,
}

/// Result of one conversation turn of a command
#[derive(Debug)]
pub enum Outcome {
    /// Reply and close the session
    Completed(TextMessage),
    /// Reply and keep the session for the next input turn
    Continuing(TextMessage),
    /// Abort the targeted command; the session machine composes the notice
    Cancelled {
        target: CancelTarget,
        reason: Option<String>,
    },
}

/// A named chat command
#[async_trait]
pub trait Command: Send {
    /// Lowercase name the command is invoked with (`/name`)
    fn name(&self) -> &'static str;

    /// Handles one turn of input. `text` is the message with the command
    /// marker and name already stripped.
    async fn respond(&mut self, text: &str, ctx: &CommandContext) -> Outcome;
}

/// Constructor of a fresh command instance
pub type Factory = fn() -> Box<dyn Command>;

/// Explicit name-to-constructor mapping, built once at startup.
///
/// Lookup is case-insensitive. No runtime type discovery: every command the
/// bot knows is registered here by hand.
pub struct Registry {
    entries: Vec<(&'static str, Factory)>,
}

impl Registry {
    /// Empty registry, for tests that script their own commands
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn register(&mut self, name: &'static str, factory: Factory) {
        self.entries.push((name, factory));
    }

    pub fn resolve(&self, name: &str) -> Option<Factory> {
        self.entries
            .iter()
            .find(|(registered, _)| registered.eq_ignore_ascii_case(name))
            .map(|(_, factory)| *factory)
    }
}

impl Default for Registry {
    /// The production command set
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("start", || Box::new(Start));
        registry.register("collection", || Box::new(Collection));
        registry
    }
}
