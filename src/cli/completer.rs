//! Context-sensitive completion
//!
//! The first word completes to command names; later words are completed by
//! the matched command from the current session. Completion only ever reads
//! the session and gives up instead of waiting when a command holds the lock.

use crate::cli::registry::Registry;
use crate::config::{Session, SharedSession};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::sync::Arc;

/// A completion candidate with a short description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub description: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

/// Compute suggestions for the text before the cursor
pub fn suggest(registry: &Registry, session: &Session, buffer: &str) -> Vec<Suggestion> {
    let words: Vec<&str> = buffer.split_whitespace().collect();
    let word = current_word(buffer);

    // Still typing the command name.
    if words.is_empty() || (words.len() == 1 && !word.is_empty()) {
        return registry
            .iter()
            .filter(|(name, _)| name.starts_with(word))
            .map(|(name, command)| Suggestion::new(name, command.synopsis()))
            .collect();
    }

    let Some(command) = registry.get(words[0]) else {
        return Vec::new();
    };

    // Arguments already complete before the word under the cursor.
    let position = if word.is_empty() {
        words.len() - 1
    } else {
        words.len() - 2
    };

    command
        .candidates(session, position)
        .into_iter()
        .filter(|s| s.text.starts_with(word))
        .collect()
}

/// The word under the cursor; empty right after whitespace
fn current_word(buffer: &str) -> &str {
    buffer.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// rustyline helper wiring [`suggest`] to the live session
pub struct ReplCompleter {
    registry: Arc<Registry>,
    session: SharedSession,
}

impl ReplCompleter {
    pub fn new(registry: Arc<Registry>, session: SharedSession) -> Self {
        Self { registry, session }
    }

    /// Suggestions for a buffer, empty if the session is being written
    pub fn suggestions(&self, buffer: &str) -> Vec<Suggestion> {
        match self.session.try_read() {
            Ok(session) => suggest(&self.registry, &session, buffer),
            Err(_) => Vec::new(),
        }
    }
}

impl Completer for ReplCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let buffer = &line[..pos];
        let start = pos - current_word(buffer).len();

        let pairs = self
            .suggestions(buffer)
            .into_iter()
            .map(|s| Pair {
                display: format!("{:<20} {}", s.text, s.description),
                replacement: s.text,
            })
            .collect();

        Ok((start, pairs))
    }
}

impl Hinter for ReplCompleter {
    type Hint = String;
}

impl Highlighter for ReplCompleter {}

impl Validator for ReplCompleter {}

impl Helper for ReplCompleter {}
