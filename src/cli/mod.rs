//! CLI module
//!
//! This module provides the interactive shell: commands, the registry they
//! live in, the line evaluator, completion, and the REPL driver.

pub mod commands;
pub mod completer;
pub mod evaluator;
pub mod registry;
pub mod repl;

// Re-exports
pub use completer::{ReplCompleter, Suggestion};
pub use evaluator::Evaluator;
pub use registry::Registry;
pub use repl::{LineSource, ReadOutcome, Repl, Ui};
