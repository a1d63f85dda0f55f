//! Command handlers for the REPL
//!
//! Each command is a small stateless value holding shared references to the
//! environment and the session. The evaluator drives them through the
//! [`Command`] contract: `validate` checks the arguments' shape, `run`
//! performs the action.

mod call;
mod desc;
mod package;
mod service;
mod show;

pub use call::CallCommand;
pub use desc::DescCommand;
pub use package::PackageCommand;
pub use service::ServiceCommand;
pub use show::ShowCommand;

use crate::cli::completer::Suggestion;
use crate::config::Session;
use crate::error::{Result, ReplError};
use async_trait::async_trait;

/// A named REPL action
#[async_trait]
pub trait Command: Send + Sync {
    /// Name the command is registered under
    fn name(&self) -> &'static str;

    /// Additional names that resolve to this command
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// One-line description used in the help table and completion
    fn synopsis(&self) -> &'static str;

    /// Usage text shown for `<command> --help`
    fn help(&self) -> &'static str;

    /// Check the arguments' shape without performing the action
    fn validate(&self, args: &[String]) -> Result<()>;

    /// Perform the action and return the text to print
    async fn run(&self, args: &[String]) -> Result<String>;

    /// Completion candidates for the argument at `position`
    fn candidates(&self, _session: &Session, _position: usize) -> Vec<Suggestion> {
        Vec::new()
    }
}

/// Get the first argument, or fail naming what was expected
pub(crate) fn required<'a>(args: &'a [String], field: &str) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| ReplError::ArgumentRequired(field.to_string()))
}

pub(crate) fn suggestions(names: Vec<String>, description: &str) -> Vec<Suggestion> {
    names
        .into_iter()
        .map(|name| Suggestion::new(name, description))
        .collect()
}
