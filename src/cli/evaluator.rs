//! Line evaluator
//!
//! Turns one raw input line into a command invocation: tokenize, resolve,
//! honor `-h`/`--help`, validate, run.

use crate::cli::registry::Registry;
use crate::error::{Result, ReplError};
use std::sync::Arc;

/// Evaluates input lines against a registry
pub struct Evaluator {
    registry: Arc<Registry>,
}

impl Evaluator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Evaluate one line, returning the text to print
    ///
    /// A blank line is a no-op and yields empty output. `help` is handled
    /// here, before any registry lookup.
    pub async fn eval(&self, line: &str) -> Result<String> {
        let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
        let Some((name, args)) = tokens.split_first() else {
            return Ok(String::new());
        };

        if name == "help" {
            return Ok(self.help_text());
        }

        let command = self
            .registry
            .get(name)
            .ok_or_else(|| ReplError::UnknownCommand(name.clone()))?;

        if matches!(args.first().map(String::as_str), Some("-h" | "--help")) {
            return Ok(command.help().to_string());
        }

        command.validate(args)?;

        tracing::debug!(command = command.name(), ?args, "running command");
        command.run(args).await
    }

    /// Help table listing every registered command with its synopsis
    pub fn help_text(&self) -> String {
        let rows: Vec<(&str, &str)> = self
            .registry
            .iter()
            .map(|(name, command)| (name, command.synopsis()))
            .collect();
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        let mut text = String::from("\nAvailable commands:\n");
        for (name, synopsis) in rows {
            text.push_str(&format!("  {:<width$}    {}\n", name, synopsis, width = width));
        }
        text.push_str("\nShow more details:\n  <command> --help");

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::fixture;
    use crate::cli::commands::Command;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Command that counts how often each stage is reached
    #[derive(Default)]
    struct CountingCommand {
        validated: AtomicUsize,
        ran: AtomicUsize,
    }

    #[async_trait]
    impl Command for CountingCommand {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn synopsis(&self) -> &'static str {
            "echo the arguments"
        }

        fn help(&self) -> &'static str {
            "usage: echo <word>..."
        }

        fn validate(&self, args: &[String]) -> Result<()> {
            self.validated.fetch_add(1, Ordering::SeqCst);
            if args.is_empty() {
                return Err(ReplError::ArgumentRequired("word".to_string()));
            }
            Ok(())
        }

        async fn run(&self, args: &[String]) -> Result<String> {
            self.ran.fetch_add(1, Ordering::SeqCst);
            Ok(args.join(" "))
        }
    }

    fn counting() -> (Arc<CountingCommand>, Evaluator) {
        let command = Arc::new(CountingCommand::default());
        let commands: Vec<Arc<dyn Command>> = vec![command.clone()];
        let registry = Registry::from_commands(commands);
        (command, Evaluator::new(Arc::new(registry)))
    }

    #[tokio::test]
    async fn test_valid_line_runs_once() {
        let (command, evaluator) = counting();

        let output = evaluator.eval("echo hello  world").await.unwrap();
        assert_eq!(output, "hello world");
        assert_eq!(command.validated.load(Ordering::SeqCst), 1);
        assert_eq!(command.ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_lines_are_noops() {
        let (command, evaluator) = counting();

        assert_eq!(evaluator.eval("").await.unwrap(), "");
        assert_eq!(evaluator.eval("   ").await.unwrap(), "");
        assert_eq!(command.validated.load(Ordering::SeqCst), 0);
        assert_eq!(command.ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (command, evaluator) = counting();

        let result = evaluator.eval("unknownthing").await;
        assert!(matches!(result, Err(ReplError::UnknownCommand(name)) if name == "unknownthing"));
        assert_eq!(command.validated.load(Ordering::SeqCst), 0);
        assert_eq!(command.ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_skips_run() {
        let (command, evaluator) = counting();

        let result = evaluator.eval("echo").await;
        assert!(matches!(result, Err(ReplError::ArgumentRequired(_))));
        assert_eq!(command.validated.load(Ordering::SeqCst), 1);
        assert_eq!(command.ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_help_flag_bypasses_validate_and_run() {
        let (command, evaluator) = counting();

        assert_eq!(evaluator.eval("echo -h").await.unwrap(), "usage: echo <word>...");
        assert_eq!(evaluator.eval("echo --help").await.unwrap(), "usage: echo <word>...");
        assert_eq!(command.validated.load(Ordering::SeqCst), 0);
        assert_eq!(command.ran.load(Ordering::SeqCst), 0);

        // only recognized as the second token
        assert_eq!(evaluator.eval("echo a -h").await.unwrap(), "a -h");
    }

    #[tokio::test]
    async fn test_help_table() {
        let (env, session) = fixture();
        let evaluator = Evaluator::new(Arc::new(Registry::new(env, session)));

        let help = evaluator.eval("help").await.unwrap();
        assert_eq!(help, evaluator.help_text());
        assert!(help.starts_with("\nAvailable commands:\n  call       call a RPC\n"));
        assert!(help.contains("  service    set the service as the current selected service\n"));
        assert!(help.ends_with("<command> --help"));

        // one row per command, no stray blank rows
        let rows = help
            .lines()
            .skip_while(|line| !line.starts_with("Available"))
            .skip(1)
            .take_while(|line| !line.is_empty())
            .count();
        assert_eq!(rows, 5);
    }

    #[tokio::test]
    async fn test_alias_dispatch() {
        let (env, session) = fixture();
        let evaluator = Evaluator::new(Arc::new(Registry::new(env, session)));

        assert_eq!(
            evaluator.eval("describe -h").await.unwrap(),
            evaluator.eval("desc --help").await.unwrap()
        );
    }
}
