//! REPL implementation
//!
//! This module implements the interactive Read-Eval-Print Loop: prompt,
//! splash screen, the read/evaluate/print cycle and the farewell message.

use crate::cli::completer::ReplCompleter;
use crate::cli::evaluator::Evaluator;
use crate::cli::registry::Registry;
use crate::config::storage::expand_path;
use crate::config::SharedSession;
use crate::env::Environment;
use crate::error::{Result, ReplError};
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor, Helper};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

const FAREWELL: &str = "Good Bye :)";

/// Output sinks of the shell
pub struct Ui {
    /// Normal output
    pub writer: Box<dyn Write + Send>,
    /// Error output
    pub err_writer: Box<dyn Write + Send>,
}

impl Ui {
    pub fn new(writer: Box<dyn Write + Send>, err_writer: Box<dyn Write + Send>) -> Self {
        Self { writer, err_writer }
    }

    /// Standard output and standard error
    pub fn basic() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Print command output; empty text prints nothing
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()
    }

    /// Print an error in red, followed by a blank line
    pub fn print_error(&mut self, err: &ReplError) -> io::Result<()> {
        writeln!(self.err_writer, "{}\n", err.to_string().red())?;
        self.err_writer.flush()
    }
}

/// What a line reader produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A submitted line
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D / end of input
    Eof,
}

/// Source of input lines
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

impl<H: Helper> LineSource for Editor<H, DefaultHistory> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Interactive shell
pub struct Repl {
    ui: Ui,
    evaluator: Evaluator,
    env: Arc<dyn Environment>,
    session: SharedSession,
    splash_text_path: Option<String>,
    history_file: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL; the command registry is built here, once
    pub fn new(env: Arc<dyn Environment>, session: SharedSession, ui: Ui) -> Self {
        let registry = Arc::new(Registry::new(env.clone(), session.clone()));

        Self {
            ui,
            evaluator: Evaluator::new(registry),
            env,
            session,
            splash_text_path: None,
            history_file: None,
        }
    }

    /// Print this file's contents on startup
    pub fn with_splash(mut self, path: Option<String>) -> Self {
        self.splash_text_path = path;
        self
    }

    /// Persist line history in this file
    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Current prompt string
    pub async fn prompt(&self) -> String {
        self.session.read().await.prompt(&self.env.dsn())
    }

    /// Run the REPL on the terminal until Ctrl-C or Ctrl-D
    pub async fn start(&mut self) -> Result<()> {
        let mut editor = self.editor()?;
        let result = self.serve(&mut editor).await;
        self.save_history(&mut editor);
        result
    }

    /// Run the loop, then print the farewell even if the loop failed
    pub async fn serve<L: LineSource>(&mut self, input: &mut L) -> Result<()> {
        let result = self.run(input).await;
        let closed = self.close();
        result.and(closed)
    }

    /// Drive the read-eval-print cycle over any line source
    pub async fn run<L: LineSource>(&mut self, input: &mut L) -> Result<()> {
        print_splash(self.splash_text_path.as_deref(), &mut self.ui.writer)?;

        loop {
            let prompt = self.prompt().await;
            let line = match input.read_line(&prompt) {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) | Ok(ReadOutcome::Eof) => break,
                Err(err) => {
                    tracing::error!(error = %err, "failed to read line");
                    break;
                }
            };

            match self.evaluator.eval(&line).await {
                Ok(output) => self.ui.print(&output)?,
                Err(err) => {
                    tracing::debug!(error = %err, "command failed");
                    self.ui.print_error(&err)?;
                }
            }
        }

        Ok(())
    }

    /// Print the farewell message
    pub fn close(&mut self) -> Result<()> {
        self.ui.print(FAREWELL)?;
        Ok(())
    }

    fn editor(&self) -> Result<Editor<ReplCompleter, DefaultHistory>> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .build();

        let completer = ReplCompleter::new(self.evaluator.registry().clone(), self.session.clone());
        let mut editor = Editor::<ReplCompleter, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(completer));

        if let Some(path) = &self.history_file {
            if let Err(e) = editor.load_history(path) {
                // History file doesn't exist or is unreadable, that's fine
                tracing::warn!(path = %path.display(), error = %e, "could not load history");
            }
        }

        Ok(editor)
    }

    fn save_history(&self, editor: &mut Editor<ReplCompleter, DefaultHistory>) {
        let Some(path) = &self.history_file else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "could not create history directory");
                return;
            }
        }
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save history");
        }
    }
}

/// Write the splash file's contents, if there is a readable one
///
/// Missing or unreadable files are skipped silently.
pub fn print_splash(path: Option<&str>, writer: &mut dyn Write) -> io::Result<()> {
    let Some(path) = path.filter(|p| !p.is_empty()).and_then(expand_path) else {
        return Ok(());
    };

    let Ok(content) = std::fs::read(&path) else {
        return Ok(());
    };

    writer.write_all(&content)?;
    if !content.ends_with(b"\n") {
        writeln!(writer)?;
    }
    writer.flush()
}
