//! Line-oriented command execution over a [`Session`].
//!
//! A line is either a command word (`undo`, `suggest`, ...) or one or more
//! whitespace-separated alphabet codes to append. Command words take
//! precedence over codes of the same spelling.

use crate::formatter::{
    format_blocks, format_cycles, format_history, format_json, format_report, format_suggestion,
    format_suggestions, format_transition,
};
use crate::session::Session;
use cadence_core::SequenceError;

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("{0}")]
    Sequence(#[from] SequenceError),

    #[error("Unknown command: '{0}'. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of executing a command.
pub struct ExecutionResult {
    /// Formatted output string for display.
    pub output: String,
    /// Whether execution was successful.
    pub success: bool,
}

impl ExecutionResult {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }
}

const HELP: &str = "\
Commands:
  <code> [<code> ...]  append symbols (e.g. 'C V E')
  undo                 remove the most recent symbol
  clear                drop the whole history
  show | blocks        history laid out in blocks and rows
  history              numbered history, oldest first
  suggest              ranked next-symbol suggestions
  cycles               dominant cycle positions
  rows                 row transition analysis
  report [--json]      every analysis at once
  help                 this message";

const PLAIN_COMMANDS: &[&str] = &[
    "help", "undo", "clear", "show", "blocks", "history", "suggest", "cycles", "rows",
];

pub struct CommandExecutor {
    session: Session,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl CommandExecutor {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute a line of input.
    pub fn execute_line(&mut self, line: &str) -> Result<ExecutionResult, ExecutorError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = tokens.split_first() else {
            return Ok(ExecutionResult::ok(""));
        };

        let config = self.session.config();
        let alphabet = &config.alphabet;
        let limit = config.display.max_suggestions;

        let output = match (*command, args) {
            ("help", []) => HELP.to_string(),
            ("undo", []) => match self.session.undo() {
                Some(symbol) => format!(
                    "Removed {} ({} left)",
                    self.session.config().alphabet.label(symbol),
                    self.session.len()
                ),
                None => "Nothing to undo".to_string(),
            },
            ("clear", []) => format!("Cleared {} symbols", self.session.clear()),
            ("show" | "blocks", []) => format_blocks(&self.session.blocks(), alphabet),
            ("history", []) => format_history(&self.session.snapshot(), alphabet),
            ("suggest", []) => format_suggestions(&self.session.suggestions(), alphabet, limit),
            ("cycles", []) => format_cycles(
                &self.session.cycles(),
                config.analysis.cycle_length,
                alphabet,
            ),
            ("rows", []) => format_transition(&self.session.transition(), alphabet),
            ("report", []) => format_report(
                &self.session.report(),
                alphabet,
                config.analysis.cycle_length,
                limit,
            ),
            ("report", ["--json"]) => format_json(&self.session.report())?,
            ("report", _) => return Err(ExecutorError::Usage("report [--json]")),
            (name, _) if PLAIN_COMMANDS.contains(&name) => {
                return Err(ExecutorError::Usage("this command takes no arguments"));
            }
            _ => self.append(&tokens)?,
        };

        Ok(ExecutionResult::ok(output))
    }

    fn append(&mut self, codes: &[&str]) -> Result<String, ExecutorError> {
        let alphabet = &self.session.config().alphabet;
        if alphabet.parse(codes[0]).is_none() {
            return Err(ExecutorError::UnknownCommand(codes[0].to_string()));
        }

        let added = self.session.append_codes(codes)?;
        let alphabet = &self.session.config().alphabet;
        let mut output = format!(
            "Added {} ({} total)",
            alphabet.render(&added),
            self.session.len()
        );
        if let Some(best) = self.session.suggestions().first() {
            output.push_str(&format!("\nNext: {}", format_suggestion(best, alphabet)));
        }
        Ok(output)
    }
}
