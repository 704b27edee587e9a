//! Shell context, dispatch and error reporting.

use std::io;

use strsim::levenshtein;
use thiserror::Error;

use crate::{context::AppContext, errors::BudgetError};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

/// Largest edit distance still offered as a suggestion.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] BudgetError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub(crate) app: AppContext,
    pub(crate) registry: CommandRegistry,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(app: AppContext) -> Self {
        Self {
            app,
            registry: CommandRegistry::new(commands::all_definitions()),
            running: true,
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|definition| definition.handler)
        else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    /// Closest registered command name to `input`, if any is close enough.
    pub(crate) fn closest_command(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &input), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            CommandError::Core(err) => {
                tracing::debug!(error = %err, "command failed");
                output::error(err);
            }
        }
    }

    /// Flushes the store before the shell exits.
    pub fn shutdown(self) -> Result<(), CliError> {
        self.app.shutdown()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, storage::MemoryStore, time::FixedClock};
    use chrono::{TimeZone, Utc};
    use std::{path::PathBuf, sync::Arc};

    fn shell() -> ShellContext {
        let app = AppContext::with_parts(
            Config::default(),
            PathBuf::from("unused"),
            Box::new(MemoryStore::new()),
            Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap())),
        )
        .unwrap();
        ShellContext::new(app)
    }

    #[test]
    fn suggests_nearby_command_names() {
        let context = shell();
        assert_eq!(context.closest_command("sumary"), Some("summary"));
        assert_eq!(context.closest_command("HISTRY"), Some("history"));
        assert_eq!(context.closest_command("zzzzzzzzzz"), None);
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let mut context = shell();
        assert_eq!(context.dispatch("exit", "exit", &[]).unwrap(), LoopControl::Exit);
        assert_eq!(
            context.dispatch("nope", "nope", &[]).unwrap(),
            LoopControl::Continue
        );
    }

    #[test]
    fn add_records_an_expense() {
        let mut context = shell();
        context
            .dispatch("add", "add", &["Food", "12.5", "--merchant", "Cafe"])
            .unwrap();
        let transactions = context.app.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].merchant.as_deref(), Some("Cafe"));

        let err = context.dispatch("add", "add", &["Food"]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }
}
