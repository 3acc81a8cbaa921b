//! Session state shared by every shell command.

use std::{
    io,
    path::{Path, PathBuf},
};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    errors::{LedgerError, ValidationError},
    ledger::Ledger,
    storage::{LoadReport, StorageBackend},
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Failures that end the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Failures of a single command. The shell reports them and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::Core(err.into())
    }
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    mode: CliMode,
    pub(crate) registry: CommandRegistry,
    config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) ledger: Ledger,
    /// Set when the ledger holds changes not yet written to disk.
    pub(crate) dirty: bool,
    /// Ledger file whose startup load failed. Exit never saves over it.
    unreadable_ledger: Option<PathBuf>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Ok(Self::with_manager(mode, config_manager))
    }

    pub fn with_manager(mode: CliMode, config_manager: ConfigManager) -> Self {
        let config = config_manager.load().unwrap_or_else(|err| {
            output::warning(format!("{err}; using default settings."));
            Config::default()
        });
        let ledger = Ledger::new(config.date_format);
        let mut context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            config_manager,
            config,
            ledger,
            dirty: false,
            unreadable_ledger: None,
            running: true,
        };
        context.load_startup_ledger();
        context
    }

    fn load_startup_ledger(&mut self) {
        let storage = self.config.storage();
        match storage.load() {
            Ok(report) => {
                let count = report.ledger.len();
                self.accept_report(report);
                if count > 0 {
                    output::info(format!(
                        "Loaded {} expense(s) from {}.",
                        count,
                        storage.path().display()
                    ));
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "startup load failed");
                self.report_error(CommandError::Core(err));
                output::info("Starting with an empty ledger.");
                self.unreadable_ledger = Some(storage.path().to_path_buf());
            }
        }
    }

    /// Records that `path` was read or written successfully by an explicit command.
    pub(crate) fn mark_readable(&mut self, path: &Path) {
        if self.unreadable_ledger.as_deref() == Some(path) {
            self.unreadable_ledger = None;
        }
    }

    /// Replaces the in-memory ledger with a freshly loaded one.
    pub(crate) fn accept_report(&mut self, report: LoadReport) {
        for skipped in &report.skipped {
            output::warning(format!(
                "Skipped line {} ({}): {}",
                skipped.line, skipped.reason, skipped.content
            ));
        }
        self.ledger = report.ledger;
        self.dirty = false;
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let marker = if self.dirty { "*" } else { "" };
        format!("expenses[{}]{}> ", self.ledger.len(), marker)
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command) else {
            self.suggest_command(command);
            return Ok(LoopControl::Continue);
        };
        let handler = definition.handler;
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    /// Asks before a destructive action. Scripted runs never prompt.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(LedgerError::Validation(err)) => {
                output::error(format!("Invalid input: {err}"));
                output::hint(format!(
                    "Dates use the {} format; amounts are plain numbers like 12.50.",
                    self.ledger.date_format().label()
                ));
            }
            CommandError::Core(LedgerError::CorruptRecord { line, reason }) => {
                output::error(format!("Ledger file is corrupt at line {line}: {reason}"));
                output::hint(
                    "Nothing was loaded. Fix the line or set `load_policy` to `skip_corrupt` in the configuration.",
                );
            }
            CommandError::Core(LedgerError::Io(err)) => {
                output::error(format!("File access failed: {err}"));
            }
            other => output::error(other),
        }
    }

    /// Runs once when the loop ends, saving when the configuration asks for it.
    pub(crate) fn finish(&mut self) {
        if !self.dirty {
            return;
        }
        if self.config.save_on_exit {
            let storage = self.config.storage();
            if self.unreadable_ledger.as_deref() == Some(storage.path()) {
                output::warning(format!(
                    "Changes were not saved: {} could not be loaded at startup and would be overwritten.",
                    storage.path().display()
                ));
                output::hint("Use `save` to overwrite it or `save <path>` to write elsewhere.");
                return;
            }
            match storage.save(&self.ledger) {
                Ok(()) => {
                    self.dirty = false;
                    output::success(format!(
                        "Saved {} expense(s) to {}.",
                        self.ledger.len(),
                        storage.path().display()
                    ));
                }
                Err(err) => self.report_error(CommandError::Core(err)),
            }
        } else {
            output::warning("Unsaved changes were discarded.");
        }
    }
}
