//! Application service facade.
//!
//! # Responsibility
//! - Run the full pipeline for one raw command line: parse, execute,
//!   persist.
//! - Keep front ends decoupled from parser/command/storage details.
//!
//! # Invariants
//! - The store is saved after every successfully executed command.
//! - A failed save reports an error but never rolls back in-memory state.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::command::{CommandError, CommandOutcome};
use crate::messages::MessageCatalog;
use crate::model::module::Module;
use crate::model::person::Person;
use crate::model::store::RecordStore;
use crate::parser::{CommandParser, ParseError};
use crate::storage::{save_records, StorageError};

/// Boundary error for one command round trip.
#[derive(Debug)]
pub enum AppError {
    Parse(ParseError),
    Command(CommandError),
    /// The command ran, but persisting the store failed. Carries the
    /// user-facing report; in-memory state is kept.
    SaveFailed { report: String, source: StorageError },
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
            Self::SaveFailed { report, .. } => f.write_str(report),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Command(err) => Some(err),
            Self::SaveFailed { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for AppError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CommandError> for AppError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

/// Owns the store and drives the parse → execute → save pipeline.
pub struct AppService {
    store: RecordStore,
    messages: MessageCatalog,
    data_path: PathBuf,
}

impl AppService {
    pub fn new(store: RecordStore, messages: MessageCatalog, data_path: PathBuf) -> Self {
        Self {
            store,
            messages,
            data_path,
        }
    }

    /// Runs one raw command line end to end.
    pub fn execute(&mut self, input: &str) -> Result<CommandOutcome, AppError> {
        let command = CommandParser::new(&self.messages).parse(input)?;
        let outcome = command.execute(&mut self.store, &self.messages)?;
        log::info!(
            "event=command_executed module=service status=ok persons={} modules={}",
            self.store.persons().len(),
            self.store.modules().len()
        );

        if let Err(source) = save_records(&self.data_path, &self.store) {
            log::error!(
                "event=save_failed module=service status=error path={} error={source}",
                self.data_path.display()
            );
            let report = self
                .messages
                .save_failed(&self.data_path.display().to_string());
            return Err(AppError::SaveFailed { report, source });
        }

        Ok(outcome)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn visible_persons(&self) -> Vec<&Person> {
        self.store.visible_persons().collect()
    }

    pub fn visible_modules(&self) -> Vec<&Module> {
        self.store.visible_modules().collect()
    }
}
