//! Core logic for modtrack, a command-driven contact and module record
//! keeper. This crate is the single source of truth for business
//! invariants; front ends forward raw input and render results.

pub mod command;
pub mod logging;
pub mod messages;
pub mod model;
pub mod parser;
pub mod service;
pub mod storage;

pub use command::{Command, CommandError, CommandOutcome, DisplayIndex, PersonEdits};
pub use logging::{default_log_level, init_logging, logging_status};
pub use messages::MessageCatalog;
pub use model::field::{
    ConstraintViolation, Email, LinkAlias, LinkUrl, ModuleCode, ModuleTitle, Name, Phone, Tag,
    TaskDescription,
};
pub use model::module::{Link, Module, Task};
pub use model::person::Person;
pub use model::store::{ModuleFilter, PersonFilter, RecordStore, StoreError};
pub use parser::{CommandParser, ParseError};
pub use service::{AppError, AppService};
pub use storage::prefs::{load_prefs, save_prefs, UserPrefs};
pub use storage::{load_records, save_records, StorageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
