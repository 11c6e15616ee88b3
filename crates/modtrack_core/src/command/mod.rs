//! Executable commands.
//!
//! # Responsibility
//! - Represent every parsed unit of user intent as one tagged union.
//! - Execute against the record store and report a result message plus UI
//!   directives.
//!
//! # Invariants
//! - Every duplicate/bounds check happens before the first mutation, so a
//!   failed command leaves the store observably unchanged.
//! - Index-addressed commands resolve against the current visible view,
//!   never the master collection.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::messages::MessageCatalog;
use crate::model::field::{Email, LinkAlias, ModuleCode, Name, Phone, Tag, TaskDescription};
use crate::model::module::{Link, Module, Task};
use crate::model::person::Person;
use crate::model::store::{ModuleFilter, PersonFilter, RecordStore, StoreError};

/// A 1-based position in a displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    /// Accepts only positive positions.
    pub fn from_one_based(position: usize) -> Option<Self> {
        if position == 0 {
            return None;
        }
        Some(Self(position))
    }

    pub fn one_based(&self) -> usize {
        self.0
    }

    pub fn zero_based(&self) -> usize {
        self.0 - 1
    }
}

/// Field replacements applied by an edit; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonEdits {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl PersonEdits {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.tags.is_none()
    }

    fn applied_to(&self, person: &Person) -> Person {
        Person::new(
            self.name.clone().unwrap_or_else(|| person.name().clone()),
            self.phone.clone().unwrap_or_else(|| person.phone().clone()),
            self.email.clone().unwrap_or_else(|| person.email().clone()),
            self.tags.clone().unwrap_or_else(|| person.tags().clone()),
        )
    }
}

/// One parsed, executable unit of user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddPerson { person: Person },
    DeletePerson { index: DisplayIndex },
    EditPerson { index: DisplayIndex, edits: PersonEdits },
    FindPersons { keywords: Vec<String> },
    ListPersons,
    AddModule { module: Module },
    DeleteModule { code: ModuleCode },
    GotoModule { code: ModuleCode },
    Home,
    AddTask { code: ModuleCode, description: TaskDescription },
    DeleteTask { code: ModuleCode, task_number: DisplayIndex },
    AddLink { code: ModuleCode, links: BTreeSet<Link> },
    DeleteLink { code: ModuleCode, aliases: BTreeSet<LinkAlias> },
    Clear,
    Help,
    Exit,
}

/// Result of a successful command: feedback plus UI directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandOutcome {
    fn message(feedback: String) -> Self {
        Self {
            feedback,
            show_help: false,
            exit: false,
        }
    }
}

/// Failure of an otherwise well-formed command, carrying user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    DuplicatePerson(String),
    DuplicateModule(String),
    InvalidPersonIndex(String),
    InvalidTaskNumber(String),
    NoSuchModule(String),
    DuplicateLink(String),
    NoSuchLink(String),
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            Self::DuplicatePerson(message)
            | Self::DuplicateModule(message)
            | Self::InvalidPersonIndex(message)
            | Self::InvalidTaskNumber(message)
            | Self::NoSuchModule(message)
            | Self::DuplicateLink(message)
            | Self::NoSuchLink(message) => message,
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for CommandError {}

impl Command {
    /// Executes this command against `store`.
    ///
    /// All validation precedes the first mutation; on `Err` the store is
    /// unchanged.
    pub fn execute(
        &self,
        store: &mut RecordStore,
        messages: &MessageCatalog,
    ) -> Result<CommandOutcome, CommandError> {
        match self {
            Command::AddPerson { person } => {
                store
                    .add_person(person.clone())
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.person_added(&person.to_string()),
                ))
            }
            Command::DeletePerson { index } => {
                let target = visible_person_at(store, *index)
                    .ok_or_else(|| {
                        CommandError::InvalidPersonIndex(messages.invalid_person_index.clone())
                    })?
                    .clone();
                store
                    .delete_person(&target)
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.person_deleted(&target.to_string()),
                ))
            }
            Command::EditPerson { index, edits } => {
                let target = visible_person_at(store, *index)
                    .ok_or_else(|| {
                        CommandError::InvalidPersonIndex(messages.invalid_person_index.clone())
                    })?
                    .clone();
                let edited = edits.applied_to(&target);
                if !target.same_person(&edited) && store.has_person(&edited) {
                    return Err(CommandError::DuplicatePerson(messages.duplicate_person.clone()));
                }
                store
                    .set_person(&target, edited.clone())
                    .map_err(|error| store_error(error, messages))?;
                store.update_person_filter(PersonFilter::All);
                Ok(CommandOutcome::message(
                    messages.person_edited(&edited.to_string()),
                ))
            }
            Command::FindPersons { keywords } => {
                store.update_person_filter(PersonFilter::NameContainsAny(keywords.clone()));
                Ok(CommandOutcome::message(
                    messages.persons_listed(store.visible_person_count()),
                ))
            }
            Command::ListPersons => {
                store.update_person_filter(PersonFilter::All);
                Ok(CommandOutcome::message(messages.listed_all_persons.clone()))
            }
            Command::AddModule { module } => {
                store
                    .add_module(module.clone())
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.module_added(&module.to_string()),
                ))
            }
            Command::DeleteModule { code } => {
                let target = visible_module_by_code(store, code)
                    .ok_or_else(|| CommandError::NoSuchModule(messages.no_such_module.clone()))?
                    .clone();
                store
                    .delete_module(&target)
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.module_deleted(&target.to_string()),
                ))
            }
            Command::GotoModule { code } => {
                if store.module_by_code(code).is_none() {
                    return Err(CommandError::NoSuchModule(messages.no_such_module.clone()));
                }
                store.update_module_filter(ModuleFilter::CodeMatches(code.clone()));
                Ok(CommandOutcome::message(
                    messages.displaying_module(code.as_str()),
                ))
            }
            Command::Home => {
                store.update_person_filter(PersonFilter::All);
                store.update_module_filter(ModuleFilter::All);
                Ok(CommandOutcome::message(messages.displaying_all.clone()))
            }
            Command::AddTask { code, description } => {
                let target = visible_module_by_code(store, code)
                    .ok_or_else(|| CommandError::NoSuchModule(messages.no_such_module.clone()))?
                    .clone();
                let updated = target.with_task_added(Task::new(description.clone()));
                store
                    .set_module(&target, updated)
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.task_added(code.as_str(), description.as_str()),
                ))
            }
            Command::DeleteTask { code, task_number } => {
                let target = visible_module_by_code(store, code)
                    .ok_or_else(|| CommandError::NoSuchModule(messages.no_such_module.clone()))?
                    .clone();
                if task_number.one_based() > target.tasks().len() {
                    return Err(CommandError::InvalidTaskNumber(
                        messages.invalid_task_number.clone(),
                    ));
                }
                let updated = target.with_task_removed(task_number.zero_based());
                store
                    .set_module(&target, updated)
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.task_deleted(task_number.one_based(), code.as_str()),
                ))
            }
            Command::AddLink { code, links } => {
                let target = visible_module_by_code(store, code)
                    .ok_or_else(|| CommandError::NoSuchModule(messages.no_such_module.clone()))?
                    .clone();
                let clash = links.iter().any(|candidate| {
                    target
                        .links()
                        .iter()
                        .any(|existing| existing.clashes_with(candidate))
                });
                if clash {
                    return Err(CommandError::DuplicateLink(
                        messages.duplicate_link(code.as_str()),
                    ));
                }
                let updated = target.with_links_added(links);
                store
                    .set_module(&target, updated)
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.links_added(code.as_str(), &render_links(links)),
                ))
            }
            Command::DeleteLink { code, aliases } => {
                let target = visible_module_by_code(store, code)
                    .ok_or_else(|| CommandError::NoSuchModule(messages.no_such_module.clone()))?
                    .clone();
                for alias in aliases {
                    let known = target.links().iter().any(|link| link.alias() == alias);
                    if !known {
                        return Err(CommandError::NoSuchLink(
                            messages.no_such_link(alias.as_str(), code.as_str()),
                        ));
                    }
                }
                let removed: BTreeSet<Link> = target
                    .links()
                    .iter()
                    .filter(|link| aliases.contains(link.alias()))
                    .cloned()
                    .collect();
                let updated = target.with_links_removed(aliases);
                store
                    .set_module(&target, updated)
                    .map_err(|error| store_error(error, messages))?;
                Ok(CommandOutcome::message(
                    messages.links_deleted(code.as_str(), &render_links(&removed)),
                ))
            }
            Command::Clear => {
                store.clear();
                Ok(CommandOutcome::message(messages.cleared.clone()))
            }
            Command::Help => Ok(CommandOutcome {
                feedback: messages.showing_help.clone(),
                show_help: true,
                exit: false,
            }),
            Command::Exit => Ok(CommandOutcome {
                feedback: messages.exiting.clone(),
                show_help: false,
                exit: true,
            }),
        }
    }
}

fn visible_person_at(store: &RecordStore, index: DisplayIndex) -> Option<&Person> {
    store.visible_persons().nth(index.zero_based())
}

fn visible_module_by_code<'store>(
    store: &'store RecordStore,
    code: &ModuleCode,
) -> Option<&'store Module> {
    store.visible_modules().find(|module| module.code() == code)
}

fn render_links(links: &BTreeSet<Link>) -> String {
    links.iter().map(|link| link.to_string()).collect()
}

fn store_error(error: StoreError, messages: &MessageCatalog) -> CommandError {
    match error {
        StoreError::DuplicatePerson => {
            CommandError::DuplicatePerson(messages.duplicate_person.clone())
        }
        StoreError::DuplicateModule => {
            CommandError::DuplicateModule(messages.duplicate_module.clone())
        }
        StoreError::PersonNotFound => {
            CommandError::InvalidPersonIndex(messages.invalid_person_index.clone())
        }
        StoreError::ModuleNotFound => CommandError::NoSuchModule(messages.no_such_module.clone()),
    }
}
