//! Serde-level record document and its validation into domain entities.
//!
//! # Invariants
//! - Every scalar is optional at the serde layer so a missing field is
//!   reported by name instead of failing structural decoding.
//! - Validation reuses the field types' own constructors; constraint
//!   messages reach the caller unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::field::{
    Email, LinkAlias, LinkUrl, ModuleCode, ModuleTitle, Name, Phone, Tag, TaskDescription,
};
use crate::model::module::{Link, Module, Task};
use crate::model::person::Person;
use crate::model::store::{RecordStore, StoreError};
use crate::storage::{StorageError, StorageResult};

const DUPLICATE_PERSONS: &str = "Persons list contains duplicate person(s).";
const DUPLICATE_MODULES: &str = "Modules list contains duplicate module(s).";

/// Whole-document shape of the persisted records file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecordBook {
    #[serde(default)]
    persons: Vec<StoredPerson>,
    #[serde(default)]
    modules: Vec<StoredModule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPerson {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredModule {
    #[serde(rename = "moduleCode")]
    module_code: Option<String>,
    #[serde(rename = "moduleTitle")]
    module_title: Option<String>,
    #[serde(default)]
    tasks: Vec<StoredTask>,
    #[serde(default)]
    links: Vec<StoredLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTask {
    description: Option<String>,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredLink {
    alias: Option<String>,
    url: Option<String>,
}

impl StoredRecordBook {
    pub fn from_store(store: &RecordStore) -> Self {
        Self {
            persons: store.persons().iter().map(StoredPerson::from_person).collect(),
            modules: store.modules().iter().map(StoredModule::from_module).collect(),
        }
    }

    /// Validates the decoded document into a fresh [`RecordStore`].
    pub fn into_store(self) -> StorageResult<RecordStore> {
        let mut store = RecordStore::new();
        for person in self.persons {
            let person = person.into_person()?;
            store.add_person(person).map_err(|error| match error {
                StoreError::DuplicatePerson => {
                    StorageError::IllegalValue(DUPLICATE_PERSONS.to_string())
                }
                other => StorageError::IllegalValue(other.to_string()),
            })?;
        }
        for module in self.modules {
            let module = module.into_module()?;
            store.add_module(module).map_err(|error| match error {
                StoreError::DuplicateModule => {
                    StorageError::IllegalValue(DUPLICATE_MODULES.to_string())
                }
                other => StorageError::IllegalValue(other.to_string()),
            })?;
        }
        Ok(store)
    }
}

impl StoredPerson {
    fn from_person(person: &Person) -> Self {
        Self {
            name: Some(person.name().as_str().to_string()),
            phone: Some(person.phone().as_str().to_string()),
            email: Some(person.email().as_str().to_string()),
            tags: person.tags().iter().map(|tag| tag.as_str().to_string()).collect(),
        }
    }

    fn into_person(self) -> StorageResult<Person> {
        let name = required("Person", "Name", self.name)?;
        let name = Name::new(&name).map_err(illegal)?;
        let phone = required("Person", "Phone", self.phone)?;
        let phone = Phone::new(&phone).map_err(illegal)?;
        let email = required("Person", "Email", self.email)?;
        let email = Email::new(&email).map_err(illegal)?;

        let mut tags = BTreeSet::new();
        for tag in self.tags {
            tags.insert(Tag::new(&tag).map_err(illegal)?);
        }
        Ok(Person::new(name, phone, email, tags))
    }
}

impl StoredModule {
    fn from_module(module: &Module) -> Self {
        Self {
            module_code: Some(module.code().as_str().to_string()),
            module_title: Some(module.title().as_str().to_string()),
            tasks: module.tasks().iter().map(StoredTask::from_task).collect(),
            links: module.links().iter().map(StoredLink::from_link).collect(),
        }
    }

    fn into_module(self) -> StorageResult<Module> {
        let code = required("Module", "ModuleCode", self.module_code)?;
        let code = ModuleCode::new(&code).map_err(illegal)?;
        let title = required("Module", "ModuleTitle", self.module_title)?;
        let title = ModuleTitle::new(&title).map_err(illegal)?;

        let mut tasks = Vec::with_capacity(self.tasks.len());
        for task in self.tasks {
            tasks.push(task.into_task()?);
        }
        let mut links = BTreeSet::new();
        for link in self.links {
            links.insert(link.into_link()?);
        }
        Ok(Module::new(code, title, tasks, links))
    }
}

impl StoredTask {
    fn from_task(task: &Task) -> Self {
        Self {
            description: Some(task.description().as_str().to_string()),
            done: task.is_done(),
        }
    }

    fn into_task(self) -> StorageResult<Task> {
        let description = required("Task", "TaskDescription", self.description)?;
        let description = TaskDescription::new(&description).map_err(illegal)?;
        Ok(Task::with_status(description, self.done))
    }
}

impl StoredLink {
    fn from_link(link: &Link) -> Self {
        Self {
            alias: Some(link.alias().as_str().to_string()),
            url: Some(link.url().as_str().to_string()),
        }
    }

    fn into_link(self) -> StorageResult<Link> {
        let alias = required("Link", "LinkAlias", self.alias)?;
        let alias = LinkAlias::new(&alias).map_err(illegal)?;
        let url = required("Link", "LinkUrl", self.url)?;
        let url = LinkUrl::new(&url).map_err(illegal)?;
        Ok(Link::new(alias, url))
    }
}

fn required(entity: &str, field: &str, value: Option<String>) -> StorageResult<String> {
    value.ok_or_else(|| {
        StorageError::IllegalValue(format!("{entity}'s {field} field is missing!"))
    })
}

fn illegal(violation: crate::model::field::ConstraintViolation) -> StorageError {
    StorageError::IllegalValue(violation.message().to_string())
}

#[cfg(test)]
mod tests {
    use super::StoredRecordBook;
    use crate::storage::StorageError;

    #[test]
    fn missing_required_field_names_entity_and_field() {
        let document = r#"{ "persons": [ { "phone": "11111111", "email": "amy@example.com" } ] }"#;
        let stored: StoredRecordBook =
            serde_json::from_str(document).expect("structure should decode");
        let error = stored.into_store().expect_err("missing name must be rejected");
        match error {
            StorageError::IllegalValue(message) => {
                assert_eq!(message, "Person's Name field is missing!");
            }
            other => panic!("expected IllegalValue, got {other:?}"),
        }
    }

    #[test]
    fn invalid_field_value_reports_the_field_constraint() {
        let document = r#"{ "modules": [ { "moduleCode": "(CS2103T)", "moduleTitle": "" } ] }"#;
        let stored: StoredRecordBook =
            serde_json::from_str(document).expect("structure should decode");
        let error = stored.into_store().expect_err("bad code must be rejected");
        match error {
            StorageError::IllegalValue(message) => {
                assert!(message.contains("Module codes"));
            }
            other => panic!("expected IllegalValue, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_persons_in_document_are_rejected() {
        let document = r#"{
            "persons": [
                { "name": "Amy Bee", "phone": "11111111", "email": "amy@example.com" },
                { "name": "Amy Bee", "phone": "11111111", "email": "amy2@example.com" }
            ]
        }"#;
        let stored: StoredRecordBook =
            serde_json::from_str(document).expect("structure should decode");
        let error = stored.into_store().expect_err("duplicates must be rejected");
        match error {
            StorageError::IllegalValue(message) => {
                assert_eq!(message, "Persons list contains duplicate person(s).");
            }
            other => panic!("expected IllegalValue, got {other:?}"),
        }
    }
}
