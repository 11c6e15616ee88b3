//! In-memory record store and derived visible views.
//!
//! # Responsibility
//! - Own the master person and module collections.
//! - Enforce weak-identity uniqueness inside each master collection.
//! - Derive the visible views from the current filters on demand.
//!
//! # Invariants
//! - No two master entries satisfy the weak-identity relation.
//! - A visible view is always a same-order subsequence of its master
//!   collection; it is recomputed from the master on every read, so it can
//!   never go stale after a mutation.
//! - Failed operations leave the store observably unchanged.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::field::ModuleCode;
use crate::model::module::Module;
use crate::model::person::Person;

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic failure of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    DuplicatePerson,
    DuplicateModule,
    PersonNotFound,
    ModuleNotFound,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePerson => write!(f, "person already exists in the record store"),
            Self::DuplicateModule => write!(f, "module already exists in the record store"),
            Self::PersonNotFound => write!(f, "person not found in the record store"),
            Self::ModuleNotFound => write!(f, "module not found in the record store"),
        }
    }
}

impl Error for StoreError {}

/// Predicate selecting the visible subset of the person master list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonFilter {
    All,
    /// Case-insensitive whole-word match of any keyword against the name.
    NameContainsAny(Vec<String>),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameContainsAny(keywords) => person
                .name()
                .as_str()
                .split_whitespace()
                .any(|word| keywords.iter().any(|keyword| word.eq_ignore_ascii_case(keyword))),
        }
    }
}

/// Predicate selecting the visible subset of the module master list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleFilter {
    All,
    CodeMatches(ModuleCode),
}

impl ModuleFilter {
    pub fn matches(&self, module: &Module) -> bool {
        match self {
            Self::All => true,
            Self::CodeMatches(code) => module.code() == code,
        }
    }
}

/// Master collections plus the current view filters.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    persons: Vec<Person>,
    modules: Vec<Module>,
    person_filter: PersonFilter,
    module_filter: ModuleFilter,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            persons: Vec::new(),
            modules: Vec::new(),
            person_filter: PersonFilter::All,
            module_filter: ModuleFilter::All,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.iter().any(|existing| existing.same_person(person))
    }

    pub fn has_module(&self, module: &Module) -> bool {
        self.modules.iter().any(|existing| existing.same_module(module))
    }

    /// Master-collection lookup by module code.
    pub fn module_by_code(&self, code: &ModuleCode) -> Option<&Module> {
        self.modules.iter().find(|module| module.code() == code)
    }

    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        if self.has_person(&person) {
            return Err(StoreError::DuplicatePerson);
        }
        self.persons.push(person);
        Ok(())
    }

    pub fn add_module(&mut self, module: Module) -> StoreResult<()> {
        if self.has_module(&module) {
            return Err(StoreError::DuplicateModule);
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn delete_person(&mut self, target: &Person) -> StoreResult<()> {
        let position = self
            .persons
            .iter()
            .position(|existing| existing.same_person(target))
            .ok_or(StoreError::PersonNotFound)?;
        self.persons.remove(position);
        Ok(())
    }

    pub fn delete_module(&mut self, target: &Module) -> StoreResult<()> {
        let position = self
            .modules
            .iter()
            .position(|existing| existing.same_module(target))
            .ok_or(StoreError::ModuleNotFound)?;
        self.modules.remove(position);
        Ok(())
    }

    /// Swaps `target` for `replacement` preserving position.
    ///
    /// Fails when `target` is absent, or when `replacement` would collide
    /// with a master entry other than `target`.
    pub fn set_person(&mut self, target: &Person, replacement: Person) -> StoreResult<()> {
        let position = self
            .persons
            .iter()
            .position(|existing| existing.same_person(target))
            .ok_or(StoreError::PersonNotFound)?;
        let collision = self
            .persons
            .iter()
            .enumerate()
            .any(|(index, existing)| index != position && existing.same_person(&replacement));
        if collision {
            return Err(StoreError::DuplicatePerson);
        }
        self.persons[position] = replacement;
        Ok(())
    }

    /// Module counterpart of [`RecordStore::set_person`].
    pub fn set_module(&mut self, target: &Module, replacement: Module) -> StoreResult<()> {
        let position = self
            .modules
            .iter()
            .position(|existing| existing.same_module(target))
            .ok_or(StoreError::ModuleNotFound)?;
        let collision = self
            .modules
            .iter()
            .enumerate()
            .any(|(index, existing)| index != position && existing.same_module(&replacement));
        if collision {
            return Err(StoreError::DuplicateModule);
        }
        self.modules[position] = replacement;
        Ok(())
    }

    pub fn update_person_filter(&mut self, filter: PersonFilter) {
        self.person_filter = filter;
    }

    pub fn update_module_filter(&mut self, filter: ModuleFilter) {
        self.module_filter = filter;
    }

    /// The visible person view: master order, current filter applied.
    pub fn visible_persons(&self) -> impl Iterator<Item = &Person> {
        self.persons
            .iter()
            .filter(|person| self.person_filter.matches(person))
    }

    /// The visible module view: master order, current filter applied.
    pub fn visible_modules(&self) -> impl Iterator<Item = &Module> {
        self.modules
            .iter()
            .filter(|module| self.module_filter.matches(module))
    }

    pub fn visible_person_count(&self) -> usize {
        self.visible_persons().count()
    }

    pub fn visible_module_count(&self) -> usize {
        self.visible_modules().count()
    }

    /// Empties both master collections and resets both filters.
    pub fn clear(&mut self) {
        self.persons.clear();
        self.modules.clear();
        self.person_filter = PersonFilter::All;
        self.module_filter = ModuleFilter::All;
    }
}
