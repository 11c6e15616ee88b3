//! Module entity with its owned tasks and links.
//!
//! # Invariants
//! - Weak identity (`same_module`) is the module code alone.
//! - Tasks keep insertion order; links keep alias order.
//! - Modules never mutate: every change builds a replacement module.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::model::field::{LinkAlias, LinkUrl, ModuleCode, ModuleTitle, TaskDescription};

/// One unit of work tracked under a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    description: TaskDescription,
    done: bool,
}

impl Task {
    /// Creates a not-yet-done task.
    pub fn new(description: TaskDescription) -> Self {
        Self {
            description,
            done: false,
        }
    }

    /// Restores a task with an explicit completion flag (storage path).
    pub fn with_status(description: TaskDescription, done: bool) -> Self {
        Self { description, done }
    }

    pub fn description(&self) -> &TaskDescription {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker = if self.done { "X" } else { " " };
        write!(f, "[{marker}] {}", self.description)
    }
}

/// An aliased web link stored under a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    alias: LinkAlias,
    url: LinkUrl,
}

impl Link {
    pub fn new(alias: LinkAlias, url: LinkUrl) -> Self {
        Self { alias, url }
    }

    pub fn alias(&self) -> &LinkAlias {
        &self.alias
    }

    pub fn url(&self) -> &LinkUrl {
        &self.url
    }

    /// Duplicate criterion for link sets: matching alias or matching target.
    ///
    /// Targets compare with the leading `http://`/`https://` scheme ignored,
    /// so `https://openstreetmap.org` clashes with `openstreetmap.org`.
    pub fn clashes_with(&self, other: &Link) -> bool {
        self.alias == other.alias || self.url.without_scheme() == other.url.without_scheme()
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.alias)
    }
}

/// A course module with its tasks and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    code: ModuleCode,
    title: ModuleTitle,
    tasks: Vec<Task>,
    links: BTreeSet<Link>,
}

impl Module {
    pub fn new(
        code: ModuleCode,
        title: ModuleTitle,
        tasks: Vec<Task>,
        links: BTreeSet<Link>,
    ) -> Self {
        Self {
            code,
            title,
            tasks,
            links,
        }
    }

    pub fn code(&self) -> &ModuleCode {
        &self.code
    }

    pub fn title(&self) -> &ModuleTitle {
        &self.title
    }

    /// Read-only view of the ordered task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Read-only view of the link set.
    pub fn links(&self) -> &BTreeSet<Link> {
        &self.links
    }

    /// Weak duplicate-detection identity: same module code.
    pub fn same_module(&self, other: &Module) -> bool {
        self.code == other.code
    }

    /// Replacement module with `task` appended.
    pub fn with_task_added(&self, task: Task) -> Module {
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Module::new(self.code.clone(), self.title.clone(), tasks, self.links.clone())
    }

    /// Replacement module with the task at `zero_based` removed.
    ///
    /// Callers bounds-check the position first; later tasks shift up.
    pub fn with_task_removed(&self, zero_based: usize) -> Module {
        let mut tasks = self.tasks.clone();
        tasks.remove(zero_based);
        Module::new(self.code.clone(), self.title.clone(), tasks, self.links.clone())
    }

    /// Replacement module with every link in `links` added.
    pub fn with_links_added(&self, links: &BTreeSet<Link>) -> Module {
        let mut merged = self.links.clone();
        merged.extend(links.iter().cloned());
        Module::new(self.code.clone(), self.title.clone(), self.tasks.clone(), merged)
    }

    /// Replacement module with every link whose alias is in `aliases` removed.
    pub fn with_links_removed(&self, aliases: &BTreeSet<LinkAlias>) -> Module {
        let kept = self
            .links
            .iter()
            .filter(|link| !aliases.contains(link.alias()))
            .cloned()
            .collect();
        Module::new(self.code.clone(), self.title.clone(), self.tasks.clone(), kept)
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.title.is_blank() {
            write!(f, ": {}", self.title)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Link, Module, Task};
    use crate::model::field::{LinkAlias, LinkUrl, ModuleCode, ModuleTitle, TaskDescription};

    fn module(code: &str, title: &str) -> Module {
        Module::new(
            ModuleCode::new(code).expect("test code should be valid"),
            ModuleTitle::new(title).expect("test title should be valid"),
            Vec::new(),
            BTreeSet::new(),
        )
    }

    fn link(alias: &str, url: &str) -> Link {
        Link::new(
            LinkAlias::new(alias).expect("test alias should be valid"),
            LinkUrl::new(url).expect("test url should be valid"),
        )
    }

    #[test]
    fn same_module_compares_codes_case_insensitively() {
        let upper = module("CS2106", "Introduction to Operating Systems");
        let lower = module("cs2106", "");
        assert!(upper.same_module(&lower));
        assert_ne!(upper, lower);
    }

    #[test]
    fn link_clash_covers_alias_and_scheme_insensitive_url() {
        let base = link("osm", "https://openstreetmap.org");
        assert!(base.clashes_with(&link("osm", "example.com")));
        assert!(base.clashes_with(&link("map", "openstreetmap.org")));
        assert!(!base.clashes_with(&link("map", "example.com")));
    }

    #[test]
    fn with_task_added_and_removed_preserve_order_and_originals() {
        let original = module("CS2106", "");
        let first = TaskDescription::new("read chapter 1").expect("valid description");
        let second = TaskDescription::new("read chapter 2").expect("valid description");

        let grown = original
            .with_task_added(Task::new(first.clone()))
            .with_task_added(Task::new(second.clone()));
        assert!(original.tasks().is_empty());
        assert_eq!(grown.tasks().len(), 2);
        assert_eq!(grown.tasks()[0].description(), &first);

        let shrunk = grown.with_task_removed(0);
        assert_eq!(shrunk.tasks().len(), 1);
        assert_eq!(shrunk.tasks()[0].description(), &second);
    }

    #[test]
    fn with_links_removed_drops_only_named_aliases() {
        let populated = module("GE3238", "").with_links_added(
            &[link("osm", "openstreetmap.org"), link("wiki", "wikipedia.org")]
                .into_iter()
                .collect(),
        );
        let aliases = [LinkAlias::new("osm").expect("valid alias")]
            .into_iter()
            .collect();

        let trimmed = populated.with_links_removed(&aliases);
        assert_eq!(trimmed.links().len(), 1);
        assert_eq!(
            trimmed.links().iter().next().map(|l| l.alias().as_str()),
            Some("wiki")
        );
    }

    #[test]
    fn display_omits_blank_title() {
        assert_eq!(module("CS2106", "").to_string(), "CS2106");
        assert_eq!(
            module("cs2106", "Introduction to Operating Systems").to_string(),
            "CS2106: Introduction to Operating Systems"
        );
    }
}
