//! User-facing message and usage templates.
//!
//! # Responsibility
//! - Hold every message template shown to the user in one read-only catalog.
//! - Substitute entity/command details into fixed templates.
//!
//! # Invariants
//! - The catalog is constructed once at startup and only read afterwards.
//! - Components never hard-code user-facing text outside this catalog
//!   (field constraint messages belong to the field types themselves).

/// Read-only catalog of user-facing message templates.
///
/// Built once at startup and passed by reference to the parser, the command
/// executor, and the front end. Templates use `{name}` placeholders filled
/// by the formatting methods below.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    pub unknown_command: String,
    pub invalid_command_format: String,
    pub invalid_person_index: String,
    pub invalid_task_number: String,
    pub duplicate_person: String,
    pub duplicate_module: String,
    pub no_such_module: String,
    pub duplicate_link_template: String,
    pub no_such_link_template: String,
    pub persons_listed_template: String,
    pub listed_all_persons: String,
    pub edit_not_edited: String,
    pub person_added_template: String,
    pub person_deleted_template: String,
    pub person_edited_template: String,
    pub module_added_template: String,
    pub module_deleted_template: String,
    pub task_added_template: String,
    pub task_deleted_template: String,
    pub links_added_template: String,
    pub links_deleted_template: String,
    pub displaying_module_template: String,
    pub displaying_all: String,
    pub cleared: String,
    pub showing_help: String,
    pub exiting: String,
    pub save_failed_template: String,

    pub usage_add: String,
    pub usage_delete: String,
    pub usage_edit: String,
    pub usage_find: String,
    pub usage_list: String,
    pub usage_add_module: String,
    pub usage_delete_module: String,
    pub usage_goto: String,
    pub usage_home: String,
    pub usage_add_task: String,
    pub usage_delete_task: String,
    pub usage_add_link: String,
    pub usage_delete_link: String,
    pub usage_clear: String,
    pub usage_help: String,
    pub usage_exit: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            unknown_command: "Unknown command".to_string(),
            invalid_command_format: "Invalid command format! \n{usage}".to_string(),
            invalid_person_index: "The person index provided is invalid".to_string(),
            invalid_task_number: "The task number provided is invalid".to_string(),
            duplicate_person: "This person already exists in the records.".to_string(),
            duplicate_module: "This module already exists in the records.".to_string(),
            no_such_module:
                "There is no module with the given module code in the displayed module list"
                    .to_string(),
            duplicate_link_template:
                "This link alias or URL already exists in module [{code}]".to_string(),
            no_such_link_template:
                "The link alias [{alias}] does not exist in module [{code}]".to_string(),
            persons_listed_template: "{count} persons listed!".to_string(),
            listed_all_persons: "Listed all persons".to_string(),
            edit_not_edited: "At least one field to edit must be provided.".to_string(),
            person_added_template: "New person added: {person}".to_string(),
            person_deleted_template: "Deleted Person: {person}".to_string(),
            person_edited_template: "Edited Person: {person}".to_string(),
            module_added_template: "New module added: {module}".to_string(),
            module_deleted_template: "Deleted Module: {module}".to_string(),
            task_added_template: "Added task to module {code}: {description}".to_string(),
            task_deleted_template: "Deleted task {number} from module {code}".to_string(),
            links_added_template: "Added link(s) to module {code}: {links}".to_string(),
            links_deleted_template: "Deleted link(s) from module {code}: {links}".to_string(),
            displaying_module_template: "Displaying module: {code}".to_string(),
            displaying_all: "Displaying all records".to_string(),
            cleared: "All records have been cleared!".to_string(),
            showing_help: "Showing help".to_string(),
            exiting: "Exiting as requested. Goodbye!".to_string(),
            save_failed_template: "Could not save data to file: {path}".to_string(),

            usage_add: "add: Adds a person to the records. \
                        Parameters: n/NAME p/PHONE e/EMAIL [t/TAG]...\n\
                        Example: add n/John Doe p/98765432 e/johnd@example.com t/friend"
                .to_string(),
            usage_delete: "delete: Deletes the person identified by the index number used in \
                           the displayed person list. \
                           Parameters: INDEX (must be a positive integer)\n\
                           Example: delete 1"
                .to_string(),
            usage_edit: "edit: Edits the details of the person identified by the index number \
                         used in the displayed person list. Existing values will be overwritten \
                         by the input values. \
                         Parameters: INDEX (must be a positive integer) \
                         [n/NAME] [p/PHONE] [e/EMAIL] [t/TAG]...\n\
                         Example: edit 1 p/91234567 e/johndoe@example.com"
                .to_string(),
            usage_find: "find: Finds all persons whose names contain any of the specified \
                         keywords (case-insensitive) and displays them as a list with index \
                         numbers. \
                         Parameters: KEYWORD [MORE_KEYWORDS]...\n\
                         Example: find alice bob charlie"
                .to_string(),
            usage_list: "list: Shows a list of all persons in the records.".to_string(),
            usage_add_module: "add-module: Adds a module to the records. \
                               Parameters: m/MODULE_CODE [ti/MODULE_TITLE]\n\
                               Example: add-module m/CS2106 ti/Introduction to Operating Systems"
                .to_string(),
            usage_delete_module: "delete-module: Deletes the module, identified by the module \
                                  code, from the records. \
                                  Parameters: m/MODULE_CODE (must correspond to a module in the \
                                  displayed module list)\n\
                                  Example: delete-module m/CS1231S"
                .to_string(),
            usage_goto: "goto: Displays only the module with the given module code. \
                         Parameters: m/MODULE_CODE\n\
                         Example: goto m/CS2106"
                .to_string(),
            usage_home: "home: Returns to the home view showing all records.".to_string(),
            usage_add_task: "add-task: Adds a task to the module identified by the module code. \
                             Parameters: m/MODULE_CODE td/TASK_DESCRIPTION\n\
                             Example: add-task m/CS2106 td/Complete assignment for week 8"
                .to_string(),
            usage_delete_task: "delete-task: Deletes the task, identified by the task number, \
                                from the module identified by the module code. \
                                Parameters: m/MODULE_CODE tn/TASK_NUMBER (must be a positive \
                                integer)\n\
                                Example: delete-task m/CS2106 tn/1"
                .to_string(),
            usage_add_link: "add-link: Adds one or more links to the module identified by the \
                             module code. \
                             Parameters: m/MODULE_CODE la/LINK_ALIAS u/LINK_URL \
                             [la/LINK_ALIAS u/LINK_URL]...\n\
                             Example: add-link m/GE3238 la/osm u/openstreetmap.org"
                .to_string(),
            usage_delete_link: "delete-link: Deletes the links, identified by their aliases, \
                                from the module identified by the module code. \
                                Parameters: m/MODULE_CODE la/LINK_ALIAS [la/LINK_ALIAS]...\n\
                                Example: delete-link m/GE3238 la/osm"
                .to_string(),
            usage_clear: "clear: Clears all records.".to_string(),
            usage_help: "help: Shows the list of available commands.".to_string(),
            usage_exit: "exit: Exits the application.".to_string(),
        }
    }
}

impl MessageCatalog {
    pub fn invalid_format(&self, usage: &str) -> String {
        fill(&self.invalid_command_format, &[("usage", usage)])
    }

    pub fn persons_listed(&self, count: usize) -> String {
        fill(&self.persons_listed_template, &[("count", &count.to_string())])
    }

    pub fn person_added(&self, person: &str) -> String {
        fill(&self.person_added_template, &[("person", person)])
    }

    pub fn person_deleted(&self, person: &str) -> String {
        fill(&self.person_deleted_template, &[("person", person)])
    }

    pub fn person_edited(&self, person: &str) -> String {
        fill(&self.person_edited_template, &[("person", person)])
    }

    pub fn module_added(&self, module: &str) -> String {
        fill(&self.module_added_template, &[("module", module)])
    }

    pub fn module_deleted(&self, module: &str) -> String {
        fill(&self.module_deleted_template, &[("module", module)])
    }

    pub fn task_added(&self, code: &str, description: &str) -> String {
        fill(
            &self.task_added_template,
            &[("code", code), ("description", description)],
        )
    }

    pub fn task_deleted(&self, number: usize, code: &str) -> String {
        fill(
            &self.task_deleted_template,
            &[("number", &number.to_string()), ("code", code)],
        )
    }

    pub fn links_added(&self, code: &str, links: &str) -> String {
        fill(&self.links_added_template, &[("code", code), ("links", links)])
    }

    pub fn links_deleted(&self, code: &str, links: &str) -> String {
        fill(&self.links_deleted_template, &[("code", code), ("links", links)])
    }

    pub fn duplicate_link(&self, code: &str) -> String {
        fill(&self.duplicate_link_template, &[("code", code)])
    }

    pub fn no_such_link(&self, alias: &str, code: &str) -> String {
        fill(&self.no_such_link_template, &[("alias", alias), ("code", code)])
    }

    pub fn displaying_module(&self, code: &str) -> String {
        fill(&self.displaying_module_template, &[("code", code)])
    }

    pub fn save_failed(&self, path: &str) -> String {
        fill(&self.save_failed_template, &[("path", path)])
    }

    /// One-screen command summary rendered by the help directive.
    pub fn command_summary(&self) -> String {
        [
            &self.usage_add,
            &self.usage_delete,
            &self.usage_edit,
            &self.usage_find,
            &self.usage_list,
            &self.usage_add_module,
            &self.usage_delete_module,
            &self.usage_goto,
            &self.usage_home,
            &self.usage_add_task,
            &self.usage_delete_task,
            &self.usage_add_link,
            &self.usage_delete_link,
            &self.usage_clear,
            &self.usage_help,
            &self.usage_exit,
        ]
        .map(|usage| usage.as_str())
        .join("\n\n")
    }
}

fn fill(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in pairs {
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::MessageCatalog;

    #[test]
    fn invalid_format_embeds_usage_text() {
        let messages = MessageCatalog::default();
        let rendered = messages.invalid_format("delete 1");
        assert!(rendered.starts_with("Invalid command format!"));
        assert!(rendered.contains("delete 1"));
    }

    #[test]
    fn duplicate_link_names_the_module_code() {
        let messages = MessageCatalog::default();
        assert_eq!(
            messages.duplicate_link("GE3238"),
            "This link alias or URL already exists in module [GE3238]"
        );
    }

    #[test]
    fn command_summary_mentions_every_command_word() {
        let summary = MessageCatalog::default().command_summary();
        for word in [
            "add:", "delete:", "edit:", "find:", "list:", "add-module:", "delete-module:",
            "goto:", "home:", "add-task:", "delete-task:", "add-link:", "delete-link:",
            "clear:", "help:", "exit:",
        ] {
            assert!(summary.contains(word), "summary should mention {word}");
        }
    }
}
