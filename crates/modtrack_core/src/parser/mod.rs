//! Command-line parsing.
//!
//! # Responsibility
//! - Split raw input into a command word and tail, dispatch to the
//!   sub-parser for that word, and build a validated [`Command`].
//!
//! # Invariants
//! - Format problems (missing prefix, stray preamble, bad index) report the
//!   offending command's usage text.
//! - Field validation runs left to right in declared field order; the first
//!   invalid field's own constraint message is reported unwrapped.

pub mod tokens;

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::command::{Command, DisplayIndex, PersonEdits};
use crate::messages::MessageCatalog;
use crate::model::field::{
    ConstraintViolation, Email, LinkAlias, LinkUrl, ModuleCode, ModuleTitle, Name, Phone, Tag,
    TaskDescription,
};
use crate::model::module::{Link, Module};
use crate::model::person::Person;
use crate::parser::tokens::{
    tokenize, ArgumentTokens, PREFIX_EMAIL, PREFIX_LINK_ALIAS, PREFIX_LINK_URL,
    PREFIX_MODULE_CODE, PREFIX_MODULE_TITLE, PREFIX_NAME, PREFIX_PHONE, PREFIX_TAG,
    PREFIX_TASK_DESCRIPTION, PREFIX_TASK_NUMBER,
};

/// Parse failure carrying the user-facing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The command word is not recognized.
    UnknownCommand(String),
    /// The arguments do not fit the command's format; the message embeds
    /// the command's usage text.
    InvalidFormat(String),
    /// A field value failed its type's validation; reported unwrapped.
    Constraint(ConstraintViolation),
}

impl ParseError {
    pub fn message(&self) -> &str {
        match self {
            Self::UnknownCommand(message) | Self::InvalidFormat(message) => message,
            Self::Constraint(violation) => violation.message(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ParseError {}

impl From<ConstraintViolation> for ParseError {
    fn from(violation: ConstraintViolation) -> Self {
        Self::Constraint(violation)
    }
}

/// Parses raw command lines into [`Command`] values.
pub struct CommandParser<'a> {
    messages: &'a MessageCatalog,
}

impl<'a> CommandParser<'a> {
    pub fn new(messages: &'a MessageCatalog) -> Self {
        Self { messages }
    }

    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(self.invalid_format(&self.messages.usage_help));
        }

        let (word, tail) = match trimmed.find(char::is_whitespace) {
            Some(split) => (&trimmed[..split], &trimmed[split..]),
            None => (trimmed, ""),
        };

        match word {
            "add" => self.parse_add(tail),
            "delete" => self.parse_delete(tail),
            "edit" => self.parse_edit(tail),
            "find" => self.parse_find(tail),
            "list" => Ok(Command::ListPersons),
            "add-module" => self.parse_add_module(tail),
            "delete-module" => self.parse_delete_module(tail),
            "goto" => self.parse_goto(tail),
            "home" => Ok(Command::Home),
            "add-task" => self.parse_add_task(tail),
            "delete-task" => self.parse_delete_task(tail),
            "add-link" => self.parse_add_link(tail),
            "delete-link" => self.parse_delete_link(tail),
            "clear" => Ok(Command::Clear),
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            _ => Err(ParseError::UnknownCommand(self.messages.unknown_command.clone())),
        }
    }

    fn parse_add(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_TAG]);
        if !tokens.preamble().is_empty()
            || !tokens.has(PREFIX_NAME)
            || !tokens.has(PREFIX_PHONE)
            || !tokens.has(PREFIX_EMAIL)
        {
            return Err(self.invalid_format(&self.messages.usage_add));
        }

        let name = Name::new(tokens.last_value(PREFIX_NAME).unwrap_or(""))?;
        let phone = Phone::new(tokens.last_value(PREFIX_PHONE).unwrap_or(""))?;
        let email = Email::new(tokens.last_value(PREFIX_EMAIL).unwrap_or(""))?;
        let tags = parse_tags(&tokens)?;

        Ok(Command::AddPerson {
            person: Person::new(name, phone, email, tags),
        })
    }

    fn parse_delete(&self, tail: &str) -> Result<Command, ParseError> {
        let index = parse_display_index(tail)
            .ok_or_else(|| self.invalid_format(&self.messages.usage_delete))?;
        Ok(Command::DeletePerson { index })
    }

    fn parse_edit(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_TAG]);
        let index = parse_display_index(tokens.preamble())
            .ok_or_else(|| self.invalid_format(&self.messages.usage_edit))?;

        let name = match tokens.last_value(PREFIX_NAME) {
            Some(value) => Some(Name::new(value)?),
            None => None,
        };
        let phone = match tokens.last_value(PREFIX_PHONE) {
            Some(value) => Some(Phone::new(value)?),
            None => None,
        };
        let email = match tokens.last_value(PREFIX_EMAIL) {
            Some(value) => Some(Email::new(value)?),
            None => None,
        };
        let tag_values = tokens.all_values(PREFIX_TAG);
        // A single bare `t/` clears the tag set; anything else must validate.
        let tags = if tag_values.is_empty() {
            None
        } else if tag_values == [""] {
            Some(BTreeSet::new())
        } else {
            let mut parsed = BTreeSet::new();
            for value in tag_values {
                parsed.insert(Tag::new(value)?);
            }
            Some(parsed)
        };

        let edits = PersonEdits {
            name,
            phone,
            email,
            tags,
        };
        if edits.is_empty() {
            return Err(ParseError::InvalidFormat(self.messages.edit_not_edited.clone()));
        }
        Ok(Command::EditPerson { index, edits })
    }

    fn parse_find(&self, tail: &str) -> Result<Command, ParseError> {
        let keywords: Vec<String> = tail.split_whitespace().map(str::to_string).collect();
        if keywords.is_empty() {
            return Err(self.invalid_format(&self.messages.usage_find));
        }
        Ok(Command::FindPersons { keywords })
    }

    fn parse_add_module(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_MODULE_CODE, PREFIX_MODULE_TITLE]);
        if !tokens.preamble().is_empty() || !tokens.has(PREFIX_MODULE_CODE) {
            return Err(self.invalid_format(&self.messages.usage_add_module));
        }

        let code = ModuleCode::new(tokens.last_value(PREFIX_MODULE_CODE).unwrap_or(""))?;
        let title = match tokens.last_value(PREFIX_MODULE_TITLE) {
            Some(value) => ModuleTitle::new(value)?,
            None => ModuleTitle::empty(),
        };

        Ok(Command::AddModule {
            module: Module::new(code, title, Vec::new(), BTreeSet::new()),
        })
    }

    fn parse_delete_module(&self, tail: &str) -> Result<Command, ParseError> {
        let code = self.parse_lone_module_code(tail, &self.messages.usage_delete_module)?;
        Ok(Command::DeleteModule { code })
    }

    fn parse_goto(&self, tail: &str) -> Result<Command, ParseError> {
        let code = self.parse_lone_module_code(tail, &self.messages.usage_goto)?;
        Ok(Command::GotoModule { code })
    }

    fn parse_add_task(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_MODULE_CODE, PREFIX_TASK_DESCRIPTION]);
        if !tokens.preamble().is_empty()
            || !tokens.has(PREFIX_MODULE_CODE)
            || !tokens.has(PREFIX_TASK_DESCRIPTION)
        {
            return Err(self.invalid_format(&self.messages.usage_add_task));
        }

        let code = ModuleCode::new(tokens.last_value(PREFIX_MODULE_CODE).unwrap_or(""))?;
        let description =
            TaskDescription::new(tokens.last_value(PREFIX_TASK_DESCRIPTION).unwrap_or(""))?;
        Ok(Command::AddTask { code, description })
    }

    fn parse_delete_task(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_MODULE_CODE, PREFIX_TASK_NUMBER]);
        if !tokens.preamble().is_empty()
            || !tokens.has(PREFIX_MODULE_CODE)
            || !tokens.has(PREFIX_TASK_NUMBER)
        {
            return Err(self.invalid_format(&self.messages.usage_delete_task));
        }

        let code = ModuleCode::new(tokens.last_value(PREFIX_MODULE_CODE).unwrap_or(""))?;
        let task_number = parse_display_index(tokens.last_value(PREFIX_TASK_NUMBER).unwrap_or(""))
            .ok_or_else(|| self.invalid_format(&self.messages.usage_delete_task))?;
        Ok(Command::DeleteTask { code, task_number })
    }

    fn parse_add_link(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(
            tail,
            &[PREFIX_MODULE_CODE, PREFIX_LINK_ALIAS, PREFIX_LINK_URL],
        );
        let aliases = tokens.all_values(PREFIX_LINK_ALIAS);
        let urls = tokens.all_values(PREFIX_LINK_URL);
        if !tokens.preamble().is_empty()
            || !tokens.has(PREFIX_MODULE_CODE)
            || aliases.is_empty()
            || aliases.len() != urls.len()
        {
            return Err(self.invalid_format(&self.messages.usage_add_link));
        }

        let code = ModuleCode::new(tokens.last_value(PREFIX_MODULE_CODE).unwrap_or(""))?;
        let mut links = BTreeSet::new();
        for (alias, url) in aliases.into_iter().zip(urls) {
            links.insert(Link::new(LinkAlias::new(alias)?, LinkUrl::new(url)?));
        }
        Ok(Command::AddLink { code, links })
    }

    fn parse_delete_link(&self, tail: &str) -> Result<Command, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_MODULE_CODE, PREFIX_LINK_ALIAS]);
        let alias_values = tokens.all_values(PREFIX_LINK_ALIAS);
        if !tokens.preamble().is_empty()
            || !tokens.has(PREFIX_MODULE_CODE)
            || alias_values.is_empty()
        {
            return Err(self.invalid_format(&self.messages.usage_delete_link));
        }

        let code = ModuleCode::new(tokens.last_value(PREFIX_MODULE_CODE).unwrap_or(""))?;
        let mut aliases = BTreeSet::new();
        for value in alias_values {
            aliases.insert(LinkAlias::new(value)?);
        }
        Ok(Command::DeleteLink { code, aliases })
    }

    fn parse_lone_module_code(
        &self,
        tail: &str,
        usage: &str,
    ) -> Result<ModuleCode, ParseError> {
        let tokens = tokenize(tail, &[PREFIX_MODULE_CODE]);
        if !tokens.preamble().is_empty() || !tokens.has(PREFIX_MODULE_CODE) {
            return Err(self.invalid_format(usage));
        }
        Ok(ModuleCode::new(tokens.last_value(PREFIX_MODULE_CODE).unwrap_or(""))?)
    }

    fn invalid_format(&self, usage: &str) -> ParseError {
        ParseError::InvalidFormat(self.messages.invalid_format(usage))
    }
}

fn parse_tags(tokens: &ArgumentTokens) -> Result<BTreeSet<Tag>, ParseError> {
    let mut tags = BTreeSet::new();
    for value in tokens.all_values(PREFIX_TAG) {
        tags.insert(Tag::new(value)?);
    }
    Ok(tags)
}

/// Parses a 1-based display index: digits only, no sign, not zero.
fn parse_display_index(text: &str) -> Option<DisplayIndex> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let position: usize = trimmed.parse().ok()?;
    DisplayIndex::from_one_based(position)
}
