//! Validated field value types.
//!
//! # Responsibility
//! - Wrap raw user input in immutable, validated value types.
//! - Expose pure `is_valid` predicates so parsers can check before building.
//!
//! # Invariants
//! - Every stored value is trimmed and matches its type's pattern.
//! - Constraint messages are fixed per type and never rewritten downstream.
//! - Values never change after construction; equality and hashing use the
//!   normalized stored string.

use std::error::Error;
use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:]+_.-]+@([[:alnum:]]([[:alnum:]-]*[[:alnum:]])?\.)*[[:alnum:]]{2,}$")
        .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));
static MODULE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid module code regex"));
static MODULE_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:][:punct:]][[:alnum:][:punct:] ]*$").expect("valid module title regex")
});
static LINK_ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]]{1,15}$").expect("valid link alias regex"));
static LINK_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?[[:alnum:]]([[:alnum:].-]*[[:alnum:]])?\.[[:alpha:]]{2,}(/\S*)?$")
        .expect("valid link url regex")
});

/// Rejection of a raw value by a field type's validation pattern.
///
/// Carries the field's fixed constraint message; parsers surface it to the
/// user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintViolation {
    message: &'static str,
}

impl ConstraintViolation {
    fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl Error for ConstraintViolation {}

macro_rules! string_field {
    ($(#[$outer:meta])* $name:ident, $constraints:expr) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub const CONSTRAINTS: &'static str = $constraints;

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }
    };
}

string_field!(
    /// A person's name.
    Name,
    "Names should only contain alphanumeric characters and spaces, and it should not be blank"
);

impl Name {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        NAME_RE.is_match(raw.trim())
    }
}

string_field!(
    /// A person's phone number.
    Phone,
    "Phone numbers should only contain numbers, and it should be at least 3 digits long"
);

impl Phone {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        PHONE_RE.is_match(raw.trim())
    }
}

string_field!(
    /// A person's email address.
    Email,
    "Emails should be of the format local-part@domain, where the local-part contains only \
     alphanumeric characters and the special characters +_.-, and the domain is made up of \
     dot-separated labels of alphanumeric characters (hyphens allowed between), ending in a \
     label at least 2 characters long"
);

impl Email {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        EMAIL_RE.is_match(raw.trim())
    }
}

string_field!(
    /// A tag attached to a person.
    Tag,
    "Tag names should be alphanumeric"
);

impl Tag {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        TAG_RE.is_match(raw.trim())
    }
}

string_field!(
    /// A module code such as `CS2106`.
    ///
    /// Normalized to ASCII uppercase so identity comparisons and display
    /// agree regardless of how the user typed the code.
    ModuleCode,
    "Module codes should only contain alphanumeric characters, and should not be blank"
);

impl ModuleCode {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn is_valid(raw: &str) -> bool {
        MODULE_CODE_RE.is_match(raw.trim())
    }
}

string_field!(
    /// A module title. May be blank for modules added by code only.
    ModuleTitle,
    "Module titles should only contain alphanumeric characters, punctuation and spaces"
);

impl ModuleTitle {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || MODULE_TITLE_RE.is_match(trimmed)
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

string_field!(
    /// A task description inside a module.
    TaskDescription,
    "Task descriptions should not be blank"
);

impl TaskDescription {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        !raw.trim().is_empty()
    }
}

string_field!(
    /// A short alias naming a link inside a module.
    LinkAlias,
    "Link aliases should be a single alphanumeric word of 1 to 15 characters"
);

impl LinkAlias {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        LINK_ALIAS_RE.is_match(raw.trim())
    }
}

string_field!(
    /// A web URL stored inside a module, with or without an explicit scheme.
    LinkUrl,
    "Links should be valid web URLs without whitespace, such as https://example.com or \
     example.com/page"
);

impl LinkUrl {
    pub fn new(raw: &str) -> Result<Self, ConstraintViolation> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(ConstraintViolation::new(Self::CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        LINK_URL_RE.is_match(raw.trim())
    }

    /// The URL with any leading `http://`/`https://` scheme removed.
    ///
    /// Two links pointing at the same target with and without an explicit
    /// scheme compare equal through this view.
    pub fn without_scheme(&self) -> &str {
        self.0
            .strip_prefix("https://")
            .or_else(|| self.0.strip_prefix("http://"))
            .unwrap_or(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Email, LinkAlias, LinkUrl, ModuleCode, ModuleTitle, Name, Phone, Tag, TaskDescription,
    };

    #[test]
    fn name_accepts_alphanumeric_words_and_trims() {
        let name = Name::new("  Amy Bee  ").expect("plain name should be valid");
        assert_eq!(name.as_str(), "Amy Bee");
        assert_eq!(name.to_string(), "Amy Bee");
    }

    #[test]
    fn name_rejects_blank_and_symbols_with_fixed_message() {
        for raw in ["", "   ", "James&", "*starred", "peter the 2nd!"] {
            let error = match Name::new(raw) {
                Err(error) => error,
                Ok(_) => panic!("`{raw}` should be rejected"),
            };
            assert_eq!(error.message(), Name::CONSTRAINTS);
        }
    }

    #[test]
    fn phone_requires_three_or_more_digits() {
        assert!(Phone::is_valid("11111111"));
        assert!(Phone::is_valid("911"));
        assert!(!Phone::is_valid("91"));
        assert!(!Phone::is_valid("911a"));
        assert!(!Phone::is_valid("9312 1534"));
        assert_eq!(
            Phone::new("phone").expect_err("words are not phones").message(),
            Phone::CONSTRAINTS
        );
    }

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(Email::is_valid("amy@example.com"));
        assert!(Email::is_valid("local+tag_1.x-y@sub.example-domain.org"));
        assert!(Email::is_valid("peterjack@bc"));
        assert!(!Email::is_valid("bob!yahoo"));
        assert!(!Email::is_valid("@example.com"));
        assert!(!Email::is_valid("amy@"));
        assert!(!Email::is_valid("amy@-example.com"));
        assert!(!Email::is_valid("amy@example.c"));
    }

    #[test]
    fn tag_is_one_alphanumeric_word() {
        assert!(Tag::is_valid("friend"));
        assert!(!Tag::is_valid("hubby*"));
        assert!(!Tag::is_valid("two words"));
        assert!(!Tag::is_valid(""));
    }

    #[test]
    fn module_code_normalizes_to_uppercase() {
        let code = ModuleCode::new("cs2106").expect("lowercase code should be valid");
        assert_eq!(code.as_str(), "CS2106");
        assert_eq!(code, ModuleCode::new("CS2106").expect("uppercase code should be valid"));
        assert!(!ModuleCode::is_valid("(CS2103T)"));
        assert!(!ModuleCode::is_valid("C$2500"));
    }

    #[test]
    fn module_title_may_be_blank_but_not_start_with_space() {
        assert!(ModuleTitle::is_valid(""));
        assert!(ModuleTitle::is_valid("Introduction to Operating Systems"));
        assert!(ModuleTitle::is_valid("Linear Algebra I"));
        assert!(ModuleTitle::new("").expect("blank title allowed").is_blank());
    }

    #[test]
    fn task_description_rejects_blank_only() {
        assert!(TaskDescription::is_valid("Submit the quiz@LumiNUS"));
        assert!(TaskDescription::is_valid("Pay $5 to Ann for project costs"));
        assert!(!TaskDescription::is_valid("   "));
    }

    #[test]
    fn link_alias_is_short_alphanumeric_word() {
        assert!(LinkAlias::is_valid("osm"));
        assert!(LinkAlias::is_valid("a23456789012345"));
        assert!(!LinkAlias::is_valid("a234567890123456"));
        assert!(!LinkAlias::is_valid("two words"));
        assert!(!LinkAlias::is_valid("dash-ed"));
    }

    #[test]
    fn link_url_accepts_scheme_optional_urls() {
        assert!(LinkUrl::is_valid("openstreetmap.org"));
        assert!(LinkUrl::is_valid("https://openstreetmap.org"));
        assert!(LinkUrl::is_valid("http://example.com/path?q=1"));
        assert!(!LinkUrl::is_valid("not a url"));
        assert!(!LinkUrl::is_valid("ftp://example.com"));
        assert!(!LinkUrl::is_valid("nodots"));
    }

    #[test]
    fn link_url_scheme_is_ignored_by_without_scheme() {
        let with = LinkUrl::new("https://openstreetmap.org").expect("url should be valid");
        let without = LinkUrl::new("openstreetmap.org").expect("url should be valid");
        assert_eq!(with.without_scheme(), without.without_scheme());
        assert_ne!(with, without);
    }
}
