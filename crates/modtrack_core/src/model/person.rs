//! Person entity.
//!
//! # Invariants
//! - Constructed only from already-validated field values.
//! - Never mutated: edits build a replacement person.
//! - Weak identity (`same_person`) is name + phone; full equality covers
//!   every field.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::model::field::{Email, Name, Phone, Tag};

/// A contact record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(name: Name, phone: Phone, email: Email, tags: BTreeSet<Tag>) -> Self {
        Self {
            name,
            phone,
            email,
            tags,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Read-only view of the tag set; callers cannot mutate through it.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Weak duplicate-detection identity: same name and same phone.
    ///
    /// Deliberately weaker than `==` so that duplicate checks do not require
    /// every field to match.
    pub fn same_person(&self, other: &Person) -> bool {
        self.name == other.name && self.phone == other.phone
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}",
            self.name, self.phone, self.email
        )?;
        if !self.tags.is_empty() {
            write!(f, "; Tags: ")?;
            for tag in &self.tags {
                write!(f, "[{tag}]")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::Person;
    use crate::model::field::{Email, Name, Phone, Tag};

    fn person(name: &str, phone: &str, email: &str, tags: &[&str]) -> Person {
        Person::new(
            Name::new(name).expect("test name should be valid"),
            Phone::new(phone).expect("test phone should be valid"),
            Email::new(email).expect("test email should be valid"),
            tags.iter()
                .map(|tag| Tag::new(tag).expect("test tag should be valid"))
                .collect::<BTreeSet<_>>(),
        )
    }

    #[test]
    fn same_person_ignores_email_and_tags() {
        let left = person("Amy Bee", "11111111", "amy@example.com", &["friend"]);
        let right = person("Amy Bee", "11111111", "other@example.com", &[]);
        assert!(left.same_person(&right));
        assert_ne!(left, right);
    }

    #[test]
    fn same_person_requires_both_name_and_phone() {
        let base = person("Amy Bee", "11111111", "amy@example.com", &[]);
        let other_phone = person("Amy Bee", "22222222", "amy@example.com", &[]);
        let other_name = person("Bob Choo", "11111111", "amy@example.com", &[]);
        assert!(!base.same_person(&other_phone));
        assert!(!base.same_person(&other_name));
    }

    #[test]
    fn display_lists_tags_in_sorted_order() {
        let tagged = person("Amy Bee", "11111111", "amy@example.com", &["zeta", "alpha"]);
        assert_eq!(
            tagged.to_string(),
            "Amy Bee; Phone: 11111111; Email: amy@example.com; Tags: [alpha][zeta]"
        );

        let untagged = person("Amy Bee", "11111111", "amy@example.com", &[]);
        assert_eq!(
            untagged.to_string(),
            "Amy Bee; Phone: 11111111; Email: amy@example.com"
        );
    }
}
