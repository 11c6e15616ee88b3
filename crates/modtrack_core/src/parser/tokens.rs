//! Prefixed-argument tokenizer.
//!
//! # Responsibility
//! - Split a command tail into a preamble and per-prefix value segments.
//!
//! # Invariants
//! - A prefix only matches at the start of the tail or after whitespace.
//! - Segment values keep their original order; callers decide whether the
//!   last occurrence wins (single-valued) or all occurrences count
//!   (multi-valued).

/// A fixed marker token introducing one argument kind, such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix(pub &'static str);

impl Prefix {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub const PREFIX_NAME: Prefix = Prefix("n/");
pub const PREFIX_PHONE: Prefix = Prefix("p/");
pub const PREFIX_EMAIL: Prefix = Prefix("e/");
pub const PREFIX_TAG: Prefix = Prefix("t/");
pub const PREFIX_MODULE_CODE: Prefix = Prefix("m/");
pub const PREFIX_MODULE_TITLE: Prefix = Prefix("ti/");
pub const PREFIX_TASK_DESCRIPTION: Prefix = Prefix("td/");
pub const PREFIX_TASK_NUMBER: Prefix = Prefix("tn/");
pub const PREFIX_LINK_ALIAS: Prefix = Prefix("la/");
pub const PREFIX_LINK_URL: Prefix = Prefix("u/");

/// Result of tokenizing one command tail against a set of prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentTokens {
    preamble: String,
    segments: Vec<(Prefix, String)>,
}

impl ArgumentTokens {
    /// Trimmed text before the first recognized prefix.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn has(&self, prefix: Prefix) -> bool {
        self.segments.iter().any(|(found, _)| *found == prefix)
    }

    pub fn count(&self, prefix: Prefix) -> usize {
        self.segments.iter().filter(|(found, _)| *found == prefix).count()
    }

    /// The last occurrence's value; the winner for single-valued fields.
    pub fn last_value(&self, prefix: Prefix) -> Option<&str> {
        self.segments
            .iter()
            .rev()
            .find(|(found, _)| *found == prefix)
            .map(|(_, value)| value.as_str())
    }

    /// Every occurrence's value in input order, for multi-valued fields.
    pub fn all_values(&self, prefix: Prefix) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|(found, _)| *found == prefix)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Tokenizes `tail` against `prefixes`.
///
/// Text that belongs to no recognized prefix stays attached to the value of
/// the prefix before it (or to the preamble when no prefix precedes it).
pub fn tokenize(tail: &str, prefixes: &[Prefix]) -> ArgumentTokens {
    let mut starts: Vec<(usize, Prefix)> = Vec::new();
    for &prefix in prefixes {
        for (position, _) in tail.match_indices(prefix.as_str()) {
            if is_prefix_start(tail, position) {
                starts.push((position, prefix));
            }
        }
    }
    starts.sort_unstable_by_key(|(position, _)| *position);

    let preamble_end = starts.first().map_or(tail.len(), |(position, _)| *position);
    let preamble = tail[..preamble_end].trim().to_string();

    let mut segments = Vec::with_capacity(starts.len());
    for (index, (position, prefix)) in starts.iter().enumerate() {
        let value_start = position + prefix.as_str().len();
        let value_end = starts
            .get(index + 1)
            .map_or(tail.len(), |(next_position, _)| *next_position);
        let value = tail[value_start..value_end].trim().to_string();
        segments.push((*prefix, value));
    }

    ArgumentTokens { preamble, segments }
}

fn is_prefix_start(tail: &str, position: usize) -> bool {
    position == 0
        || tail[..position]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::{
        tokenize, PREFIX_EMAIL, PREFIX_LINK_ALIAS, PREFIX_MODULE_CODE, PREFIX_NAME, PREFIX_PHONE,
        PREFIX_TAG, PREFIX_TASK_NUMBER,
    };

    #[test]
    fn tokenize_splits_preamble_and_values() {
        let tokens = tokenize(
            " 1 n/Amy Bee p/11111111",
            &[PREFIX_NAME, PREFIX_PHONE],
        );
        assert_eq!(tokens.preamble(), "1");
        assert_eq!(tokens.last_value(PREFIX_NAME), Some("Amy Bee"));
        assert_eq!(tokens.last_value(PREFIX_PHONE), Some("11111111"));
    }

    #[test]
    fn last_occurrence_wins_for_repeated_prefixes() {
        let tokens = tokenize(
            " n/Amy Bee n/Bob Choo p/11111111",
            &[PREFIX_NAME, PREFIX_PHONE],
        );
        assert_eq!(tokens.last_value(PREFIX_NAME), Some("Bob Choo"));
        assert_eq!(tokens.all_values(PREFIX_NAME), ["Amy Bee", "Bob Choo"]);
    }

    #[test]
    fn prefix_must_follow_whitespace() {
        // The `p/` inside `ap/11` is value text, not a phone prefix.
        let tokens = tokenize(
            " n/Amy Bee ap/11 p/22 e/amy@example.com",
            &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL],
        );
        assert_eq!(tokens.last_value(PREFIX_NAME), Some("Amy Bee ap/11"));
        assert_eq!(tokens.last_value(PREFIX_PHONE), Some("22"));
        assert_eq!(tokens.last_value(PREFIX_EMAIL), Some("amy@example.com"));
    }

    #[test]
    fn longer_prefixes_with_shared_first_letter_do_not_collide() {
        let tokens = tokenize(
            " m/CS2106 tn/2 t/urgent",
            &[PREFIX_MODULE_CODE, PREFIX_TASK_NUMBER, PREFIX_TAG],
        );
        assert_eq!(tokens.last_value(PREFIX_TASK_NUMBER), Some("2"));
        assert_eq!(tokens.last_value(PREFIX_TAG), Some("urgent"));
    }

    #[test]
    fn missing_prefix_reports_absent() {
        let tokens = tokenize(" m/CS2106", &[PREFIX_MODULE_CODE, PREFIX_LINK_ALIAS]);
        assert!(tokens.has(PREFIX_MODULE_CODE));
        assert!(!tokens.has(PREFIX_LINK_ALIAS));
        assert_eq!(tokens.count(PREFIX_LINK_ALIAS), 0);
        assert_eq!(tokens.last_value(PREFIX_LINK_ALIAS), None);
    }

    #[test]
    fn empty_value_is_kept_as_empty_string() {
        let tokens = tokenize(" t/ n/Amy", &[PREFIX_TAG, PREFIX_NAME]);
        assert_eq!(tokens.all_values(PREFIX_TAG), [""]);
    }
}
