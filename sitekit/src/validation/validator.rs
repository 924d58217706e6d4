//! Field rules and the standard field validator.

use std::sync::LazyLock;

use regex::Regex;

use super::field::{Field, FieldKind};
use super::result::Verdict;
use crate::config::Messages;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern is valid")
});

/// Type alias for rule closures.
type Rule = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// An ordered chain of rules for one value. The first failing rule wins.
///
/// # Example
///
/// ```
/// use sitekit::validation::Rules;
///
/// let rules = Rules::new()
///     .required("Name is required")
///     .rule(|v| v.chars().count() >= 2, "Name is too short");
///
/// assert!(rules.check("Al").is_valid());
/// assert_eq!(rules.check(" ").message(), Some("Name is required"));
/// assert_eq!(rules.check("A").message(), Some("Name is too short"));
/// ```
#[derive(Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Require the value to be non-blank.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require `local@domain.tld` shape. Empty is valid; use `required()` for non-empty.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_empty() || is_valid_email(v), msg)
    }

    /// Require a phone number shape. Empty is valid; use `required()` for non-empty.
    pub fn phone(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_empty() || is_valid_phone(v), msg)
    }

    /// Run the chain against a value.
    pub fn check(&self, value: &str) -> Verdict {
        for rule in &self.rules {
            if let Err(message) = rule(value) {
                return Verdict::Invalid { message };
            }
        }
        Verdict::Valid
    }

    /// The standard chain for a field: presence, then the kind's format.
    pub fn for_field(kind: FieldKind, required: bool, messages: &Messages) -> Self {
        let mut rules = Self::new();
        if required {
            rules = rules.required(messages.required.clone());
        }
        match kind {
            FieldKind::Email => rules.email(messages.invalid_email.clone()),
            FieldKind::Telephone => rules.phone(messages.invalid_phone.clone()),
            FieldKind::Text | FieldKind::Other => rules,
        }
    }
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules").field("len", &self.rules.len()).finish()
    }
}

/// Validate a field's trimmed value against the standard chain.
pub fn validate(field: &Field<'_>, messages: &Messages) -> Verdict {
    Rules::for_field(field.kind, field.required, messages).check(field.trimmed())
}

/// One or more non-space non-`@` characters, `@`, the same, `.`, the same.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Optional leading `+`, then at least 10 digits, spaces, hyphens or parentheses.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}
