use std::collections::HashSet;

use sitedom::{Document, Selector};

use super::field::Field;
use super::presenter;
use super::result::Verdict;
use super::validator::validate;
use crate::config::Messages;

/// Validates form controls as the visitor leaves or edits them.
///
/// Fields are registered once by [`attach`](Self::attach); events on
/// unregistered elements are ignored.
#[derive(Debug, Clone, Default)]
pub struct FormValidationController {
    registered: HashSet<String>,
    messages: Messages,
}

impl FormValidationController {
    pub fn new(messages: Messages) -> Self {
        Self {
            registered: HashSet::new(),
            messages,
        }
    }

    /// Register every control inside every form. Returns how many fields
    /// were newly registered; calling it again only picks up new fields.
    pub fn attach(&mut self, doc: &Document) -> usize {
        let controls = Selector::any_tag(["input", "textarea", "select"]);
        let mut added = 0;
        for form in doc.query_all(&Selector::tag("form")) {
            for id in doc.query_within(&form, &controls) {
                if self.registered.insert(id) {
                    added += 1;
                }
            }
        }
        log::debug!(
            "validation: {added} new field(s), {} registered",
            self.registered.len()
        );
        added
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.registered.contains(id)
    }

    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.registered.iter().map(String::as_str)
    }

    /// Drop registrations of elements no longer in the page.
    pub fn forget_detached(&mut self, doc: &Document) {
        self.registered.retain(|id| doc.is_attached(id));
    }

    /// Leaving a field always validates it.
    pub fn on_blur(&self, doc: &mut Document, target: &str) -> Option<Verdict> {
        if !self.is_registered(target) {
            return None;
        }
        self.validate_field(doc, target)
    }

    /// Editing a field re-validates it only while it shows an error.
    pub fn on_input(&self, doc: &mut Document, target: &str) -> Option<Verdict> {
        if !self.is_registered(target) || !presenter::has_error(doc, target) {
            return None;
        }
        self.validate_field(doc, target)
    }

    /// Validate one field and render the result.
    pub fn validate_field(&self, doc: &mut Document, id: &str) -> Option<Verdict> {
        let verdict = validate(&Field::from_element(doc.get(id)?), &self.messages);
        presenter::present(doc, id, &verdict);
        Some(verdict)
    }
}
