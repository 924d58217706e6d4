//! The contact form: guard, payload, submission lifecycle.
//!
//! Submitting hands a [`PendingSubmission`] to the host, which performs the
//! POST and reports back through [`ContactController::complete`]. Until then
//! the form is locked against double submission.

use std::time::Instant;

use contact_api::{ApiError, ContactRequest, ContactResponse};
use sitedom::{Document, Element, Selector};

use crate::config::Messages;
use crate::flash::{FlashNotifier, Severity};
use crate::validation::presenter;

/// Class identifying the contact form.
pub const CONTACT_FORM_CLASS: &str = "contact-form";

/// Control types that never contribute to the payload.
const BUTTON_TYPES: [&str; 4] = ["submit", "button", "reset", "image"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// How the last submission attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// A POST the host still has to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub form_id: String,
    pub request: ContactRequest,
}

/// What a submit event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Not the contact form; the browser default applies.
    NotHandled,
    /// A submission is already in flight.
    Ignored,
    /// Required fields were blank; nothing was sent.
    Rejected { missing: Vec<&'static str> },
    /// The payload is ready to be sent.
    Send(PendingSubmission),
}

impl SubmitAction {
    /// Every action on the contact form suppresses the page navigation.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::NotHandled)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactController {
    form: Option<String>,
    state: SubmissionState,
    last_outcome: Option<Outcome>,
    /// Controls this controller disabled and must re-enable.
    locked: Vec<String>,
    messages: Messages,
}

impl ContactController {
    pub fn new(messages: Messages) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Bind to the first `form.contact-form`. Without one the controller
    /// stays inert.
    pub fn attach(&mut self, doc: &Document) -> Option<&str> {
        self.form = doc.query(&Selector::tag("form").with_class(CONTACT_FORM_CLASS));
        match &self.form {
            Some(id) => log::debug!("contact: bound to form {id}"),
            None => log::debug!("contact: no contact form on this page"),
        }
        self.form.as_deref()
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Handle a submit event targeting `target`.
    pub fn submit(
        &mut self,
        doc: &mut Document,
        flash: &mut FlashNotifier,
        target: &str,
        now: Instant,
    ) -> SubmitAction {
        let Some(form) = self.form.clone().filter(|id| id == target) else {
            return SubmitAction::NotHandled;
        };

        if self.state == SubmissionState::Submitting {
            log::debug!("contact: submission already in flight, ignoring submit");
            return SubmitAction::Ignored;
        }

        let request = form_payload(doc, &form);
        let missing = request.missing_required();
        if !missing.is_empty() {
            log::info!("contact: blank required field(s): {}", missing.join(", "));
            flash.notify_at(doc, &self.messages.missing_fields, Severity::Error, now);
            self.last_outcome = Some(Outcome::Failure);
            return SubmitAction::Rejected { missing };
        }

        self.lock(doc, &form);
        self.state = SubmissionState::Submitting;
        log::info!("contact: submitting {} field(s)", request.len());

        SubmitAction::Send(PendingSubmission {
            form_id: form,
            request,
        })
    }

    /// Apply the result of a submission. Results for another form or with
    /// nothing in flight are dropped.
    pub fn complete(
        &mut self,
        doc: &mut Document,
        flash: &mut FlashNotifier,
        form_id: &str,
        result: Result<ContactResponse, ApiError>,
        now: Instant,
    ) -> Option<Outcome> {
        if self.state != SubmissionState::Submitting || self.form.as_deref() != Some(form_id) {
            log::debug!("contact: dropping stale result for form {form_id}");
            return None;
        }

        self.unlock(doc);
        self.state = SubmissionState::Idle;

        let outcome = match result {
            Ok(ContactResponse {
                success: true,
                message,
            }) => {
                flash.notify_at(doc, message, Severity::Success, now);
                reset_form(doc, form_id);
                for id in form_controls(doc, form_id) {
                    presenter::clear(doc, &id);
                }
                Outcome::Success
            }
            Ok(ContactResponse {
                success: false,
                message,
            }) => {
                flash.notify_at(doc, message, Severity::Error, now);
                Outcome::Failure
            }
            Err(err) => {
                log::error!("contact: submission failed: {err}");
                flash.notify_at(doc, &self.messages.submission_failed, Severity::Error, now);
                Outcome::Failure
            }
        };

        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    /// Disable the form's submit buttons until the result is in.
    fn lock(&mut self, doc: &mut Document, form: &str) {
        let candidates = doc.query_within(form, &Selector::any_tag(["button", "input"]));
        for id in candidates {
            let Some(el) = doc.get_mut(&id) else { continue };
            let is_submit = match el.tag.as_str() {
                "button" => el.get_attr("type").is_none_or(|t| t == "submit"),
                _ => matches!(el.control_type(), "submit" | "image"),
            };
            if is_submit && !el.is_disabled() {
                el.set_attr("disabled", "");
                self.locked.push(id);
            }
        }
    }

    fn unlock(&mut self, doc: &mut Document) {
        for id in self.locked.drain(..) {
            if let Some(el) = doc.get_mut(&id) {
                el.remove_attr("disabled");
            }
        }
    }
}

/// `input`, `textarea` and `select` elements of a form, in order.
pub fn form_controls(doc: &Document, form: &str) -> Vec<String> {
    doc.query_within(form, &Selector::any_tag(["input", "textarea", "select"]))
}

/// Build the payload the way a browser collects a form: named, enabled,
/// non-button controls; unchecked boxes skipped; later names overwrite.
pub fn form_payload(doc: &Document, form: &str) -> ContactRequest {
    let mut request = ContactRequest::new();
    for id in form_controls(doc, form) {
        let Some(el) = doc.get(&id) else { continue };
        let Some(name) = el.get_attr("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        if el.is_disabled() || BUTTON_TYPES.contains(&el.control_type()) {
            continue;
        }
        if let Some(value) = submitted_value(el) {
            request.insert(name, value);
        }
    }
    request
}

fn submitted_value(el: &Element) -> Option<String> {
    match el.control_type() {
        "checkbox" | "radio" if !el.has_attr("checked") => None,
        _ => Some(el.current_value().into_owned()),
    }
}

/// Restore every control to its markup default: the `value` attribute for
/// inputs, the initial text for textareas, the first option for selects.
pub fn reset_form(doc: &mut Document, form: &str) {
    for id in form_controls(doc, form) {
        let Some(el) = doc.get_mut(&id) else { continue };
        let kind = el.control_type().to_string();
        match kind.as_str() {
            "checkbox" | "radio" => {}
            t if BUTTON_TYPES.contains(&t) => {}
            "textarea" => el.value = el.text_content(),
            "select" => el.value.clear(),
            _ => el.value = el.get_attr("value").unwrap_or_default().to_string(),
        }
    }
}
