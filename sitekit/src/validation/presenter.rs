//! Renders a [`Verdict`] next to its field.
//!
//! An invalid field carries the [`ERROR_CLASS`] class and exactly one
//! `div.field-error` sibling placed right after it, bound to the field
//! through `data-for`. A valid field carries neither.

use sitedom::{Document, Element, Selector};

use super::result::Verdict;

/// Class added to a field while it is invalid.
pub const ERROR_CLASS: &str = "error";

/// Class of the message node rendered after an invalid field.
pub const ERROR_MESSAGE_CLASS: &str = "field-error";

/// Dataset key binding a message node to its field.
const FOR_KEY: &str = "for";

/// Show the verdict on the field. Missing fields are ignored.
pub fn present(doc: &mut Document, field_id: &str, verdict: &Verdict) {
    let Verdict::Invalid { message } = verdict else {
        clear(doc, field_id);
        return;
    };

    let Some(field) = doc.get_mut(field_id) else {
        log::debug!("present: field {field_id} is not attached");
        return;
    };
    field.add_class(ERROR_CLASS);

    remove_messages(doc, field_id);

    let node = Element::div()
        .class(ERROR_MESSAGE_CLASS)
        .data(FOR_KEY, field_id)
        .child(Element::text(message.clone()));
    doc.insert_after(field_id, node);
}

/// Remove the error class and message of a field. No-op on a clean field.
pub fn clear(doc: &mut Document, field_id: &str) {
    if let Some(field) = doc.get_mut(field_id) {
        field.remove_class(ERROR_CLASS);
    }
    remove_messages(doc, field_id);
}

/// Whether the field currently shows an error.
pub fn has_error(doc: &Document, field_id: &str) -> bool {
    doc.get(field_id).is_some_and(|el| el.has_class(ERROR_CLASS))
}

/// IDs of the message nodes bound to a field.
pub fn messages_for(doc: &Document, field_id: &str) -> Vec<String> {
    let selector = Selector::class(ERROR_MESSAGE_CLASS);
    doc.query_all(&selector)
        .into_iter()
        .filter(|id| {
            doc.get(id)
                .and_then(|el| el.get_data(FOR_KEY))
                .is_some_and(|bound| bound == field_id)
        })
        .collect()
}

fn remove_messages(doc: &mut Document, field_id: &str) {
    for id in messages_for(doc, field_id) {
        doc.remove(&id);
    }
}
