mod common;

use common::*;
use sitekit::prelude::*;
use sitekit::validation::{ERROR_CLASS, presenter};

fn signup_page() -> Document {
    Document::new(
        Element::body()
            .child(contact_form())
            .child(
                Element::form()
                    .id("newsletter")
                    .child(Element::input("tel").id("phone"))
                    .child(Element::input("email").id("optional-email"))
                    .child(Element::select(["fr", "en"]).id("lang").required()),
            )
            .child(Element::input("email").id("outside").required()),
    )
}

fn blur(page: &mut Page, id: &str) {
    page.dispatch(Event::Blur {
        target: id.to_string(),
        new_target: None,
    });
}

fn has_error(page: &Page, id: &str) -> bool {
    page.document().get(id).unwrap().has_class(ERROR_CLASS)
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_registers_controls_of_every_form() {
    let page = load(signup_page());
    let validation = page.validation();
    for id in ["name", "email", "message", "phone", "optional-email", "lang"] {
        assert!(validation.is_registered(id), "{id}");
    }
    assert!(!validation.is_registered("outside"));
    assert!(!validation.is_registered("send"));
}

#[test]
fn test_reattach_does_not_double_register() {
    let mut page = load(signup_page());
    let before = page.validation().registered().count();

    page.dispatch(Event::Ready);
    assert_eq!(page.validation().registered().count(), before);

    page.document_mut().set_value("email", "nope");
    blur(&mut page, "email");
    assert_eq!(error_nodes(&page, "email").len(), 1);
}

#[test]
fn test_fields_added_later_need_reattach() {
    let mut page = load(contact_page());
    let late = Element::input("tel").id("late");
    page.document_mut().append_child("contact-form", late);

    page.document_mut().set_value("late", "123");
    blur(&mut page, "late");
    assert!(!has_error(&page, "late"));

    page.dispatch(Event::Ready);
    blur(&mut page, "late");
    assert!(has_error(&page, "late"));
}

#[test]
fn test_reattach_forgets_removed_fields() {
    let mut page = load(signup_page());
    assert!(page.validation().is_registered("lang"));

    page.document_mut().remove("newsletter");
    page.dispatch(Event::Ready);

    assert!(!page.validation().is_registered("lang"));
    assert!(!page.validation().is_registered("phone"));
    assert!(page.validation().is_registered("email"));
}

#[test]
fn test_unregistered_field_is_ignored() {
    let mut page = load(signup_page());
    blur(&mut page, "outside");
    assert!(!has_error(&page, "outside"));
    assert!(error_nodes(&page, "outside").is_empty());
}

// ============================================================================
// Blur
// ============================================================================

#[test]
fn test_blur_invalid_email_marks_field_once() {
    let mut page = load(contact_page());
    page.document_mut().set_value("email", "not-an-email");
    blur(&mut page, "email");

    assert!(has_error(&page, "email"));
    let nodes = error_nodes(&page, "email");
    assert_eq!(nodes.len(), 1);

    let node = page.document().get(&nodes[0]).unwrap();
    assert_eq!(node.text_content(), "Please enter a valid email address");
    assert_eq!(page.document().next_sibling_id("email").as_deref(), Some(nodes[0].as_str()));
}

#[test]
fn test_repeated_invalid_blurs_keep_one_message() {
    let mut page = load(contact_page());

    page.document_mut().set_value("email", "first");
    blur(&mut page, "email");
    page.document_mut().set_value("email", "");
    blur(&mut page, "email");

    let nodes = error_nodes(&page, "email");
    assert_eq!(nodes.len(), 1);
    assert_eq!(
        page.document().get(&nodes[0]).unwrap().text_content(),
        "This field is required"
    );
}

#[test]
fn test_blur_valid_clears_error() {
    let mut page = load(contact_page());
    blur(&mut page, "name");
    assert!(has_error(&page, "name"));

    page.document_mut().set_value("name", "Alice");
    blur(&mut page, "name");
    assert!(!has_error(&page, "name"));
    assert!(error_nodes(&page, "name").is_empty());
}

#[test]
fn test_focus_change_validates_previous_field() {
    let mut page = load(contact_page());
    page.focus("name");
    page.focus("email");

    assert_eq!(page.focused(), Some("email"));
    assert!(has_error(&page, "name"));
    assert!(!has_error(&page, "email"));

    page.blur();
    assert!(has_error(&page, "email"));
}

#[test]
fn test_optional_phone_rules() {
    let mut page = load(signup_page());

    blur(&mut page, "phone");
    assert!(!has_error(&page, "phone"));

    page.document_mut().set_value("phone", "12345");
    blur(&mut page, "phone");
    assert_eq!(
        page.document()
            .get(&error_nodes(&page, "phone")[0])
            .unwrap()
            .text_content(),
        "Please enter a valid phone number"
    );

    page.document_mut().set_value("phone", "+223 76 12 34 56");
    blur(&mut page, "phone");
    assert!(!has_error(&page, "phone"));
}

#[test]
fn test_required_select_uses_first_option() {
    let mut page = load(signup_page());

    blur(&mut page, "lang");
    assert!(!has_error(&page, "lang"));
    assert!(error_nodes(&page, "lang").is_empty());

    page.document_mut().set_value("lang", "en");
    blur(&mut page, "lang");
    assert!(!has_error(&page, "lang"));
}

#[test]
fn test_required_checkbox_agrees_with_payload() {
    let consent = Element::input("checkbox")
        .id("consent")
        .name("consent")
        .attr("checked", "")
        .required();
    let doc = Document::new(Element::body().child(contact_form().child(consent)));
    let mut page = load(doc);

    blur(&mut page, "consent");
    assert!(!has_error(&page, "consent"));

    let payload = sitekit::contact::form_payload(page.document(), "contact-form");
    assert_eq!(payload.get("consent"), Some("on"));
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_input_on_clean_field_does_nothing() {
    let mut page = load(contact_page());
    page.type_text("email", "a");
    assert!(!has_error(&page, "email"));
    assert!(error_nodes(&page, "email").is_empty());
}

#[test]
fn test_input_revalidates_errored_field() {
    let mut page = load(contact_page());
    page.document_mut().set_value("email", "a");
    blur(&mut page, "email");
    assert!(has_error(&page, "email"));

    page.type_text("email", "a@b");
    assert_eq!(error_nodes(&page, "email").len(), 1);

    page.type_text("email", "a@b.co");
    assert!(!has_error(&page, "email"));
    assert!(error_nodes(&page, "email").is_empty());
}

// ============================================================================
// Presenter
// ============================================================================

#[test]
fn test_clear_is_idempotent() {
    let mut doc = contact_page();
    let snapshot = doc.clone();

    presenter::clear(&mut doc, "email");
    presenter::clear(&mut doc, "email");
    assert_eq!(doc.body(), snapshot.body());

    presenter::present(&mut doc, "email", &Verdict::invalid("bad"));
    presenter::clear(&mut doc, "email");
    let once = doc.clone();
    presenter::clear(&mut doc, "email");
    assert_eq!(doc.body(), once.body());
    assert_eq!(doc.body(), snapshot.body());
}

#[test]
fn test_present_missing_field_is_noop() {
    let mut doc = contact_page();
    let snapshot = doc.clone();
    presenter::present(&mut doc, "ghost", &Verdict::invalid("bad"));
    assert_eq!(doc.body(), snapshot.body());
}

#[test]
fn test_messages_are_per_field() {
    let mut doc = contact_page();
    presenter::present(&mut doc, "name", &Verdict::invalid("a"));
    presenter::present(&mut doc, "email", &Verdict::invalid("b"));
    presenter::present(&mut doc, "name", &Verdict::invalid("c"));

    assert_eq!(presenter::messages_for(&doc, "name").len(), 1);
    assert_eq!(presenter::messages_for(&doc, "email").len(), 1);
    assert_eq!(doc.query_all(&Selector::class("field-error")).len(), 2);
}
