use std::borrow::Cow;

use sitedom::Element;

/// Declared kind of a form control, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Email,
    Telephone,
    Other,
}

impl FieldKind {
    /// Map a control's `type` (see [`Element::control_type`]).
    pub fn from_control_type(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Telephone,
            "text" | "textarea" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// Snapshot of the state validation reads from one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    pub value: Cow<'a, str>,
    pub kind: FieldKind,
    pub required: bool,
}

impl<'a> Field<'a> {
    pub fn new(value: impl Into<Cow<'a, str>>, kind: FieldKind, required: bool) -> Self {
        Self {
            value: value.into(),
            kind,
            required,
        }
    }

    pub fn from_element(element: &'a Element) -> Self {
        Self {
            value: element.current_value(),
            kind: FieldKind::from_control_type(element.control_type()),
            required: element.is_required(),
        }
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_element() {
        let email = Element::input("email").required().value(" a@b.com ");
        let field = Field::from_element(&email);
        assert_eq!(field.kind, FieldKind::Email);
        assert!(field.required);
        assert_eq!(field.trimmed(), "a@b.com");

        assert_eq!(
            Field::from_element(&Element::input("tel")).kind,
            FieldKind::Telephone
        );
        assert_eq!(
            Field::from_element(&Element::textarea()).kind,
            FieldKind::Text
        );
        assert_eq!(
            Field::from_element(&Element::select(["a"])).kind,
            FieldKind::Other
        );
    }

    #[test]
    fn test_value_follows_control_semantics() {
        let subject = Element::select(["info", "devis"]);
        assert_eq!(Field::from_element(&subject).value, "info");

        let consent = Element::input("checkbox").attr("value", "yes");
        assert_eq!(Field::from_element(&consent).value, "yes");
    }
}
