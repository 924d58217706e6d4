use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Tag used for bare text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Markup
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub data: HashMap<String, String>,

    // Inline style declarations (`display`, `transform`, `animation`, ...)
    pub style: BTreeMap<String, String>,

    // Form control state
    /// Current value of an `input`, `textarea` or `select`.
    pub value: String,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            content: Content::None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            data: HashMap::new(),
            style: BTreeMap::new(),
            value: String::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn body() -> Self {
        Self::new("body")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: TEXT_TAG.to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    /// Create an `input` of the given `type`.
    pub fn input(kind: impl Into<String>) -> Self {
        Self::new("input").attr("type", kind)
    }

    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    /// Create a `select` with one `option` per value.
    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("select").children(
            options
                .into_iter()
                .map(|value| {
                    let value = value.into();
                    Element::new("option")
                        .attr("value", value.clone())
                        .child(Element::text(value))
                }),
        )
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new("button").child(Element::text(label))
    }

    pub fn anchor(href: impl Into<String>) -> Self {
        Self::new("a").attr("href", href)
    }

    pub fn img() -> Self {
        Self::new("img")
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Markup
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    pub fn required(self) -> Self {
        self.attr("required", "")
    }

    pub fn disabled(self) -> Self {
        self.attr("disabled", "")
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    /// Append a child, turning text content into a text node first.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let text = Element::text(std::mem::take(text));
                self.content = Content::Children(vec![text, child]);
            }
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    // Classes
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns true if the class was not present before.
    pub fn add_class(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if self.has_class(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Toggle a class and return whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }

    // Attributes
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.insert(property.into(), value.into());
    }

    // Form controls

    /// `input`, `textarea` and `select` elements.
    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    /// The control's `type`: the attribute for inputs (default `text`),
    /// the tag name for `textarea` and `select`.
    pub fn control_type(&self) -> &str {
        match self.tag.as_str() {
            "input" => self.get_attr("type").unwrap_or("text"),
            other => other,
        }
    }

    /// The value a script reading `control.value` would see.
    ///
    /// Checkboxes and radios report their `value` attribute (`on` when
    /// absent) whether checked or not. A select without a chosen value
    /// reports its first option's value, falling back to the option text.
    pub fn current_value(&self) -> Cow<'_, str> {
        match self.control_type() {
            "checkbox" | "radio" => Cow::Borrowed(self.get_attr("value").unwrap_or("on")),
            "select" if self.value.is_empty() => self
                .child_elements()
                .iter()
                .find(|opt| opt.tag == "option")
                .map_or(Cow::Borrowed(""), |opt| match opt.get_attr("value") {
                    Some(value) => Cow::Borrowed(value),
                    None => Cow::Owned(opt.text_content()),
                }),
            _ => Cow::Borrowed(&self.value),
        }
    }

    pub fn is_required(&self) -> bool {
        self.has_attr("required")
    }

    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    // Text
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }

    /// Replace all content with a single text value.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }
}
