//! A small CSS selector subset.
//!
//! Supports comma-separated lists of compound selectors built from a tag
//! name, `#id`, `.class`, `[attr]`, `[attr="value"]` and `[attr^="prefix"]`.
//! Combinators are not supported. `data-*` attributes are matched against
//! the element's dataset.

use std::str::FromStr;

use thiserror::Error;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{0}' in selector")]
    Unexpected(char),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
    #[error("combinators are not supported: {0}")]
    Combinator(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
    Prefix(String, String),
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let alternatives = input
            .split(',')
            .map(|part| Compound::parse(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }

    /// Selector matching a single class.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            alternatives: vec![Compound {
                classes: vec![class.into()],
                ..Default::default()
            }],
        }
    }

    /// Selector matching a single tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            alternatives: vec![Compound {
                tag: Some(tag.into()),
                ..Default::default()
            }],
        }
    }

    /// Selector matching any of the given tag names.
    pub fn any_tag<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alternatives: tags
                .into_iter()
                .map(|tag| Compound {
                    tag: Some(tag.into()),
                    ..Default::default()
                })
                .collect(),
        }
    }

    /// Selector matching any of the given classes.
    pub fn any_class<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alternatives: classes
                .into_iter()
                .map(|class| Compound {
                    classes: vec![class.into()],
                    ..Default::default()
                })
                .collect(),
        }
    }

    /// Narrow every alternative to elements with the class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        for compound in &mut self.alternatives {
            compound.classes.push(class.clone());
        }
        self
    }

    /// Narrow every alternative to elements carrying the attribute.
    pub fn with_attr(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        for compound in &mut self.alternatives {
            compound.attributes.push(AttrMatch::Exists(name.clone()));
        }
        self
    }

    /// Narrow every alternative to elements whose attribute starts with `prefix`.
    pub fn with_attr_prefix(mut self, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        let (name, prefix) = (name.into(), prefix.into());
        for compound in &mut self.alternatives {
            compound
                .attributes
                .push(AttrMatch::Prefix(name.clone(), prefix.clone()));
        }
        self
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives.iter().any(|c| c.matches(element))
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Compound {
    fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        if input.chars().any(char::is_whitespace) {
            return Err(SelectorError::Combinator(input.to_string()));
        }

        let mut compound = Compound::default();
        let mut chars = input.chars().peekable();

        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            compound.tag = Some(tag);
        }

        while let Some(c) = chars.next() {
            match c {
                '.' => compound.classes.push(non_empty(take_ident(&mut chars), c)?),
                '#' => compound.id = Some(non_empty(take_ident(&mut chars), c)?),
                '[' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(ch) => body.push(ch),
                            None => return Err(SelectorError::UnterminatedAttribute),
                        }
                    }
                    compound.attributes.push(AttrMatch::parse(&body)?);
                }
                other => return Err(SelectorError::Unexpected(other)),
            }
        }

        Ok(compound)
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if &element.id != id {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
            && self.attributes.iter().all(|a| a.matches(element))
    }
}

impl AttrMatch {
    fn parse(body: &str) -> Result<Self, SelectorError> {
        if let Some((name, value)) = body.split_once("^=") {
            return Ok(Self::Prefix(attr_name(name)?, unquote(value)));
        }
        if let Some((name, value)) = body.split_once('=') {
            return Ok(Self::Equals(attr_name(name)?, unquote(value)));
        }
        Ok(Self::Exists(attr_name(body)?))
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Exists(name) => lookup(element, name).is_some(),
            Self::Equals(name, value) => lookup(element, name) == Some(value.as_str()),
            Self::Prefix(name, prefix) => {
                lookup(element, name).is_some_and(|v| v.starts_with(prefix.as_str()))
            }
        }
    }
}

fn lookup<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    match name.strip_prefix("data-") {
        Some(key) => element.get_data(key).map(String::as_str),
        None => element.get_attr(name),
    }
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' || c == '*' {
            ident.push(c);
            chars.next();
        } else {
            break;
        }
    }
    ident
}

fn non_empty(ident: String, after: char) -> Result<String, SelectorError> {
    if ident.is_empty() {
        Err(SelectorError::Unexpected(after))
    } else {
        Ok(ident)
    }
}

fn attr_name(name: &str) -> Result<String, SelectorError> {
    let name = name.trim();
    if name.is_empty() {
        Err(SelectorError::Empty)
    } else {
        Ok(name.to_string())
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list() {
        let selector = Selector::parse(".company-card, .service-card").unwrap();
        assert!(selector.matches(&Element::div().class("service-card")));
        assert!(!selector.matches(&Element::div().class("news")));
    }

    #[test]
    fn test_attribute_prefix() {
        let selector = Selector::parse("a[href^=\"#\"]").unwrap();
        assert!(selector.matches(&Element::anchor("#about")));
        assert!(!selector.matches(&Element::anchor("/about")));
        assert!(!selector.matches(&Element::div().attr("href", "#about")));
    }

    #[test]
    fn test_data_attribute_uses_dataset() {
        let selector = Selector::parse("img[data-src]").unwrap();
        assert!(selector.matches(&Element::img().data("src", "/a.png")));
        assert!(!selector.matches(&Element::img().attr("src", "/a.png")));
    }

    #[test]
    fn test_builders_match_parsed() {
        let built = Selector::tag("a").with_attr_prefix("href", "#");
        assert_eq!(built, Selector::parse("a[href^=\"#\"]").unwrap());

        let controls = Selector::any_tag(["input", "textarea", "select"]);
        assert_eq!(controls, Selector::parse("input, textarea, select").unwrap());

        let images = Selector::tag("img").with_attr("data-src");
        assert_eq!(images, Selector::parse("img[data-src]").unwrap());
    }

    #[test]
    fn test_rejects_combinators() {
        assert!(matches!(
            Selector::parse("form input"),
            Err(SelectorError::Combinator(_))
        ));
        assert_eq!(
            Selector::parse("[href"),
            Err(SelectorError::UnterminatedAttribute)
        );
        assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
    }
}
