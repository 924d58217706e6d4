//! Mobile menu and in-page anchor navigation.

use sitedom::{Document, Selector};

use crate::effect::{Effect, ScrollBehavior, ScrollBlock};

pub const NAV_LINKS_CLASS: &str = "nav-links";
pub const HAMBURGER_CLASS: &str = "hamburger";
/// Class marking the open menu on both the links and the toggle.
pub const ACTIVE_CLASS: &str = "active";

/// The collapsible navigation.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    links: Option<String>,
    hamburger: Option<String>,
}

impl Menu {
    pub fn attach(&mut self, doc: &Document) {
        self.links = doc.query(&Selector::class(NAV_LINKS_CLASS));
        self.hamburger = doc.query(&Selector::class(HAMBURGER_CLASS));
    }

    /// Flip the menu open or closed. Returns whether the links are now open.
    pub fn toggle(&self, doc: &mut Document) -> bool {
        let mut open = false;
        for id in self.parts() {
            if let Some(el) = doc.get_mut(id) {
                let now = el.toggle_class(ACTIVE_CLASS);
                if Some(id) == self.links.as_deref() {
                    open = now;
                }
            }
        }
        open
    }

    pub fn close(&self, doc: &mut Document) {
        for id in self.parts() {
            if let Some(el) = doc.get_mut(id) {
                el.remove_class(ACTIVE_CLASS);
            }
        }
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.links
            .as_deref()
            .and_then(|id| doc.get(id))
            .is_some_and(|el| el.has_class(ACTIVE_CLASS))
    }

    /// Hamburger clicks toggle, link clicks inside the menu close it.
    /// Returns true if the click was the menu's.
    pub fn handle_click(&self, doc: &mut Document, target: &str) -> bool {
        if let Some(hamburger) = &self.hamburger
            && doc.contains(hamburger, target)
        {
            self.toggle(doc);
            return true;
        }
        if let Some(links) = &self.links
            && doc.contains(links, target)
            && doc.closest(target, &Selector::tag("a")).is_some()
        {
            self.close(doc);
            return true;
        }
        false
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        self.links.iter().chain(self.hamburger.iter()).map(String::as_str)
    }
}

/// Smooth scrolling for `a[href^="#"]` links.
#[derive(Debug, Clone, Default)]
pub struct Anchors {
    links: Vec<String>,
}

impl Anchors {
    pub fn attach(&mut self, doc: &Document) -> usize {
        self.links = doc.query_all(&Selector::tag("a").with_attr_prefix("href", "#"));
        self.links.len()
    }

    /// Resolve a click to the anchor it landed on, if any. `None` means the
    /// click is not an in-page link; `Some(None)` means it is but the
    /// target section does not exist.
    pub fn handle_click(&self, doc: &Document, target: &str) -> Option<Option<Effect>> {
        let link = doc.closest(target, &Selector::tag("a"))?;
        if !self.links.contains(&link) {
            return None;
        }

        let href = doc.get(&link)?.get_attr("href")?;
        let id = href.trim_start_matches('#');
        if id.is_empty() || !doc.is_attached(id) {
            log::debug!("anchor: no section for {href}");
            return Some(None);
        }

        Some(Some(Effect::ScrollIntoView {
            id: id.to_string(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }))
    }
}
