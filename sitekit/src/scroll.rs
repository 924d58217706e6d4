//! Scroll-position effects: hero parallax and the scroll-to-top button.

use sitedom::{Document, Selector};

use crate::effect::{Effect, ScrollBehavior};
use crate::format::number;

pub const HERO_CLASS: &str = "hero";
pub const SCROLL_TOP_CLASS: &str = "scroll-to-top";

#[derive(Debug, Clone)]
pub struct Parallax {
    hero: Option<String>,
    rate: f64,
}

impl Parallax {
    pub fn new(rate: f64) -> Self {
        Self { hero: None, rate }
    }

    pub fn attach(&mut self, doc: &Document) {
        self.hero = doc.query(&Selector::class(HERO_CLASS));
    }

    pub fn on_scroll(&self, doc: &mut Document, offset_y: f64) {
        let Some(hero) = self.hero.as_deref().and_then(|id| doc.get_mut(id)) else {
            return;
        };
        let shift = number(offset_y * self.rate);
        hero.set_style("transform", format!("translateY({shift}px)"));
    }
}

/// Shows the button once the page is scrolled far enough.
#[derive(Debug, Clone)]
pub struct ScrollToTop {
    button: Option<String>,
    threshold: f64,
}

impl ScrollToTop {
    pub fn new(threshold: f64) -> Self {
        Self {
            button: None,
            threshold,
        }
    }

    pub fn attach(&mut self, doc: &Document) {
        self.button = doc.query(&Selector::class(SCROLL_TOP_CLASS));
    }

    pub fn on_scroll(&self, doc: &mut Document, offset_y: f64) {
        let Some(button) = self.button.as_deref().and_then(|id| doc.get_mut(id)) else {
            return;
        };
        let display = if offset_y > self.threshold { "block" } else { "none" };
        button.set_style("display", display);
    }

    /// Clicking the button (or anything inside it) scrolls home.
    pub fn handle_click(&self, doc: &Document, target: &str) -> Option<Effect> {
        let button = self.button.as_deref()?;
        doc.contains(button, target).then(scroll_to_top)
    }
}

/// Smoothly scroll the window back to the top.
pub fn scroll_to_top() -> Effect {
    Effect::ScrollTo {
        top: 0.0,
        behavior: ScrollBehavior::Smooth,
    }
}
