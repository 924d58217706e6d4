//! Visibility-driven behaviors: card reveal animation and lazy images.
//!
//! The host reports visibility through `Event::Intersect` for the elements
//! listed by `observed()`.

use sitedom::{Document, Selector};

/// Classes of the cards animated in on first sight.
pub const CARD_CLASSES: [&str; 4] = ["company-card", "service-card", "news-card", "value-card"];

/// Fades cards in once enough of them is on screen.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    observed: Vec<String>,
    threshold: f64,
    animation: String,
}

impl ScrollReveal {
    pub fn new(threshold: f64, animation: impl Into<String>) -> Self {
        Self {
            observed: Vec::new(),
            threshold,
            animation: animation.into(),
        }
    }

    pub fn attach(&mut self, doc: &Document) -> usize {
        self.observed = doc.query_all(&Selector::any_class(CARD_CLASSES));
        self.observed.len()
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    /// Returns true if the element was animated.
    pub fn on_intersect(&self, doc: &mut Document, target: &str, ratio: f64) -> bool {
        if ratio < self.threshold || !self.observed.iter().any(|id| id == target) {
            return false;
        }
        match doc.get_mut(target) {
            Some(card) => {
                card.set_style("animation", self.animation.clone());
                true
            }
            None => false,
        }
    }
}

/// Class removed from an image once its real source is set.
pub const LAZY_CLASS: &str = "lazy";

/// Swaps `data-src` into `src` the first time an image becomes visible.
#[derive(Debug, Clone, Default)]
pub struct LazyImages {
    pending: Vec<String>,
}

impl LazyImages {
    pub fn attach(&mut self, doc: &Document) -> usize {
        self.pending = doc.query_all(&Selector::tag("img").with_attr("data-src"));
        self.pending.len()
    }

    /// Images still waiting to load.
    pub fn observed(&self) -> &[String] {
        &self.pending
    }

    /// Load the image if it is pending and visible at all. Returns true if
    /// it was loaded.
    pub fn on_intersect(&mut self, doc: &mut Document, target: &str, ratio: f64) -> bool {
        if ratio <= 0.0 {
            return false;
        }
        let Some(index) = self.pending.iter().position(|id| id == target) else {
            return false;
        };
        self.pending.remove(index);

        let Some(img) = doc.get_mut(target) else {
            return false;
        };
        let Some(src) = img.get_data("src").cloned() else {
            return false;
        };
        img.set_attr("src", src);
        img.remove_class(LAZY_CLASS);
        log::debug!("lazy image {target} loaded");
        true
    }
}
