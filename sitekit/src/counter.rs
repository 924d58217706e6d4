//! Count-up animation for statistic figures.
//!
//! Each frame adds `target / (duration / frame)` and shows the floor of the
//! running value. The last frame shows the exact target.

use std::time::Duration;

use sitedom::Document;

use crate::format::number;

/// One running count-up.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    element: String,
    target: f64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(element: impl Into<String>, target: f64, duration: Duration, frame: Duration) -> Self {
        let frames = duration.as_nanos() as f64 / frame.as_nanos().max(1) as f64;
        Self {
            element: element.into(),
            target,
            increment: target / frames,
            current: 0.0,
            finished: false,
        }
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one frame and write the displayed value. Returns false once
    /// finished or if the element is gone.
    pub fn step(&mut self, doc: &mut Document) -> bool {
        if self.finished {
            return false;
        }
        let Some(el) = doc.get_mut(&self.element) else {
            self.finished = true;
            return false;
        };

        self.current += self.increment;
        if self.current < self.target {
            el.set_text(number(self.current.floor()));
            true
        } else {
            el.set_text(number(self.target));
            self.finished = true;
            false
        }
    }
}

/// Every counter currently animating on the page.
#[derive(Debug, Clone)]
pub struct Counters {
    running: Vec<CounterAnimation>,
    frame: Duration,
}

impl Counters {
    pub fn new(frame: Duration) -> Self {
        Self {
            running: Vec::new(),
            frame,
        }
    }

    /// Start counting `element` up to `target`. The first frame is drawn
    /// immediately. Returns false if the element does not exist.
    pub fn start(&mut self, doc: &mut Document, element: &str, target: f64, duration: Duration) -> bool {
        if !doc.is_attached(element) {
            log::debug!("counter: no element {element}");
            return false;
        }
        self.running.retain(|c| c.element() != element);

        let mut counter = CounterAnimation::new(element, target, duration, self.frame);
        if counter.step(doc) {
            self.running.push(counter);
        }
        true
    }

    /// Advance every counter one frame. Returns how many are still running.
    pub fn frame(&mut self, doc: &mut Document) -> usize {
        self.running.retain_mut(|c| c.step(doc));
        self.running.len()
    }

    pub fn is_active(&self) -> bool {
        !self.running.is_empty()
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use sitedom::Element;

    use super::*;

    #[test]
    fn test_counts_up_in_whole_steps() {
        let mut doc = Document::new(Element::new("span").id("stat"));
        let mut counters = Counters::new(Duration::from_millis(16));

        // 160ms at 16ms per frame: ten frames of 10.
        assert!(counters.start(&mut doc, "stat", 100.0, Duration::from_millis(160)));
        assert_eq!(doc.get("stat").unwrap().text_content(), "10");

        let mut frames = 1;
        while counters.frame(&mut doc) > 0 {
            frames += 1;
            let shown: f64 = doc.get("stat").unwrap().text_content().parse().unwrap();
            assert!(shown <= 100.0);
        }
        assert_eq!(doc.get("stat").unwrap().text_content(), "100");
        assert!((9..=11).contains(&frames), "{frames}");
    }

    #[test]
    fn test_fractional_increment_is_floored() {
        let mut doc = Document::new(Element::new("span").id("stat"));
        let mut counter = CounterAnimation::new(
            "stat",
            5.0,
            Duration::from_millis(32),
            Duration::from_millis(16),
        );
        assert!(counter.step(&mut doc));
        assert_eq!(doc.get("stat").unwrap().text_content(), "2");
        assert!(!counter.step(&mut doc));
        assert_eq!(doc.get("stat").unwrap().text_content(), "5");
    }

    #[test]
    fn test_zero_target_finishes_at_once() {
        let mut doc = Document::new(Element::new("span").id("stat"));
        let mut counters = Counters::new(Duration::from_millis(16));
        assert!(counters.start(&mut doc, "stat", 0.0, Duration::from_secs(2)));
        assert!(!counters.is_active());
        assert_eq!(doc.get("stat").unwrap().text_content(), "0");
    }

    #[test]
    fn test_missing_element() {
        let mut doc = Document::default();
        let mut counters = Counters::new(Duration::from_millis(16));
        assert!(!counters.start(&mut doc, "nope", 10.0, Duration::from_secs(1)));
    }
}
