//! Transient page notifications.
//!
//! Messages live in one shared `.flash-messages` container at the end of
//! the body. Each one removes itself after its lifetime unless the visitor
//! dismisses it first.

use std::time::{Duration, Instant};

use sitedom::{Document, Element, Selector};

/// Default lifetime of a flash message.
pub const DEFAULT_FLASH_LIFETIME: Duration = Duration::from_secs(5);

/// Class of the shared container.
pub const CONTAINER_CLASS: &str = "flash-messages";

/// Class of one message.
pub const MESSAGE_CLASS: &str = "flash-message";

/// `data-dismiss` value of the close button.
const DISMISS: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Modifier class, `flash-success` or `flash-error`.
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
        }
    }
}

/// A message currently in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    /// ID of the rendered `div.flash-message`.
    pub id: String,
    pub text: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub expires_at: Instant,
}

/// Owns the flash container and the removal deadlines of its messages.
#[derive(Debug, Clone)]
pub struct FlashNotifier {
    container: Option<String>,
    lifetime: Duration,
    active: Vec<FlashMessage>,
}

impl Default for FlashNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_LIFETIME)
    }
}

impl FlashNotifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            container: None,
            lifetime,
            active: Vec::new(),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Adopt a container already present in the markup.
    pub fn attach(&mut self, doc: &Document) {
        self.container = doc.query(&Selector::class(CONTAINER_CLASS));
        self.active.retain(|m| doc.is_attached(&m.id));
        if let Some(id) = &self.container {
            log::debug!("flash: adopted container {id}");
        }
    }

    /// The container's ID, creating it at the end of the body if needed.
    pub fn ensure_container(&mut self, doc: &mut Document) -> String {
        if let Some(id) = self.container.as_ref().filter(|id| doc.is_attached(id)) {
            return id.clone();
        }

        let id = match doc.query(&Selector::class(CONTAINER_CLASS)) {
            Some(existing) => existing,
            None => {
                let body = doc.body_id().to_string();
                let container = Element::div().class(CONTAINER_CLASS);
                let id = container.id.clone();
                doc.append_child(&body, container);
                log::debug!("flash: created container {id}");
                id
            }
        };
        self.container = Some(id.clone());
        id
    }

    /// Show a message now. Returns the message's element ID.
    pub fn notify(
        &mut self,
        doc: &mut Document,
        text: impl Into<String>,
        severity: Severity,
    ) -> String {
        self.notify_at(doc, text, severity, Instant::now())
    }

    /// Show a message created at `now`.
    pub fn notify_at(
        &mut self,
        doc: &mut Document,
        text: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> String {
        let text = text.into();
        let container = self.ensure_container(doc);

        let node = Element::div()
            .class(MESSAGE_CLASS)
            .class(severity.class())
            .child(Element::new("span").class("flash-text").child(Element::text(text.clone())))
            .child(
                Element::button("\u{00d7}")
                    .attr("type", "button")
                    .data("dismiss", DISMISS),
            );
        let id = node.id.clone();
        doc.append_child(&container, node);

        log::info!("flash ({severity:?}): {text}");
        self.active.push(FlashMessage {
            id: id.clone(),
            text,
            severity,
            created_at: now,
            expires_at: now + self.lifetime,
        });
        id
    }

    /// Remove a message early. Returns false if it was already gone.
    pub fn dismiss(&mut self, doc: &mut Document, id: &str) -> bool {
        let Some(index) = self.active.iter().position(|m| m.id == id) else {
            return false;
        };
        self.active.remove(index);
        doc.remove(id).is_some()
    }

    /// Handle a click anywhere in the page. Returns true if it hit a
    /// message's close button.
    pub fn handle_click(&mut self, doc: &mut Document, target: &str) -> bool {
        let close = Selector::tag("button").with_attr("data-dismiss");
        let Some(button) = doc.closest(target, &close) else {
            return false;
        };
        if doc
            .get(&button)
            .and_then(|el| el.get_data("dismiss"))
            .is_none_or(|v| v != DISMISS)
        {
            return false;
        }
        match doc.closest(&button, &Selector::class(MESSAGE_CLASS)) {
            Some(message) => self.dismiss(doc, &message),
            None => false,
        }
    }

    /// Remove every message whose deadline has passed. Returns how many
    /// were removed from the page.
    pub fn expire(&mut self, doc: &mut Document, now: Instant) -> usize {
        let (due, keep): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|m| m.expires_at <= now);
        self.active = keep;

        let mut removed = 0;
        for message in &due {
            // Already dismissed or detached with its container.
            if doc.remove(&message.id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Earliest pending removal.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().map(|m| m.expires_at).min()
    }

    /// Messages still tracked, oldest first.
    pub fn active(&self) -> &[FlashMessage] {
        &self.active
    }

    /// `(text, severity)` of the messages still in the page, oldest first.
    pub fn visible(&self, doc: &Document) -> Vec<(String, Severity)> {
        self.active
            .iter()
            .filter(|m| doc.is_attached(&m.id))
            .map(|m| (m.text.clone(), m.severity))
            .collect()
    }
}
