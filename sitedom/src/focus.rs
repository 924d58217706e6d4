use crate::document::Document;
use crate::element::{collect_ids, Element};
use crate::event::Event;

/// Tracks which element is currently focused and produces focus events.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Move focus to an element.
    /// Returns the Blur/Focus events the change produces (empty if unchanged).
    pub fn focus(&mut self, id: &str) -> Vec<Event> {
        if self.focused.as_deref() == Some(id) {
            return Vec::new();
        }

        let mut events = Vec::new();
        if let Some(old) = self.focused.take() {
            events.push(Event::Blur {
                target: old,
                new_target: Some(id.to_string()),
            });
        }
        self.focused = Some(id.to_string());
        events.push(Event::Focus {
            target: id.to_string(),
        });
        events
    }

    /// Clear focus.
    /// Returns the Blur event if something was focused.
    pub fn blur(&mut self) -> Option<Event> {
        self.focused.take().map(|old| Event::Blur {
            target: old,
            new_target: None,
        })
    }

    /// Focus the next focusable element (Tab navigation).
    pub fn focus_next(&mut self, doc: &Document) -> Vec<Event> {
        let focusable = collect_focusable(doc.body());
        if focusable.is_empty() {
            return Vec::new();
        }

        let new_focus = match &self.focused {
            None => focusable[0].clone(),
            Some(current) => {
                let idx = focusable.iter().position(|id| id == current);
                match idx {
                    Some(i) => focusable[(i + 1) % focusable.len()].clone(),
                    None => focusable[0].clone(),
                }
            }
        };

        self.focus(&new_focus)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    pub fn focus_prev(&mut self, doc: &Document) -> Vec<Event> {
        let focusable = collect_focusable(doc.body());
        if focusable.is_empty() {
            return Vec::new();
        }

        let new_focus = match &self.focused {
            None => focusable[focusable.len() - 1].clone(),
            Some(current) => {
                let idx = focusable.iter().position(|id| id == current);
                match idx {
                    Some(0) | None => focusable[focusable.len() - 1].clone(),
                    Some(i) => focusable[i - 1].clone(),
                }
            }
        };

        self.focus(&new_focus)
    }

    /// Drop focus if the focused element is no longer in the document.
    pub fn forget_detached(&mut self, doc: &Document) {
        if let Some(id) = &self.focused {
            if !doc.is_attached(id) {
                log::debug!("[focus] focused element {} detached", id);
                self.focused = None;
            }
        }
    }
}

/// IDs of focusable elements in tab order: enabled form controls, buttons and links.
pub fn collect_focusable(root: &Element) -> Vec<String> {
    collect_ids(root, &|el| {
        let focusable = el.is_form_control()
            || el.tag == "button"
            || (el.tag == "a" && el.has_attr("href"));
        focusable && !el.is_disabled() && el.control_type() != "hidden"
    })
}
