//! Dark mode with a persisted preference.

use sitedom::Document;

use crate::settings::SettingsProvider;

/// Class on `body` while dark mode is on.
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Debug, Clone)]
pub struct DarkMode {
    settings: SettingsProvider,
    key: String,
}

impl DarkMode {
    pub fn new(settings: SettingsProvider, key: impl Into<String>) -> Self {
        Self {
            settings,
            key: key.into(),
        }
    }

    /// Whether the stored flag is exactly `"true"`. Unreadable storage
    /// counts as off.
    pub fn stored(&self) -> bool {
        match self.settings.get_raw(&self.key) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("dark mode: could not read preference: {e}");
                false
            }
        }
    }

    /// Apply the stored preference to the page.
    pub fn restore(&self, doc: &mut Document) -> bool {
        let on = self.stored();
        if on {
            doc.body_mut().add_class(DARK_MODE_CLASS);
        }
        on
    }

    /// Flip the page and persist the new state. Returns whether dark mode
    /// is now on.
    pub fn toggle(&self, doc: &mut Document) -> bool {
        let on = doc.body_mut().toggle_class(DARK_MODE_CLASS);
        if let Err(e) = self.settings.set(&self.key, &on) {
            log::warn!("dark mode: could not save preference: {e}");
        }
        on
    }

    pub fn is_on(doc: &Document) -> bool {
        doc.body().has_class(DARK_MODE_CLASS)
    }
}
