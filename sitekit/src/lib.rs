pub mod clipboard;
pub mod config;
pub mod contact;
pub mod counter;
pub mod effect;
pub mod flash;
pub mod format;
pub mod modal;
pub mod nav;
pub mod reveal;
pub mod runtime;
pub mod scroll;
pub mod settings;
pub mod theme;
pub mod validation;

pub use config::SiteConfig;
pub use runtime::{Dispatch, EventLoop, Page, Services};

pub mod prelude {
    pub use crate::clipboard::{Clipboard, ClipboardError, MemoryClipboard};
    pub use crate::config::{Messages, SiteConfig};
    pub use crate::contact::{Outcome, PendingSubmission, SubmissionState, SubmitAction};
    pub use crate::effect::{Effect, ScrollBehavior, ScrollBlock};
    pub use crate::flash::{FlashMessage, FlashNotifier, Severity};
    pub use crate::format::{FormatError, format_date};
    pub use crate::runtime::{Dispatch, EventLoop, Page, Services};
    pub use crate::settings::{FileBackend, MemoryBackend, SettingsBackend, SettingsProvider};
    pub use crate::validation::{Field, FieldKind, FormValidationController, Rules, Verdict, validate};

    pub use sitedom::{Document, Element, Event, Selector};
}
