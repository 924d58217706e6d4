pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod selector;

pub use document::Document;
pub use element::{Content, Element};
pub use event::Event;
pub use focus::{collect_focusable, FocusState};
pub use selector::{Selector, SelectorError};
