//! Modal dialogs addressed by element ID.

use sitedom::Document;

/// Class of a modal's backdrop element.
pub const MODAL_CLASS: &str = "modal";

/// Show the modal and lock page scrolling. Unknown IDs are ignored.
pub fn open_modal(doc: &mut Document, id: &str) -> bool {
    let Some(modal) = doc.get_mut(id) else {
        log::debug!("modal: no element {id}");
        return false;
    };
    modal.set_style("display", "block");
    doc.body_mut().set_style("overflow", "hidden");
    true
}

/// Hide the modal and unlock page scrolling. Unknown IDs are ignored.
pub fn close_modal(doc: &mut Document, id: &str) -> bool {
    let Some(modal) = doc.get_mut(id) else {
        log::debug!("modal: no element {id}");
        return false;
    };
    modal.set_style("display", "none");
    doc.body_mut().set_style("overflow", "auto");
    true
}

/// A click landing on a modal's backdrop itself closes it; clicks on the
/// dialog content do not.
pub fn handle_click(doc: &mut Document, target: &str) -> bool {
    let is_backdrop = doc.get(target).is_some_and(|el| el.has_class(MODAL_CLASS));
    is_backdrop && close_modal(doc, target)
}

pub fn is_open(doc: &Document, id: &str) -> bool {
    doc.get(id)
        .is_some_and(|el| el.get_style("display") == Some("block"))
}
