mod content;
mod node;

pub use content::Content;
pub use node::{Element, TEXT_TAG};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find the parent of the element with the given ID.
/// Returns the parent and the child's index within it.
pub fn find_parent<'a>(root: &'a Element, id: &str) -> Option<(&'a Element, usize)> {
    if let Content::Children(children) = &root.content {
        if let Some(index) = children.iter().position(|c| c.id == id) {
            return Some((root, index));
        }
        for child in children {
            if let Some(found) = find_parent(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect the IDs of all elements matching `predicate`, in document order.
pub fn collect_ids(root: &Element, predicate: &dyn Fn(&Element) -> bool) -> Vec<String> {
    let mut ids = Vec::new();
    collect_ids_recursive(root, predicate, &mut ids);
    ids
}

fn collect_ids_recursive(
    element: &Element,
    predicate: &dyn Fn(&Element) -> bool,
    ids: &mut Vec<String>,
) {
    if predicate(element) {
        ids.push(element.id.clone());
    }

    if let Content::Children(children) = &element.content {
        for child in children {
            collect_ids_recursive(child, predicate, ids);
        }
    }
}
