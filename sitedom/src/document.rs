//! Owned page tree with lookup and mutation helpers.

use crate::element::{collect_ids, find_element, find_element_mut, find_parent, Content, Element};
use crate::selector::Selector;

/// A page: a `body` element and everything under it.
///
/// Elements are addressed by ID. Handlers resolve the IDs they care about
/// once and keep them; every lookup tolerates the element having gone away.
#[derive(Debug, Clone)]
pub struct Document {
    body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Element::body())
    }
}

impl Document {
    /// Wrap a tree. A root that is not a `body` gets wrapped in one.
    pub fn new(root: Element) -> Self {
        let body = if root.tag == "body" {
            root
        } else {
            Element::body().child(root)
        };
        Self { body }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    pub fn body_id(&self) -> &str {
        &self.body.id
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.body, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.body, id)
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First element matching the selector, in document order.
    pub fn query(&self, selector: &Selector) -> Option<String> {
        self.query_all(selector).into_iter().next()
    }

    pub fn query_all(&self, selector: &Selector) -> Vec<String> {
        collect_ids(&self.body, &|el| selector.matches(el))
    }

    /// Matching descendants of `scope` (the scope itself excluded).
    pub fn query_within(&self, scope: &str, selector: &Selector) -> Vec<String> {
        let Some(root) = self.get(scope) else {
            return Vec::new();
        };
        collect_ids(root, &|el| el.id != scope && selector.matches(el))
    }

    pub fn parent_id(&self, id: &str) -> Option<String> {
        find_parent(&self.body, id).map(|(parent, _)| parent.id.clone())
    }

    pub fn next_sibling_id(&self, id: &str) -> Option<String> {
        let (parent, index) = find_parent(&self.body, id)?;
        parent.child_elements().get(index + 1).map(|el| el.id.clone())
    }

    /// Whether `id` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: &str, id: &str) -> bool {
        self.get(ancestor)
            .is_some_and(|root| find_element(root, id).is_some())
    }

    /// Nearest inclusive ancestor of `id` matching the selector.
    pub fn closest(&self, id: &str, selector: &Selector) -> Option<String> {
        let mut current = id.to_string();
        loop {
            if selector.matches(self.get(&current)?) {
                return Some(current);
            }
            current = self.parent_id(&current)?;
        }
    }

    /// Append a child to `parent`. Returns the child's ID.
    pub fn append_child(&mut self, parent: &str, child: Element) -> Option<String> {
        let parent = self.get_mut(parent)?;
        let id = child.id.clone();
        parent.push_child(child);
        Some(id)
    }

    /// Insert `element` directly after `reference` among its siblings.
    /// Returns the new element's ID.
    pub fn insert_after(&mut self, reference: &str, element: Element) -> Option<String> {
        let parent_id = self.parent_id(reference)?;
        let parent = self.get_mut(&parent_id)?;
        let Content::Children(children) = &mut parent.content else {
            return None;
        };
        let index = children.iter().position(|c| c.id == reference)?;
        let id = element.id.clone();
        children.insert(index + 1, element);
        Some(id)
    }

    /// Detach an element (and its subtree). The body cannot be removed.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let parent_id = self.parent_id(id)?;
        let parent = self.get_mut(&parent_id)?;
        let Content::Children(children) = &mut parent.content else {
            return None;
        };
        let index = children.iter().position(|c| c.id == id)?;
        Some(children.remove(index))
    }

    /// Set a form control's value. Returns false if the element is missing.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.get(id).map(|el| el.value.as_str())
    }
}
