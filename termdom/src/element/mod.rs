mod content;
mod node;

pub use content::{Content, ShadowRoot};
pub use node::{Element, SCOPE_SEPARATOR};

/// Children of `element` in composed order: shadow tree first, then light
/// children. Slotted light children are rendered through the slot but are
/// still owned by the host.
fn composed_children(element: &Element) -> impl Iterator<Item = &Element> {
    element
        .shadow
        .iter()
        .flat_map(|shadow| shadow.children.iter())
        .chain(element.light_children())
}

/// Find an element by ID in the tree, including shadow trees.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    composed_children(root).find_map(|child| find_element(child, id))
}

/// Mutable variant of [`find_element`].
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Some(shadow) = &mut root.shadow {
        for child in &mut shadow.children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
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

/// Ancestors of the element with `id`, from `root` down to its parent.
/// Returns `None` when the element is not in the tree.
pub fn ancestors<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    fn walk<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
        if element.id == id {
            return true;
        }
        path.push(element);
        if composed_children(element).any(|child| walk(child, id, path)) {
            return true;
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// Ids of the ancestors of `id` that belong to the same tree as it.
///
/// The walk stops at a shadow boundary: elements inside a shadow tree are
/// not descendants of their host in the light tree.
pub fn tree_ancestor_ids(root: &Element, id: &str) -> Option<Vec<String>> {
    fn walk(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
        if element.id == id {
            return true;
        }

        if let Some(shadow) = &element.shadow {
            let mut inner = Vec::new();
            if shadow.children.iter().any(|c| walk(c, id, &mut inner)) {
                *path = inner;
                return true;
            }
        }

        path.push(element.id.clone());
        if element.light_children().iter().any(|c| walk(c, id, path)) {
            return true;
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// Detach the element with `id` from the tree. Returns the id of its former
/// parent along with the element.
pub fn take_element(root: &mut Element, id: &str) -> Option<(String, Element)> {
    if let Some(shadow) = &mut root.shadow {
        if let Some(index) = shadow.children.iter().position(|c| c.id == id) {
            return Some((root.id.clone(), shadow.children.remove(index)));
        }
        for child in &mut shadow.children {
            if let Some(found) = take_element(child, id) {
                return Some(found);
            }
        }
    }

    if let Content::Children(children) = &mut root.content {
        if let Some(index) = children.iter().position(|c| c.id == id) {
            return Some((root.id.clone(), children.remove(index)));
        }
        for child in children {
            if let Some(found) = take_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Visit `element` and all of its descendants in composed tree order.
pub fn walk<'a>(element: &'a Element, visit: &mut impl FnMut(&'a Element)) {
    visit(element);
    for child in composed_children(element) {
        walk(child, visit);
    }
}

/// Ids of `element` and every descendant, in composed tree order.
pub fn collect_ids(element: &Element) -> Vec<String> {
    let mut ids = Vec::new();
    walk(element, &mut |e| ids.push(e.id.clone()));
    ids
}

/// Prefix every id in a shadow tree with its host's id.
pub fn scope_ids(children: &mut [Element], host: &str) {
    fn scope(element: &mut Element, host: &str) {
        element.id = format!("{host}{SCOPE_SEPARATOR}{}", element.local_id());
        if let Content::Children(children) = &mut element.content {
            for child in children {
                scope(child, host);
            }
        }
    }

    for child in children {
        scope(child, host);
    }
}
