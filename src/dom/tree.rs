use std::collections::HashMap;

// ============================================================================
// Arena-backed render tree
// ============================================================================

/// Index of a node inside a [`RenderTree`].
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A file chosen in a file input. The tree keeps selections out of band,
/// the same way a browser keeps `input.files` out of the markup.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBlob {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Synthetic notification queued by UI behaviours (e.g. signature capture).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub target: NodeId,
    pub kind: String,
}

/// Owned, mutable document tree.
///
/// Nodes are never freed: detaching a node only unlinks it from its parent,
/// so handles held by descriptors or snapshots stay valid and can be
/// re-attached later.
#[derive(Debug, Clone)]
pub struct RenderTree {
    slots: Vec<Slot>,
    files: HashMap<NodeId, Vec<FileBlob>>,
    events: Vec<DomEvent>,
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTree {
    /// Empty tree holding only the document node (id 0).
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
            files: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.slots.push(Slot {
            data,
            parent: None,
            children: Vec::new(),
        });
        self.slots.len() - 1
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        self.slots[child].parent = Some(parent);
        self.slots[parent].children.push(child);
    }

    /// Unlink `node` from its parent. The node and its subtree stay in the arena.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.slots[node].parent.take() {
            self.slots[parent].children.retain(|&c| c != node);
        }
    }

    /// Detach and return all children of `node`, in order.
    pub fn take_children(&mut self, node: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.slots[node].children);
        for &c in &children {
            self.slots[c].parent = None;
        }
        children
    }

    /// Replace the children of `node` with `children`.
    pub fn replace_children(&mut self, node: NodeId, children: Vec<NodeId>) {
        self.take_children(node);
        for child in children {
            self.append_child(node, child);
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.slots[node].data
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.slots.get(node)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.slots.get_mut(node)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slots[node].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.slots[node].children
    }

    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
            .collect()
    }

    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = self.slots[node].parent;
        while let Some(p) = current {
            if p == candidate {
                return true;
            }
            current = self.slots[p].parent;
        }
        false
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        node == self.root() || self.is_ancestor(self.root(), node)
    }

    /// Preorder list of `node`'s descendants (excluding `node`).
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn find_first(&self, scope: NodeId, pred: impl Fn(&ElementData) -> bool) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.element(n).is_some_and(&pred))
    }

    pub fn find_all(&self, scope: NodeId, pred: impl Fn(&ElementData) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(&pred))
            .collect()
    }

    pub fn find_by_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.find_first(scope, |el| el.tag == tag)
    }

    pub fn element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.find_first(scope, |el| el.attr("id") == Some(id))
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|&c| self.element(c).is_some())
    }

    // ------------------------------------------------------------------------
    // Element accessors
    // ------------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            match el.attrs.iter().position(|(k, _)| k == name) {
                Some(i) => el.attrs[i].1 = value.to_string(),
                None => el.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element_mut(node) {
            el.attrs.retain(|(k, _)| k != name);
        }
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let joined = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", &joined);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let kept: Vec<String> = self
            .classes(node)
            .into_iter()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        self.set_attr(node, "class", &kept.join(" "));
    }

    /// Set one declaration in the inline `style` attribute, keeping the rest.
    pub fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) {
        let mut decls: Vec<(String, String)> = self
            .attr(node, "style")
            .unwrap_or("")
            .split(';')
            .filter_map(|d| {
                let (k, v) = d.split_once(':')?;
                Some((k.trim().to_string(), v.trim().to_string()))
            })
            .filter(|(k, _)| !k.is_empty() && k != property)
            .collect();
        decls.push((property.to_string(), value.to_string()));
        let style = decls
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node, "style", &style);
    }

    pub fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        self.attr(node, "style")?
            .split(';')
            .filter_map(|d| d.split_once(':'))
            .find(|(k, _)| k.trim() == property)
            .map(|(_, v)| v.trim().to_string())
    }

    // ------------------------------------------------------------------------
    // Form control state
    // ------------------------------------------------------------------------

    /// Current value of a form control: the `value` attribute for inputs,
    /// text content for textareas.
    pub fn value(&self, node: NodeId) -> String {
        match self.tag(node) {
            Some("textarea") => self.text_content(node),
            _ => self.attr(node, "value").unwrap_or("").to_string(),
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        match self.tag(node) {
            Some("textarea") => self.set_text_content(node, value),
            Some(_) => self.set_attr(node, "value", value),
            None => {}
        }
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.has_attr(node, "checked")
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if checked {
            self.set_attr(node, "checked", "");
        } else {
            self.remove_attr(node, "checked");
        }
    }

    pub fn files(&self, node: NodeId) -> &[FileBlob] {
        self.files.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_files(&mut self, node: NodeId, files: Vec<FileBlob>) {
        self.files.insert(node, files);
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    pub fn text_content(&self, node: NodeId) -> String {
        if let NodeData::Text(t) = self.data(node) {
            return t.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match self.data(n) {
                NodeData::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.take_children(node);
        if !text.is_empty() {
            let t = self.create_text(text);
            self.append_child(node, t);
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn dispatch_event(&mut self, target: NodeId, kind: &str) {
        self.events.push(DomEvent {
            target,
            kind: kind.to_string(),
        });
    }

    pub fn drain_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_nodes_keep_their_subtree() {
        let mut tree = RenderTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        tree.append_child(tree.root(), div);
        tree.append_child(div, p);
        assert!(tree.is_attached(p));

        tree.detach(div);
        assert!(!tree.is_attached(p));
        assert_eq!(tree.children(div), &[p]);
    }

    #[test]
    fn style_property_replaces_existing_declaration() {
        let mut tree = RenderTree::new();
        let div = tree.create_element("div");
        tree.set_attr(div, "style", "color: red; display: block");
        tree.set_style_property(div, "display", "none");
        assert_eq!(tree.style_property(div, "display").as_deref(), Some("none"));
        assert_eq!(tree.style_property(div, "color").as_deref(), Some("red"));
    }

    #[test]
    fn class_helpers_are_idempotent() {
        let mut tree = RenderTree::new();
        let span = tree.create_element("span");
        tree.add_class(span, "active");
        tree.add_class(span, "active");
        assert_eq!(tree.attr(span, "class"), Some("active"));
        tree.remove_class(span, "active");
        assert!(!tree.has_class(span, "active"));
    }
}
