use crate::dom::tree::{NodeId, RenderTree};

// ============================================================================
// Structured element builder
// ============================================================================

/// Detached element/text tree built programmatically. Text is stored
/// verbatim and only escaped on serialization, so nothing built here can
/// smuggle markup into the page.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

impl HtmlNode {
    pub fn element(tag: &str) -> Self {
        HtmlNode::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        HtmlNode::Text(text.into())
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let HtmlNode::Element { attrs, .. } = &mut self {
            attrs.push((name.to_string(), value.into()));
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        self.attr("style", style)
    }

    pub fn child(mut self, node: HtmlNode) -> Self {
        if let HtmlNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn child_if(self, cond: bool, node: impl FnOnce() -> HtmlNode) -> Self {
        if cond { self.child(node()) } else { self }
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = HtmlNode>) -> Self {
        if let HtmlNode::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { tag, .. } => Some(tag),
            HtmlNode::Text(_) => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            HtmlNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            HtmlNode::Text(_) => None,
        }
    }

    /// Preorder walk over every node in this subtree.
    pub fn walk(&self) -> Vec<&HtmlNode> {
        let mut out = vec![self];
        if let HtmlNode::Element { children, .. } = self {
            for c in children {
                out.extend(c.walk());
            }
        }
        out
    }

    /// Materialize this subtree under `parent`, returning the new node id.
    pub fn append_to(&self, tree: &mut RenderTree, parent: NodeId) -> NodeId {
        let id = match self {
            HtmlNode::Text(text) => tree.create_text(text),
            HtmlNode::Element {
                tag,
                attrs,
                children,
            } => {
                let id = tree.create_element(tag);
                for (k, v) in attrs {
                    tree.set_attr(id, k, v);
                }
                for c in children {
                    c.append_to(tree, id);
                }
                id
            }
        };
        tree.append_child(parent, id);
        id
    }
}
