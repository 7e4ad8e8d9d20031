use scraper::{Html, Node};

use crate::dom::tree::{NodeId, RenderTree};

/// Parse a full HTML document into a fresh tree. html5ever always
/// synthesizes `<html>`, `<head>` and `<body>`.
pub fn parse_document(html: &str) -> RenderTree {
    let parsed = Html::parse_document(html);
    let mut tree = RenderTree::new();
    let root = tree.root();
    import(&mut tree, root, &parsed, false);
    tree
}

/// Parse `markup` as a body fragment and append the resulting nodes to
/// `parent`. Returns the ids of the new top-level nodes.
pub fn append_fragment(tree: &mut RenderTree, parent: NodeId, markup: &str) -> Vec<NodeId> {
    let parsed = Html::parse_fragment(markup);
    let before = tree.children(parent).len();
    import(tree, parent, &parsed, true);
    tree.children(parent)[before..].to_vec()
}

/// Replace the children of `node` with the parsed `markup`.
pub fn set_inner_html(tree: &mut RenderTree, node: NodeId, markup: &str) -> Vec<NodeId> {
    tree.take_children(node);
    append_fragment(tree, node, markup)
}

fn import(tree: &mut RenderTree, parent: NodeId, parsed: &Html, fragment: bool) {
    let root = parsed.tree.root();

    // Fragment parsing wraps the content in a synthetic <html> element.
    let top: Vec<_> = if fragment {
        root.children()
            .flat_map(|wrapper| match wrapper.value() {
                Node::Element(el) if el.name() == "html" => wrapper.children().collect::<Vec<_>>(),
                _ => vec![wrapper],
            })
            .collect()
    } else {
        root.children().collect()
    };

    let mut stack: Vec<_> = top.into_iter().rev().map(|n| (n, parent)).collect();

    while let Some((source, target_parent)) = stack.pop() {
        let created = match source.value() {
            Node::Element(el) => {
                let id = tree.create_element(el.name());
                for (name, value) in el.attrs() {
                    tree.set_attr(id, name, value);
                }
                Some(id)
            }
            Node::Text(text) => Some(tree.create_text(&text.text)),
            Node::Comment(comment) => Some(tree.create_comment(&comment.comment)),
            // doctype, processing instructions
            _ => None,
        };

        if let Some(id) = created {
            tree.append_child(target_parent, id);
            let children: Vec<_> = source.children().collect();
            stack.extend(children.into_iter().rev().map(|c| (c, id)));
        }
    }
}
