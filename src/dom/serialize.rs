use crate::dom::tree::{NodeData, NodeId, RenderTree};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize the children of `node`.
pub fn inner_html(tree: &RenderTree, node: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(node) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Serialize `node` itself, including its own tag.
pub fn outer_html(tree: &RenderTree, node: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, node, &mut out);
    out
}

fn write_node(tree: &RenderTree, node: NodeId, out: &mut String) {
    match tree.data(node) {
        NodeData::Document => {
            out.push_str("<!DOCTYPE html>");
            for &child in tree.children(node) {
                write_node(tree, child, out);
            }
        }
        NodeData::Text(text) => {
            let raw = tree
                .parent(node)
                .and_then(|p| tree.tag(p))
                .is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
            if raw {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            for &child in tree.children(node) {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut tree = RenderTree::new();
        let p = tree.create_element("p");
        tree.set_attr(p, "title", "a \"quoted\" <b>");
        let t = tree.create_text("1 < 2 & 3");
        tree.append_child(p, t);
        assert_eq!(
            outer_html(&tree, p),
            "<p title=\"a &quot;quoted&quot; &lt;b&gt;\">1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut tree = RenderTree::new();
        let input = tree.create_element("input");
        tree.set_attr(input, "type", "text");
        assert_eq!(outer_html(&tree, input), "<input type=\"text\">");
    }
}
