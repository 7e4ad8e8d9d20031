use crate::dom::builder::HtmlNode;
use crate::dom::tree::{NodeId, RenderTree};

const BLOCKED_ELEMENTS: &[&str] = &["script", "iframe", "object", "embed", "frame", "frameset"];
const URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "formaction", "xlink:href"];

fn is_blocked_attr(name: &str, value: &str) -> bool {
    let name = name.to_ascii_lowercase();
    if name.starts_with("on") {
        return true;
    }
    if URL_ATTRIBUTES.contains(&name.as_str()) {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .collect::<String>()
            .to_ascii_lowercase();
        return compact.starts_with("javascript:") || compact.starts_with("vbscript:");
    }
    false
}

/// Strip executable content from a built fragment.
pub fn sanitize_fragment(node: HtmlNode) -> Option<HtmlNode> {
    match node {
        HtmlNode::Text(_) => Some(node),
        HtmlNode::Element {
            tag,
            attrs,
            children,
        } => {
            if BLOCKED_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str()) {
                return None;
            }
            Some(HtmlNode::Element {
                tag,
                attrs: attrs
                    .into_iter()
                    .filter(|(k, v)| !is_blocked_attr(k, v))
                    .collect(),
                children: children.into_iter().filter_map(sanitize_fragment).collect(),
            })
        }
    }
}

/// Strip executable content from the subtree under `scope` in place.
/// Returns how many elements and attributes were removed.
pub fn sanitize_subtree(tree: &mut RenderTree, scope: NodeId) -> usize {
    let mut removed = 0;

    for node in tree.descendants(scope) {
        let Some(el) = tree.element(node) else {
            continue;
        };
        if BLOCKED_ELEMENTS.contains(&el.tag.as_str()) {
            tree.detach(node);
            removed += 1;
            continue;
        }
        let blocked: Vec<String> = el
            .attrs
            .iter()
            .filter(|(k, v)| is_blocked_attr(k, v))
            .map(|(k, _)| k.clone())
            .collect();
        for name in blocked {
            tree.remove_attr(node, &name);
            removed += 1;
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse::append_fragment;
    use crate::dom::serialize::inner_html;

    #[test]
    fn drops_scripts_handlers_and_js_urls() {
        let mut tree = RenderTree::new();
        let host = tree.create_element("div");
        tree.append_child(tree.root(), host);
        append_fragment(
            &mut tree,
            host,
            "<a href=\" javascript:alert(1)\" onclick=\"x()\">hi</a><script>bad()</script>",
        );

        let removed = sanitize_subtree(&mut tree, host);
        assert_eq!(removed, 3);
        assert_eq!(inner_html(&tree, host), "<a>hi</a>");
    }

    #[test]
    fn fragment_keeps_safe_links() {
        let node = HtmlNode::element("a").attr("href", "https://example.com").child(HtmlNode::text("ok"));
        assert_eq!(sanitize_fragment(node.clone()), Some(node));
    }
}
