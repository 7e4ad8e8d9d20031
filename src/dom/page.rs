use url::Url;

use crate::dom::parse::parse_document;
use crate::dom::serialize::outer_html;
use crate::dom::tree::{NodeId, RenderTree};
use crate::error::WidgetError;

/// The host page a widget is embedded in: its document tree and location.
#[derive(Debug, Clone)]
pub struct HostPage {
    pub tree: RenderTree,
    pub url: Url,
}

impl HostPage {
    pub fn parse(html: &str, url: &str) -> Result<Self, WidgetError> {
        let url = Url::parse(url).map_err(|e| WidgetError::Config(format!("invalid page url '{}': {}", url, e)))?;
        Ok(Self {
            tree: parse_document(html),
            url,
        })
    }

    pub fn head(&mut self) -> NodeId {
        self.ensure_section("head")
    }

    pub fn body(&mut self) -> NodeId {
        self.ensure_section("body")
    }

    fn ensure_section(&mut self, tag: &str) -> NodeId {
        let root = self.tree.root();
        if let Some(node) = self.tree.find_by_tag(root, tag) {
            return node;
        }
        let html = match self.tree.find_by_tag(root, "html") {
            Some(html) => html,
            None => {
                let html = self.tree.create_element("html");
                self.tree.append_child(root, html);
                html
            }
        };
        let node = self.tree.create_element(tag);
        self.tree.append_child(html, node);
        node
    }

    /// Raw query string of the page location, if non-empty.
    pub fn query(&self) -> Option<&str> {
        self.url.query().filter(|q| !q.is_empty())
    }

    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn to_html(&self) -> String {
        outer_html(&self.tree, self.tree.root())
    }
}
