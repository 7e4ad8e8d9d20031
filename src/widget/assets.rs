use tracing::{debug, error};

use crate::dom::page::HostPage;
use crate::error::WidgetError;
use crate::host::HostEnvironment;
use crate::widget::variant::{ScriptAsset, ScriptMode};

/// Append `<link rel="stylesheet" href=...>` to the head unless one with the
/// same href is already present. Returns whether a tag was added.
pub fn inject_stylesheet(page: &mut HostPage, href: &str) -> bool {
    let head = page.head();
    let exists = page
        .tree
        .find_first(head, |el| el.tag == "link" && el.attr("href") == Some(href))
        .is_some();
    if exists {
        debug!(href, "stylesheet already present");
        return false;
    }

    let link = page.tree.create_element("link");
    page.tree.set_attr(link, "rel", "stylesheet");
    page.tree.set_attr(link, "href", href);
    page.tree.append_child(head, link);
    true
}

/// Append a `<script>` tag to the head unless one with the same src exists.
pub fn inject_script(page: &mut HostPage, asset: &ScriptAsset) -> bool {
    let head = page.head();
    let exists = page
        .tree
        .find_first(head, |el| el.tag == "script" && el.attr("src") == Some(asset.src.as_str()))
        .is_some();
    if exists {
        debug!(src = %asset.src, "script already present");
        return false;
    }

    let script = page.tree.create_element("script");
    page.tree.set_attr(script, "src", &asset.src);
    match asset.mode {
        ScriptMode::Deferred => page.tree.set_attr(script, "defer", ""),
        ScriptMode::Immediate => page.tree.set_attr(script, "async", ""),
    }
    page.tree.set_attr(script, "charset", "UTF-8");
    page.tree.append_child(head, script);
    true
}

/// Wait for an injected script. Deferred scripts gate widget activation and
/// their failure halts the pipeline; immediate ones are only logged.
pub fn await_script(host: &mut dyn HostEnvironment, asset: &ScriptAsset) -> Result<(), WidgetError> {
    match host.load_script(&asset.src) {
        Ok(()) => {
            debug!(src = %asset.src, "script loaded");
            Ok(())
        }
        Err(reason) => {
            error!(src = %asset.src, %reason, "failed to load script");
            match asset.mode {
                ScriptMode::Deferred => Err(WidgetError::AssetLoad {
                    src: asset.src.clone(),
                    reason,
                }),
                ScriptMode::Immediate => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_injection_is_idempotent() {
        let mut page = HostPage::parse("<html><head></head><body></body></html>", "https://host.test/").unwrap();
        assert!(inject_stylesheet(&mut page, "https://cdn.test/style.css"));
        assert!(!inject_stylesheet(&mut page, "https://cdn.test/style.css"));

        let head = page.head();
        let links = page.tree.find_all(head, |el| el.tag == "link");
        assert_eq!(links.len(), 1);
    }
}
