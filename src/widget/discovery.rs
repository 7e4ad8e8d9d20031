use tracing::info;

use crate::dom::page::HostPage;
use crate::error::WidgetError;
use crate::widget::mount::{CancellationToken, WidgetMount};
use crate::widget::variant::WidgetId;

/// Find the first element (document order) carrying a class token that
/// starts with `prefix`, and take the identifier from the token remainder.
///
/// Never mutates the page.
pub fn discover_mount(page: &HostPage, prefix: &str) -> Result<WidgetMount, WidgetError> {
    let tree = &page.tree;

    let found = tree.descendants(tree.root()).into_iter().find_map(|node| {
        tree.classes(node)
            .into_iter()
            .find(|c| c.starts_with(prefix))
            .map(|c| (node, c.to_string()))
    });

    let Some((node, class_token)) = found else {
        info!(prefix, "widget mount not found");
        return Err(WidgetError::MountNotFound {
            prefix: prefix.to_string(),
        });
    };

    let identifier = &class_token[prefix.len()..];
    if identifier.is_empty() {
        info!(class = %class_token, "identifier not found in mount class");
        return Err(WidgetError::EmptyIdentifier { class: class_token });
    }

    Ok(WidgetMount {
        node,
        id: WidgetId(identifier.to_string()),
        class_token: class_token.clone(),
        token: CancellationToken::new(),
    })
}
