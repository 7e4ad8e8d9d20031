use tracing::debug;

use crate::dom::tree::{NodeId, RenderTree};
use crate::form::descriptor::{FieldDescriptor, FieldKind};

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Kind-specific presence test used for required fields.
pub fn has_value(tree: &RenderTree, kind: &FieldKind) -> bool {
    match kind {
        FieldKind::File { input } => !tree.files(*input).is_empty(),
        FieldKind::Choice { options, .. }
        | FieldKind::MultipleChoice { options, .. }
        | FieldKind::Scale { options, .. } => options.iter().any(|&o| tree.is_checked(o)),
        FieldKind::Consent { checkbox, .. } => tree.is_checked(*checkbox),
        FieldKind::Signature { hidden, .. } => !tree.value(*hidden).trim().is_empty(),
        FieldKind::Text { input } | FieldKind::Email { input } | FieldKind::TextArea { input } => {
            !tree.value(*input).trim().is_empty()
        }
    }
}

/// Element that shows a field's inline error: the element right after the
/// field (or its group/block), unless that element is another control.
pub fn error_display(tree: &RenderTree, field: &FieldDescriptor) -> Option<NodeId> {
    let next = tree.next_element_sibling(field.kind.anchor())?;
    match tree.tag(next) {
        Some("input" | "textarea" | "select" | "button") => None,
        _ => Some(next),
    }
}

/// Validate every required field from scratch.
///
/// All `.error` elements under `scope` are cleared first; each failing field
/// gets [`REQUIRED_MESSAGE`] written into its error display. Returns the ids
/// of the failing fields.
pub fn validate_fields(
    tree: &mut RenderTree,
    scope: NodeId,
    fields: &[FieldDescriptor],
) -> Result<(), Vec<String>> {
    for node in tree.find_all(scope, |el| {
        el.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == "error"))
    }) {
        tree.set_text_content(node, "");
    }

    let mut failed = Vec::new();
    for field in fields.iter().filter(|f| f.required) {
        let display = error_display(tree, field);
        if has_value(tree, &field.kind) {
            if let Some(node) = display {
                tree.set_text_content(node, "");
            }
            continue;
        }

        match display {
            Some(node) => tree.set_text_content(node, REQUIRED_MESSAGE),
            None => debug!(field = %field.id, "no error display next to required field"),
        }
        failed.push(field.id.clone());
    }

    if failed.is_empty() { Ok(()) } else { Err(failed) }
}
