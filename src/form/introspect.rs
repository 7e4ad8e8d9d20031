use tracing::debug;

use crate::dom::tree::{ElementData, NodeId, RenderTree};
use crate::form::descriptor::{FieldDescriptor, FieldKind};

const GROUPED_TYPES: &[&str] = &["choice", "multiple_choice", "consent", "scale"];

/// Which structural selector an element matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldSelector {
    /// `[role=radiogroup]`, `[role=group]` or a container with a grouped `data-type`
    Grouped,
    /// Any other non-control element carrying `data-type`, or a `[data-rating]` block
    Block,
    /// `input`
    Input,
    /// `textarea`
    TextArea,
}

fn match_selector(el: &ElementData) -> Option<FieldSelector> {
    let role = el.attr("role").unwrap_or("");
    let data_type = el.attr("data-type").map(str::to_ascii_lowercase);
    match el.tag.as_str() {
        "input" => Some(FieldSelector::Input),
        "textarea" => Some(FieldSelector::TextArea),
        "select" | "button" | "option" => None,
        _ if role == "radiogroup" || role == "group" => Some(FieldSelector::Grouped),
        _ => match data_type.as_deref() {
            Some(t) if GROUPED_TYPES.contains(&t) => Some(FieldSelector::Grouped),
            Some(_) => Some(FieldSelector::Block),
            None if el.attr("data-rating").is_some() => Some(FieldSelector::Block),
            None => None,
        },
    }
}

/// Build the descriptor list for every form field under `scope`, in
/// document order. Descendants of a matched group or block are not
/// considered on their own.
pub fn introspect_fields(tree: &RenderTree, scope: NodeId) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    let mut stack: Vec<NodeId> = tree.children(scope).iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        let selector = tree.element(node).and_then(match_selector);

        let descend = match selector {
            Some(FieldSelector::Grouped) | Some(FieldSelector::Block) => {
                if let Some(field) = describe_container(tree, node, selector == Some(FieldSelector::Grouped)) {
                    fields.push(field);
                }
                false
            }
            Some(FieldSelector::Input) | Some(FieldSelector::TextArea) => {
                if let Some(field) = describe_control(tree, node) {
                    fields.push(field);
                }
                false
            }
            None => true,
        };

        if descend {
            stack.extend(tree.children(node).iter().rev().copied());
        }
    }

    fields
}

fn field_id(tree: &RenderTree, node: NodeId) -> Option<String> {
    ["id", "name", "data-field-id"]
        .iter()
        .filter_map(|a| tree.attr(node, a))
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn is_required(tree: &RenderTree, node: NodeId) -> bool {
    tree.attr(node, "aria-required") == Some("true")
        || tree.has_attr(node, "required")
        || tree.attr(node, "data-required") == Some("true")
}

fn input_type(tree: &RenderTree, node: NodeId) -> String {
    tree.attr(node, "type").unwrap_or("text").to_ascii_lowercase()
}

fn inputs_of_type(tree: &RenderTree, scope: NodeId, kind: &str) -> Vec<NodeId> {
    tree.find_all(scope, |el| {
        el.tag == "input" && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case(kind))
    })
}

fn describe_control(tree: &RenderTree, node: NodeId) -> Option<FieldDescriptor> {
    let data_type = tree.attr(node, "data-type").map(str::to_ascii_lowercase);
    let kind = if tree.tag(node) == Some("textarea") {
        FieldKind::TextArea { input: node }
    } else {
        let ty = data_type.unwrap_or_else(|| input_type(tree, node));
        match ty.as_str() {
            "email" => FieldKind::Email { input: node },
            "file" => FieldKind::File { input: node },
            "textarea" => FieldKind::TextArea { input: node },
            "checkbox" | "consent" => FieldKind::Consent {
                group: node,
                checkbox: node,
            },
            "radio" | "hidden" | "submit" | "button" | "reset" | "image" => return None,
            _ => FieldKind::Text { input: node },
        }
    };

    let Some(id) = field_id(tree, node) else {
        debug!(node, kind = kind.name(), "skipping form control without identifier");
        return None;
    };

    Some(FieldDescriptor {
        id,
        required: is_required(tree, node),
        kind,
    })
}

fn describe_container(tree: &RenderTree, node: NodeId, grouped: bool) -> Option<FieldDescriptor> {
    let data_type = tree.attr(node, "data-type").map(str::to_ascii_lowercase);

    let kind = if grouped {
        let role = tree.attr(node, "role").unwrap_or("");
        let ty = match data_type.as_deref() {
            Some(t) if GROUPED_TYPES.contains(&t) => t.to_string(),
            _ if role == "radiogroup" => "choice".to_string(),
            _ => "multiple_choice".to_string(),
        };
        match ty.as_str() {
            "choice" => FieldKind::Choice {
                group: node,
                options: inputs_of_type(tree, node, "radio"),
            },
            "scale" => FieldKind::Scale {
                group: node,
                options: inputs_of_type(tree, node, "radio"),
            },
            "consent" => {
                let checkbox = inputs_of_type(tree, node, "checkbox").into_iter().next()?;
                FieldKind::Consent { group: node, checkbox }
            }
            _ => FieldKind::MultipleChoice {
                group: node,
                options: inputs_of_type(tree, node, "checkbox"),
            },
        }
    } else {
        let Some(hidden) = inputs_of_type(tree, node, "hidden").into_iter().next() else {
            debug!(node, "block without hidden companion input");
            return None;
        };
        FieldKind::Signature { block: node, hidden }
    };

    // Groups often carry no id of their own; their options share a name.
    let id = field_id(tree, node).or_else(|| match &kind {
        FieldKind::Choice { options, .. }
        | FieldKind::MultipleChoice { options, .. }
        | FieldKind::Scale { options, .. } => options.iter().find_map(|&o| tree.attr(o, "name").map(str::to_string)),
        FieldKind::Consent { checkbox, .. } => field_id(tree, *checkbox),
        FieldKind::Signature { hidden, .. } => field_id(tree, *hidden),
        _ => None,
    });
    let Some(id) = id else {
        debug!(node, kind = kind.name(), "skipping field group without identifier");
        return None;
    };

    let required = is_required(tree, node)
        || match &kind {
            FieldKind::Choice { options, .. }
            | FieldKind::MultipleChoice { options, .. }
            | FieldKind::Scale { options, .. } => options.iter().any(|&o| is_required(tree, o)),
            FieldKind::Consent { checkbox, .. } => is_required(tree, *checkbox),
            _ => false,
        };

    Some(FieldDescriptor { id, required, kind })
}
