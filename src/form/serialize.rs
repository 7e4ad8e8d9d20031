use crate::dom::tree::{NodeId, RenderTree};
use crate::form::descriptor::{FieldDescriptor, FieldKind};
use crate::form::payload::{PayloadValue, SubmissionPayload};

fn checked_values(tree: &RenderTree, options: &[NodeId]) -> Vec<String> {
    options
        .iter()
        .filter(|&&o| tree.is_checked(o))
        .map(|&o| tree.value(o))
        .collect()
}

/// Build the submission payload from the current control state.
/// Call only after validation succeeded.
pub fn serialize_fields(tree: &RenderTree, fields: &[FieldDescriptor]) -> SubmissionPayload {
    let mut payload = SubmissionPayload::new();

    for field in fields {
        match &field.kind {
            FieldKind::File { input } => {
                for blob in tree.files(*input) {
                    payload.append(&field.id, PayloadValue::File(blob.clone()));
                }
            }
            FieldKind::Consent { checkbox, .. } => {
                payload.append(&field.id, PayloadValue::Bool(tree.is_checked(*checkbox)));
            }
            FieldKind::Choice { options, .. } | FieldKind::Scale { options, .. } => {
                let value = checked_values(tree, options)
                    .into_iter()
                    .next()
                    .map(PayloadValue::Text)
                    .unwrap_or(PayloadValue::Null);
                payload.append(&field.id, value);
            }
            FieldKind::MultipleChoice { options, .. } => {
                payload.append(&field.id, PayloadValue::List(checked_values(tree, options)));
            }
            FieldKind::Signature { hidden, .. } => {
                payload.append(&field.id, PayloadValue::Text(tree.value(*hidden)));
            }
            FieldKind::Text { input } | FieldKind::Email { input } | FieldKind::TextArea { input } => {
                payload.append(&field.id, PayloadValue::Text(tree.value(*input).trim().to_string()));
            }
        }
    }

    payload
}
