use crate::dom::tree::NodeId;

/// Kind of a form field, carrying only the nodes that kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text { input: NodeId },
    Email { input: NodeId },
    TextArea { input: NodeId },
    File { input: NodeId },
    /// Radio group; at most one option is sent.
    Choice { group: NodeId, options: Vec<NodeId> },
    /// Checkbox group; every checked option is sent.
    MultipleChoice { group: NodeId, options: Vec<NodeId> },
    /// Single checkbox, sent as a boolean. `group` is the wrapping block when
    /// the consent came from a grouped selector, otherwise the checkbox itself.
    Consent { group: NodeId, checkbox: NodeId },
    /// Numeric scale rendered as a radio group.
    Scale { group: NodeId, options: Vec<NodeId> },
    /// Container whose value lives in a hidden companion input
    /// (signature pads, rating blocks, unrecognized custom blocks).
    Signature { block: NodeId, hidden: NodeId },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Email { .. } => "email",
            FieldKind::TextArea { .. } => "textarea",
            FieldKind::File { .. } => "file",
            FieldKind::Choice { .. } => "choice",
            FieldKind::MultipleChoice { .. } => "multiple_choice",
            FieldKind::Consent { .. } => "consent",
            FieldKind::Scale { .. } => "scale",
            FieldKind::Signature { .. } => "signature",
        }
    }

    /// Node after which the inline error display is looked up.
    pub fn anchor(&self) -> NodeId {
        match self {
            FieldKind::Text { input }
            | FieldKind::Email { input }
            | FieldKind::TextArea { input }
            | FieldKind::File { input } => *input,
            FieldKind::Choice { group, .. }
            | FieldKind::MultipleChoice { group, .. }
            | FieldKind::Consent { group, .. }
            | FieldKind::Scale { group, .. } => *group,
            FieldKind::Signature { block, .. } => *block,
        }
    }
}

/// Normalized description of one form field, built once per form load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: String,
    pub required: bool,
    pub kind: FieldKind,
}
