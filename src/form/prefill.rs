use tracing::debug;

use crate::dom::page::HostPage;
use crate::dom::tree::NodeId;
use crate::model::widget_config::PrefillMapping;

/// Copy host-page query parameters into the mapped fields under `scope`.
/// Returns the ids of the fields that were filled.
pub fn apply_prefill(page: &mut HostPage, scope: NodeId, mappings: &[PrefillMapping]) -> Vec<String> {
    let mut filled = Vec::new();

    for mapping in mappings {
        let Some(value) = page.query_param(&mapping.parameter_name) else {
            continue;
        };
        let Some(node) = page.tree.element_by_id(scope, &mapping.field_id) else {
            debug!(field = %mapping.field_id, "pre-fill target not found");
            continue;
        };
        page.tree.set_value(node, &value);
        filled.push(mapping.field_id.clone());
    }

    filled
}
