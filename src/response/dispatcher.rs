use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dom::builder::HtmlNode;
use crate::dom::page::HostPage;
use crate::dom::tree::NodeId;
use crate::error::WidgetError;
use crate::host::HostEnvironment;
use crate::model::response::SubmitResponse;
use crate::widget::mount::WidgetMount;

const MESSAGE_CLASS: &str = "text-xl font-semibold text-black py-6 text-center mt-10";
const CLOSE_CLASS: &str = "block mx-auto mt-4 px-4 py-2 bg-red-500 text-white rounded";
pub const CLOSE_ACTION: &str = "close";

/// What applying a [`SubmitResponse`] did to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DispatchEffect {
    ShowedMessage { close_button: NodeId },
    Navigated { url: String },
    HidForm,
    Ignored,
}

/// Applies post-submit actions to the mount and remembers the markup a
/// success message replaced so `close_message` can put it back.
#[derive(Debug, Default)]
pub struct ResponseDispatcher {
    snapshot: Option<Vec<NodeId>>,
}

impl ResponseDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing_message(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn dispatch(
        &mut self,
        page: &mut HostPage,
        mount: &WidgetMount,
        response: &SubmitResponse,
        host: &mut dyn HostEnvironment,
    ) -> Result<DispatchEffect, WidgetError> {
        mount.ensure_live(page)?;
        debug!(widget = %mount.id, action = response.action_name(), "dispatching response");

        let effect = match response {
            SubmitResponse::SuccessMessage { value } => {
                let close_button = self.show_message(page, mount.node, value);
                DispatchEffect::ShowedMessage { close_button }
            }
            SubmitResponse::Redirect { value: Some(url) } => {
                host.navigate(url);
                DispatchEffect::Navigated { url: url.clone() }
            }
            SubmitResponse::Redirect { value: None } => {
                warn!(widget = %mount.id, "redirect response without a target");
                DispatchEffect::Ignored
            }
            SubmitResponse::HideForm => {
                page.tree.set_style_property(mount.node, "display", "none");
                DispatchEffect::HidForm
            }
            SubmitResponse::Unknown => {
                info!(widget = %mount.id, "ignoring unrecognized response action");
                DispatchEffect::Ignored
            }
        };
        Ok(effect)
    }

    fn show_message(&mut self, page: &mut HostPage, mount: NodeId, message: &str) -> NodeId {
        let previous = page.tree.take_children(mount);
        // a second message replaces the first but the form stays the restore target
        if self.snapshot.is_none() {
            self.snapshot = Some(previous);
        }

        HtmlNode::element("p")
            .class(MESSAGE_CLASS)
            .child(HtmlNode::text(message))
            .append_to(&mut page.tree, mount);

        HtmlNode::element("button")
            .attr("type", "button")
            .class(CLOSE_CLASS)
            .attr("data-widget-action", CLOSE_ACTION)
            .child(HtmlNode::text("Close"))
            .append_to(&mut page.tree, mount)
    }

    /// Put back the markup a success message replaced. Returns false when no
    /// message is showing.
    pub fn close_message(&mut self, page: &mut HostPage, mount: &WidgetMount) -> Result<bool, WidgetError> {
        mount.ensure_live(page)?;
        let Some(previous) = self.snapshot.take() else {
            return Ok(false);
        };
        page.tree.replace_children(mount.node, previous);
        Ok(true)
    }

    /// Route a click inside the mount: the Close button restores the form.
    pub fn click(&mut self, page: &mut HostPage, mount: &WidgetMount, node: NodeId) -> Result<bool, WidgetError> {
        if page.tree.attr(node, "data-widget-action") == Some(CLOSE_ACTION) {
            return self.close_message(page, mount);
        }
        Ok(false)
    }
}
