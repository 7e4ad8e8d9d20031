use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::dom::page::HostPage;
use crate::dom::tree::NodeId;
use crate::error::WidgetError;
use crate::widget::variant::WidgetId;

/// Cancellation flag shared by every step that runs after a suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// The host-page element anchoring one widget instance.
#[derive(Debug, Clone)]
pub struct WidgetMount {
    pub node: NodeId,
    pub id: WidgetId,
    /// Full class token that matched, e.g. `cont-app-abc-123`.
    pub class_token: String,
    pub token: CancellationToken,
}

impl WidgetMount {
    /// Fails with [`WidgetError::MountDetached`] once the mount has been torn
    /// down or removed from the document. Every DOM write that follows a
    /// network call or script load goes through this check.
    pub fn ensure_live(&self, page: &HostPage) -> Result<(), WidgetError> {
        if self.token.is_cancelled() || !page.tree.is_attached(self.node) {
            return Err(WidgetError::MountDetached);
        }
        Ok(())
    }

    /// Remove the mount from the page and cancel everything still pending on it.
    pub fn teardown(&self, page: &mut HostPage) {
        self.token.cancel();
        page.tree.detach(self.node);
    }

    /// CSS selector an external runtime can use to find the mount.
    pub fn selector(&self) -> String {
        format!("[class~=\"{}\"]", self.class_token)
    }
}
