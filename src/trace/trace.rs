use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Pipeline stage a trace event was recorded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Assets,
    Discovery,
    ScriptLoad,
    Passthrough,
    Fetch,
    Render,
    Submit,
    Dispatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    Failed,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct WidgetTraceEvent {
    pub timestamp_ms: u128,
    pub stage: Stage,
    pub variant: String,
    pub widget_id: Option<String>,
    pub outcome: Outcome,
    pub detail: Option<String>,
    pub markup_fingerprint: Option<String>,
}

impl WidgetTraceEvent {
    pub fn now(stage: Stage, variant: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            stage,
            variant: variant.to_string(),
            widget_id: None,
            outcome: Outcome::Ok,
            detail: None,
            markup_fingerprint: None,
        }
    }

    pub fn with_widget(mut self, id: impl ToString) -> Self {
        self.widget_id = Some(id.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn failed(self, detail: impl ToString) -> Self {
        self.with_outcome(Outcome::Failed).with_detail(detail)
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_markup(mut self, markup: &str) -> Self {
        self.markup_fingerprint = Some(markup_fingerprint(markup));
        self
    }
}

/// Stable hash of rendered markup so traces can tell renders apart without
/// storing them.
pub fn markup_fingerprint(markup: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(markup.as_bytes());
    format!("{:x}", hasher.finalize())
}
