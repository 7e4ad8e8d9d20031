use std::fmt;

#[derive(Debug)]
pub enum WidgetError {
    /// No element carries a class with the widget prefix
    MountNotFound { prefix: String },

    /// Prefix matched but nothing follows it
    EmptyIdentifier { class: String },

    /// A required external script failed to load
    AssetLoad { src: String, reason: String },

    /// Request could not be sent or the body could not be read
    Fetch { url: String, source: reqwest::Error },

    /// Non-success status on an endpoint that does not tolerate it
    HttpStatus { url: String, status: u16 },

    /// Response body is not the JSON shape we expected
    Decode { context: String, source: serde_json::Error },

    /// Required fields failed validation (shown inline, never escalated)
    Validation { fields: Vec<String> },

    /// Bot-mitigation token could not be obtained
    BotMitigation(String),

    /// Form submission failed
    Submission(String),

    /// The mount was torn down while a request was in flight
    MountDetached,

    /// Host environment refused an operation (missing global, etc.)
    Host(String),

    /// Invalid configuration or local input
    Config(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::MountNotFound { prefix } => {
                write!(f, "No widget mount with class prefix '{}'", prefix)
            }
            WidgetError::EmptyIdentifier { class } => {
                write!(f, "Widget class '{}' carries no identifier", class)
            }
            WidgetError::AssetLoad { src, reason } => {
                write!(f, "Failed to load {}: {}", src, reason)
            }
            WidgetError::Fetch { url, source } => {
                write!(f, "Request to {} failed: {}", url, source)
            }
            WidgetError::HttpStatus { url, status } => {
                write!(f, "HTTP error from {}: status {}", url, status)
            }
            WidgetError::Decode { context, source } => {
                write!(f, "JSON decode error ({}): {}", context, source)
            }
            WidgetError::Validation { fields } => {
                write!(f, "Required fields missing: {}", fields.join(", "))
            }
            WidgetError::BotMitigation(msg) => {
                write!(f, "Bot mitigation failed: {}", msg)
            }
            WidgetError::Submission(msg) => {
                write!(f, "Failed to submit form: {}", msg)
            }
            WidgetError::MountDetached => {
                write!(f, "Widget mount was removed from the page")
            }
            WidgetError::Host(msg) => {
                write!(f, "Host environment error: {}", msg)
            }
            WidgetError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WidgetError::Fetch { source, .. } => Some(source),
            WidgetError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl WidgetError {
    /// Failures the host page may legitimately produce (no widget on it).
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            WidgetError::MountNotFound { .. } | WidgetError::EmptyIdentifier { .. }
        )
    }

    /// Short stage-independent label used in trace events.
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetError::MountNotFound { .. } => "mount_not_found",
            WidgetError::EmptyIdentifier { .. } => "empty_identifier",
            WidgetError::AssetLoad { .. } => "asset_load",
            WidgetError::Fetch { .. } => "fetch",
            WidgetError::HttpStatus { .. } => "http_status",
            WidgetError::Decode { .. } => "decode",
            WidgetError::Validation { .. } => "validation",
            WidgetError::BotMitigation(_) => "bot_mitigation",
            WidgetError::Submission(_) => "submission",
            WidgetError::MountDetached => "mount_detached",
            WidgetError::Host(_) => "host",
            WidgetError::Config(_) => "config",
        }
    }
}
