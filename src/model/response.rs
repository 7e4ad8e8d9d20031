use serde::{Deserialize, Serialize};

/// Post-submit instruction returned by the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum SubmitResponse {
    #[serde(rename = "success_msg")]
    SuccessMessage {
        #[serde(default, deserialize_with = "value_as_text")]
        value: String,
    },
    #[serde(rename = "redirect_url")]
    Redirect {
        #[serde(default)]
        value: Option<String>,
    },
    #[serde(rename = "hide_form")]
    HideForm,
    /// Any other `action` value, or a body without one.
    #[serde(other)]
    Unknown,
}

/// Message values are usually strings; numbers and booleans are shown as
/// their JSON text and `null` as an empty message.
fn value_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

impl SubmitResponse {
    /// Decode a response body. Bodies without a recognizable `action` decode
    /// to [`SubmitResponse::Unknown`] so the dispatcher can ignore them.
    pub fn from_value(value: &serde_json::Value) -> Self {
        if value.get("action").and_then(|a| a.as_str()).is_none() {
            return SubmitResponse::Unknown;
        }
        serde_json::from_value(value.clone()).unwrap_or(SubmitResponse::Unknown)
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            SubmitResponse::SuccessMessage { .. } => "success_msg",
            SubmitResponse::Redirect { .. } => "redirect_url",
            SubmitResponse::HideForm => "hide_form",
            SubmitResponse::Unknown => "unknown",
        }
    }
}
