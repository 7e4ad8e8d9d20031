use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use serde_json::Value;

use crate::error::WidgetError;
use crate::form::payload::{SubmissionPayload, WirePart};

/// Status and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by the loader. The HTTP implementation talks to the real
/// backend; tests plug in canned responses.
pub trait WidgetApi {
    fn get(&self, url: &str) -> Result<ApiResponse, WidgetError>;

    fn post_json(&self, url: &str, body: &Value) -> Result<ApiResponse, WidgetError>;

    fn post_multipart(&self, url: &str, payload: &SubmissionPayload) -> Result<ApiResponse, WidgetError>;
}

// ============================================================================
// reqwest-backed implementation
// ============================================================================

pub struct HttpWidgetApi {
    client: reqwest::blocking::Client,
}

impl HttpWidgetApi {
    pub fn new(timeout: Duration) -> Result<Self, WidgetError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WidgetError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn finish(url: &str, response: reqwest::blocking::Response) -> Result<ApiResponse, WidgetError> {
        let status = response.status().as_u16();
        let body = response.text().map_err(|source| WidgetError::Fetch {
            url: url.to_string(),
            source,
        })?;
        Ok(ApiResponse { status, body })
    }
}

impl WidgetApi for HttpWidgetApi {
    fn get(&self, url: &str) -> Result<ApiResponse, WidgetError> {
        let response = self.client.get(url).send().map_err(|source| WidgetError::Fetch {
            url: url.to_string(),
            source,
        })?;
        Self::finish(url, response)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<ApiResponse, WidgetError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|source| WidgetError::Fetch {
                url: url.to_string(),
                source,
            })?;
        Self::finish(url, response)
    }

    fn post_multipart(&self, url: &str, payload: &SubmissionPayload) -> Result<ApiResponse, WidgetError> {
        let form = to_multipart(payload)?;
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|e| WidgetError::Submission(format!("POST {}: {}", url, e)))?;
        Self::finish(url, response)
    }
}

fn to_multipart(payload: &SubmissionPayload) -> Result<Form, WidgetError> {
    let mut form = Form::new();
    for (name, part) in payload.wire_parts() {
        form = match part {
            WirePart::Text(text) => form.text(name, text),
            WirePart::File(blob) => {
                let part = Part::bytes(blob.bytes.clone())
                    .file_name(blob.name.clone())
                    .mime_str(&blob.mime_type)
                    .map_err(|e| WidgetError::Submission(format!("invalid mime type '{}': {}", blob.mime_type, e)))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
