use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::WidgetError;
use crate::net::api::WidgetApi;

/// How a config fetch treats non-2xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Log a warning and still try to decode the body.
    Lenient,
    /// Treat any non-2xx status as a fetch failure.
    Strict,
}

/// Issue one GET and decode the JSON body as `T`.
pub fn fetch_json<T: DeserializeOwned>(
    api: &dyn WidgetApi,
    url: &str,
    policy: StatusPolicy,
) -> Result<T, WidgetError> {
    debug!(url, "fetching widget payload");
    let response = api.get(url)?;

    if !response.is_success() {
        match policy {
            StatusPolicy::Strict => {
                return Err(WidgetError::HttpStatus {
                    url: url.to_string(),
                    status: response.status,
                });
            }
            StatusPolicy::Lenient => {
                warn!(url, status = response.status, "error fetching widget, decoding body anyway");
            }
        }
    }

    serde_json::from_str(&response.body).map_err(|source| WidgetError::Decode {
        context: format!("GET {}", url),
        source,
    })
}

/// Forward the host page's query string straight to the form endpoint.
pub fn forward_query(api: &dyn WidgetApi, url: &str) -> Result<Value, WidgetError> {
    let response = api.post_json(url, &json!({}))?;
    if !response.is_success() {
        warn!(url, status = response.status, "query passthrough returned an error status");
    }
    serde_json::from_str(&response.body).map_err(|source| WidgetError::Decode {
        context: format!("POST {}", url),
        source,
    })
}
