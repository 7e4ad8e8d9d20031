use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;
use widget_loader::error::WidgetError;
use widget_loader::form::payload::{PayloadValue, SubmissionPayload};
use widget_loader::net::api::{ApiResponse, WidgetApi};
use widget_loader::widget::mount::CancellationToken;

/// One request seen by [`StubApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Get { url: String },
    PostJson { url: String, body: Value },
    PostMultipart { url: String, entries: Vec<(String, PayloadValue)> },
}

impl Recorded {
    fn method(&self) -> Method {
        match self {
            Recorded::Get { .. } => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Recorded::Get { url } | Recorded::PostJson { url, .. } | Recorded::PostMultipart { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// Canned responses keyed by method and URL. Unknown URLs fail like a refused
/// connection. Optionally cancels a mount token when a request arrives, to
/// simulate the host tearing the widget down mid-flight.
#[derive(Default)]
pub struct StubApi {
    responses: HashMap<(Method, String), (u16, String)>,
    requests: RefCell<Vec<Recorded>>,
    cancel_on_request: RefCell<Option<CancellationToken>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: Method, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert((method, url.to_string()), (status, body.to_string()));
        self
    }

    pub fn on_get(self, url: &str, body: Value) -> Self {
        self.respond(Method::Get, url, 200, &body.to_string())
    }

    pub fn on_post(self, url: &str, body: Value) -> Self {
        self.respond(Method::Post, url, 200, &body.to_string())
    }

    pub fn cancel_during_requests(&self, token: CancellationToken) {
        *self.cancel_on_request.borrow_mut() = Some(token);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url().to_string()).collect()
    }

    /// Entries of every multipart POST, in order.
    pub fn submissions(&self) -> Vec<Vec<(String, PayloadValue)>> {
        self.requests
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Recorded::PostMultipart { entries, .. } => Some(entries.clone()),
                _ => None,
            })
            .collect()
    }

    fn answer(&self, request: Recorded) -> Result<ApiResponse, WidgetError> {
        let key = (request.method(), request.url().to_string());
        self.requests.borrow_mut().push(request);
        if let Some(token) = self.cancel_on_request.borrow().as_ref() {
            token.cancel();
        }
        match self.responses.get(&key) {
            Some((status, body)) => Ok(ApiResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(WidgetError::Host(format!("connection refused: {}", key.1))),
        }
    }
}

impl WidgetApi for StubApi {
    fn get(&self, url: &str) -> Result<ApiResponse, WidgetError> {
        self.answer(Recorded::Get { url: url.to_string() })
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<ApiResponse, WidgetError> {
        self.answer(Recorded::PostJson {
            url: url.to_string(),
            body: body.clone(),
        })
    }

    fn post_multipart(&self, url: &str, payload: &SubmissionPayload) -> Result<ApiResponse, WidgetError> {
        self.answer(Recorded::PostMultipart {
            url: url.to_string(),
            entries: payload.entries().to_vec(),
        })
    }
}
