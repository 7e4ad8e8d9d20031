use tracing::{debug, error, info, warn};

use crate::dom::page::HostPage;
use crate::dom::tree::{FileBlob, NodeId, RenderTree};
use crate::error::WidgetError;
use crate::form::descriptor::{FieldDescriptor, FieldKind};
use crate::form::introspect::introspect_fields;
use crate::form::payload::{PayloadValue, SubmissionPayload};
use crate::form::serialize::serialize_fields;
use crate::form::validate::validate_fields;
use crate::host::HostEnvironment;
use crate::model::response::SubmitResponse;
use crate::net::api::WidgetApi;
use crate::response::dispatcher::{DispatchEffect, ResponseDispatcher};
use crate::widget::mount::WidgetMount;

/// Field name the backend expects the bot-mitigation token under.
pub const BOT_TOKEN_FIELD: &str = "recaptchaToken";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Serializing,
    BotCheck,
    Submitting,
    Dispatching,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub site_key: String,
    pub action: String,
}

impl BotSettings {
    pub fn new(site_key: &str) -> Self {
        Self {
            site_key: site_key.to_string(),
            action: "submit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Required fields were missing; errors are shown inline.
    Invalid { fields: Vec<String> },
    /// The server answered and its action was applied.
    Dispatched {
        response: SubmitResponse,
        effect: DispatchEffect,
    },
}

/// Validation, serialization and submission for one form widget.
///
/// `submit` borrows the engine mutably for the whole attempt, so a second
/// attempt cannot start while one is in flight.
#[derive(Debug)]
pub struct FormEngine {
    pub scope: NodeId,
    pub fields: Vec<FieldDescriptor>,
    pub submit_url: String,
    pub bot: Option<BotSettings>,
    pub dispatcher: ResponseDispatcher,
    state: SubmitState,
    history: Vec<SubmitState>,
}

impl FormEngine {
    /// Introspect the fields under `scope` (the `<form>` element, or the
    /// mount when the markup has none).
    pub fn new(tree: &RenderTree, scope: NodeId, submit_url: &str, bot: Option<BotSettings>) -> Self {
        let fields = introspect_fields(tree, scope);
        debug!(count = fields.len(), "introspected form fields");
        Self {
            scope,
            fields,
            submit_url: submit_url.to_string(),
            bot,
            dispatcher: ResponseDispatcher::new(),
            state: SubmitState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// States entered during the most recent attempt, in order.
    pub fn last_transitions(&self) -> &[SubmitState] {
        &self.history
    }

    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    fn enter(&mut self, state: SubmitState) {
        self.state = state;
        self.history.push(state);
    }

    pub fn submit(
        &mut self,
        page: &mut HostPage,
        mount: &WidgetMount,
        api: &dyn WidgetApi,
        host: &mut dyn HostEnvironment,
    ) -> Result<SubmitOutcome, WidgetError> {
        self.history.clear();
        let result = self.run_attempt(page, mount, api, host);
        self.enter(SubmitState::Idle);
        if let Err(e) = &result {
            error!(widget = %mount.id, error = %e, "form submission failed");
        }
        result
    }

    fn run_attempt(
        &mut self,
        page: &mut HostPage,
        mount: &WidgetMount,
        api: &dyn WidgetApi,
        host: &mut dyn HostEnvironment,
    ) -> Result<SubmitOutcome, WidgetError> {
        mount.ensure_live(page)?;

        self.enter(SubmitState::Validating);
        if let Err(fields) = validate_fields(&mut page.tree, self.scope, &self.fields) {
            info!(widget = %mount.id, ?fields, "form validation failed");
            return Ok(SubmitOutcome::Invalid { fields });
        }

        self.enter(SubmitState::Serializing);
        let mut payload = serialize_fields(&page.tree, &self.fields);

        if let Some(bot) = self.bot.clone() {
            self.enter(SubmitState::BotCheck);
            let token = host
                .bot_token(&bot.site_key, &bot.action)
                .map_err(WidgetError::BotMitigation)?;
            payload.append(BOT_TOKEN_FIELD, PayloadValue::Text(token));
        }

        self.enter(SubmitState::Submitting);
        let response = self.post(api, &payload)?;

        mount.ensure_live(page)?;
        self.enter(SubmitState::Dispatching);
        let effect = self.dispatcher.dispatch(page, mount, &response, host)?;
        Ok(SubmitOutcome::Dispatched { response, effect })
    }

    fn post(&self, api: &dyn WidgetApi, payload: &SubmissionPayload) -> Result<SubmitResponse, WidgetError> {
        debug!(url = %self.submit_url, entries = payload.len(), "submitting form");
        let response = api
            .post_multipart(&self.submit_url, payload)
            .map_err(|e| WidgetError::Submission(e.to_string()))?;
        if !response.is_success() {
            warn!(url = %self.submit_url, status = response.status, "submission returned an error status");
        }
        let body: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| WidgetError::Submission(format!("invalid response body: {}", e)))?;
        Ok(SubmitResponse::from_value(&body))
    }
}

// ============================================================================
// Control state helpers (what a user would do by typing/clicking)
// ============================================================================

/// Set the value of a text-like field, check the matching option of a
/// choice/scale field, or check every listed option of a multiple-choice
/// field. Returns false when the field does not accept the input.
pub fn fill_field(tree: &mut RenderTree, field: &FieldDescriptor, values: &[String]) -> bool {
    match &field.kind {
        FieldKind::Text { input } | FieldKind::Email { input } | FieldKind::TextArea { input } => {
            tree.set_value(*input, values.first().map(String::as_str).unwrap_or(""));
            true
        }
        FieldKind::Signature { hidden, .. } => {
            tree.set_value(*hidden, values.first().map(String::as_str).unwrap_or(""));
            true
        }
        FieldKind::Choice { options, .. } | FieldKind::Scale { options, .. } => {
            let wanted = values.first();
            for &o in options {
                let hit = wanted.is_some_and(|w| tree.value(o) == *w);
                tree.set_checked(o, hit);
            }
            true
        }
        FieldKind::MultipleChoice { options, .. } => {
            for &o in options {
                let hit = values.contains(&tree.value(o));
                tree.set_checked(o, hit);
            }
            true
        }
        FieldKind::Consent { checkbox, .. } => {
            let on = values
                .first()
                .is_some_and(|v| matches!(v.as_str(), "true" | "on" | "yes" | "1"));
            tree.set_checked(*checkbox, on);
            true
        }
        FieldKind::File { .. } => false,
    }
}

/// Select files on a file field.
pub fn select_files(tree: &mut RenderTree, field: &FieldDescriptor, files: Vec<FileBlob>) -> bool {
    match &field.kind {
        FieldKind::File { input } => {
            tree.set_files(*input, files);
            true
        }
        _ => false,
    }
}
