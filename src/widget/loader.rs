use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::dom::page::HostPage;
use crate::dom::parse::set_inner_html;
use crate::dom::sanitize::sanitize_subtree;
use crate::dom::serialize::inner_html;
use crate::dom::tree::NodeId;
use crate::error::WidgetError;
use crate::form::descriptor::FieldKind;
use crate::form::engine::{BotSettings, FormEngine, SubmitOutcome};
use crate::form::prefill::apply_prefill;
use crate::form::rating::RatingControl;
use crate::form::signature::SignaturePad;
use crate::host::HostEnvironment;
use crate::model::pricing::PricingPayload;
use crate::model::widget_config::WidgetConfig;
use crate::net::api::WidgetApi;
use crate::net::endpoints::Endpoints;
use crate::net::fetch::{fetch_json, forward_query};
use crate::pricing::renderer::{mount_cards, render_cards};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{Outcome, Stage, WidgetTraceEvent};
use crate::widget::assets::{await_script, inject_script, inject_stylesheet};
use crate::widget::branding::brand_footer;
use crate::widget::discovery::discover_mount;
use crate::widget::mount::{CancellationToken, WidgetMount};
use crate::widget::variant::{RenderMode, ScriptAsset, ScriptMode, WidgetVariant};

/// Knobs shared by every variant.
#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub endpoints: Endpoints,
    /// Forward a non-empty host query string to the form endpoint instead of
    /// rendering the contact form.
    pub query_passthrough: bool,
    pub bot_site_key: String,
    pub pixel_ratio: f32,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            query_passthrough: false,
            bot_site_key: String::new(),
            pixel_ratio: 1.0,
        }
    }
}

// ============================================================================
// Loaded widgets
// ============================================================================

/// A rendered form widget and the controls wired into it.
#[derive(Debug)]
pub struct FormWidget {
    pub mount: WidgetMount,
    pub config: WidgetConfig,
    pub engine: FormEngine,
    pub signatures: Vec<SignaturePad>,
    pub ratings: Vec<RatingControl>,
    pub prefilled: Vec<String>,
}

impl FormWidget {
    pub fn submit(
        &mut self,
        page: &mut HostPage,
        api: &dyn WidgetApi,
        host: &mut dyn HostEnvironment,
    ) -> Result<SubmitOutcome, WidgetError> {
        self.engine.submit(page, &self.mount, api, host)
    }

    pub fn close_message(&mut self, page: &mut HostPage) -> Result<bool, WidgetError> {
        self.engine.dispatcher.close_message(page, &self.mount)
    }
}

#[derive(Debug)]
pub enum LoadedWidget {
    Form(FormWidget),
    Cards {
        mount: WidgetMount,
        holder: NodeId,
        payload: PricingPayload,
    },
    External {
        mount: WidgetMount,
        global: &'static str,
        payload: Value,
    },
    /// The host query string was forwarded instead of rendering the form.
    Passthrough { mount: WidgetMount, response: Value },
}

impl LoadedWidget {
    pub fn mount(&self) -> &WidgetMount {
        match self {
            LoadedWidget::Form(form) => &form.mount,
            LoadedWidget::Cards { mount, .. }
            | LoadedWidget::External { mount, .. }
            | LoadedWidget::Passthrough { mount, .. } => mount,
        }
    }

    pub fn as_form_mut(&mut self) -> Option<&mut FormWidget> {
        match self {
            LoadedWidget::Form(form) => Some(form),
            _ => None,
        }
    }
}

// ============================================================================
// Loader pipeline
// ============================================================================

/// Runs discovery, asset injection, fetch and render for one variant.
/// Every step after a suspension point re-checks the mount before touching
/// the page.
pub struct WidgetLoader {
    pub variant: WidgetVariant,
    pub settings: LoaderSettings,
    tracer: TraceLogger,
    cancel: Option<CancellationToken>,
}

impl WidgetLoader {
    pub fn new(variant: WidgetVariant, settings: LoaderSettings) -> Self {
        Self {
            variant,
            settings,
            tracer: TraceLogger::disabled(),
            cancel: None,
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    /// Bind the discovered mount to a caller-owned token, so the embedding
    /// page can abort a boot that is still in flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn trace(&self, stage: Stage) -> WidgetTraceEvent {
        WidgetTraceEvent::now(stage, self.variant.name())
    }

    pub fn boot(
        &self,
        page: &mut HostPage,
        api: &dyn WidgetApi,
        host: &mut dyn HostEnvironment,
    ) -> Result<LoadedWidget, WidgetError> {
        info!(variant = %self.variant, "booting widget");
        let plan = self.variant.assets(&self.settings.endpoints);

        inject_stylesheet(page, &plan.stylesheet);
        if let Some(script) = &plan.script {
            inject_script(page, script);
        }
        self.tracer.log(&self.trace(Stage::Assets).with_detail(&plan.stylesheet));

        let mut mount = match discover_mount(page, self.variant.class_prefix()) {
            Ok(mount) => mount,
            Err(e) => {
                self.tracer.log(&self.trace(Stage::Discovery).failed(&e));
                return Err(e);
            }
        };
        if let Some(token) = &self.cancel {
            mount.token = token.clone();
        }
        self.tracer.log(&self.trace(Stage::Discovery).with_widget(&mount.id));

        let result = self.activate(page, &mount, plan.script.as_ref(), api, host);
        if let Err(e) = &result {
            if !e.is_silent() {
                error!(widget = %mount.id, error = %e, "widget failed to load");
            }
        }
        result
    }

    fn activate(
        &self,
        page: &mut HostPage,
        mount: &WidgetMount,
        script: Option<&ScriptAsset>,
        api: &dyn WidgetApi,
        host: &mut dyn HostEnvironment,
    ) -> Result<LoadedWidget, WidgetError> {
        if let Some(script) = script {
            let loaded = await_script(host, script);
            self.record(Stage::ScriptLoad, mount, &loaded);
            loaded?;
            mount.ensure_live(page)?;
        }

        if self.variant == WidgetVariant::Contact && self.settings.query_passthrough {
            if let Some(query) = page.query().map(str::to_string) {
                let url = self.settings.endpoints.query_passthrough(&mount.id, &query);
                let sent = forward_query(api, &url);
                self.record(Stage::Passthrough, mount, &sent);
                let response = sent?;
                info!(widget = %mount.id, %response, "query parameters forwarded");
                return Ok(LoadedWidget::Passthrough {
                    mount: mount.clone(),
                    response,
                });
            }
        }

        let url = self.variant.config_url(&self.settings.endpoints, &mount.id);
        let policy = self.variant.status_policy();

        let loaded = match self.variant.render_mode() {
            RenderMode::Form => {
                let config = fetch_json::<WidgetConfig>(api, &url, policy);
                self.record(Stage::Fetch, mount, &config);
                let config = config?;
                mount.ensure_live(page)?;
                self.render_form(page, mount, config, host)?
            }
            RenderMode::Cards => {
                let payload = fetch_json::<PricingPayload>(api, &url, policy);
                self.record(Stage::Fetch, mount, &payload);
                let payload = payload?;
                let holder = mount_cards(page, mount, render_cards(&payload.content, &payload.appearance))?;
                LoadedWidget::Cards {
                    mount: mount.clone(),
                    holder,
                    payload,
                }
            }
            RenderMode::External { global } => {
                let payload = fetch_json::<Value>(api, &url, policy);
                self.record(Stage::Fetch, mount, &payload);
                let payload = payload?;
                mount.ensure_live(page)?;
                host.call_global(global, &mount.selector(), &payload)
                    .map_err(WidgetError::Host)?;
                LoadedWidget::External {
                    mount: mount.clone(),
                    global,
                    payload,
                }
            }
        };

        self.tracer.log(
            &self
                .trace(Stage::Render)
                .with_widget(&mount.id)
                .with_markup(&inner_html(&page.tree, mount.node)),
        );
        Ok(loaded)
    }

    fn render_form(
        &self,
        page: &mut HostPage,
        mount: &WidgetMount,
        config: WidgetConfig,
        host: &mut dyn HostEnvironment,
    ) -> Result<LoadedWidget, WidgetError> {
        set_inner_html(&mut page.tree, mount.node, &config.html);
        let stripped = sanitize_subtree(&mut page.tree, mount.node);
        if stripped > 0 {
            warn!(widget = %mount.id, stripped, "removed executable content from widget markup");
        }

        let prefilled = apply_prefill(page, mount.node, &config.pre_fill_values);

        if let Some(footer) = config.effective_brand().and_then(brand_footer) {
            footer.append_to(&mut page.tree, mount.node);
        }

        let scope = page.tree.find_by_tag(mount.node, "form").unwrap_or(mount.node);

        let bot = if config.spam_protection {
            let settings = BotSettings::new(&self.settings.bot_site_key);
            if settings.site_key.is_empty() {
                warn!(widget = %mount.id, "spam protection is on but no site key is configured");
            }
            let script = ScriptAsset {
                src: self.settings.endpoints.recaptcha_script(&settings.site_key),
                mode: ScriptMode::Immediate,
            };
            inject_script(page, &script);
            await_script(host, &script)?;
            mount.ensure_live(page)?;
            Some(settings)
        } else {
            None
        };

        let submit_url = self.settings.endpoints.submission(&mount.id);
        let engine = FormEngine::new(&page.tree, scope, &submit_url, bot);

        let pad_blocks: Vec<NodeId> = engine
            .fields
            .iter()
            .filter_map(|f| match f.kind {
                FieldKind::Signature { block, .. } if page.tree.attr(block, "data-type") == Some("signature") => {
                    Some(block)
                }
                _ => None,
            })
            .collect();
        let signatures = pad_blocks
            .into_iter()
            .filter_map(|block| SignaturePad::attach(&mut page.tree, block, self.settings.pixel_ratio))
            .collect();
        let ratings = RatingControl::attach_all(&page.tree, scope);

        debug!(widget = %mount.id, fields = engine.fields.len(), "form widget ready");
        Ok(LoadedWidget::Form(FormWidget {
            mount: mount.clone(),
            config,
            engine,
            signatures,
            ratings,
            prefilled,
        }))
    }

    fn record<T>(&self, stage: Stage, mount: &WidgetMount, result: &Result<T, WidgetError>) {
        let event = self.trace(stage).with_widget(&mount.id);
        let event = match result {
            Ok(_) => event.with_outcome(Outcome::Ok),
            Err(e) => event.failed(e),
        };
        self.tracer.log(&event);
    }
}
