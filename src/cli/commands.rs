use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::dom::page::HostPage;
use crate::dom::sanitize::sanitize_fragment;
use crate::dom::serialize::outer_html;
use crate::dom::tree::{FileBlob, RenderTree};
use crate::error::WidgetError;
use crate::form::engine::{SubmitOutcome, fill_field, select_files};
use crate::host::RecordingHost;
use crate::model::pricing::PricingPayload;
use crate::net::api::HttpWidgetApi;
use crate::pricing::renderer::render_cards;
use crate::trace::logger::TraceLogger;
use crate::widget::loader::{LoadedWidget, LoaderSettings, WidgetLoader};
use crate::widget::variant::WidgetVariant;

/// Everything the subcommands share once CLI flags and config are merged.
pub struct CommandContext {
    pub settings: LoaderSettings,
    pub timeout: Duration,
    pub trace_file: Option<String>,
    pub verbose: u8,
}

impl CommandContext {
    fn loader(&self, variant: WidgetVariant) -> WidgetLoader {
        let tracer = match &self.trace_file {
            Some(path) => TraceLogger::new(path),
            None => TraceLogger::disabled(),
        };
        WidgetLoader::new(variant, self.settings.clone()).with_tracer(tracer)
    }
}

// ============================================================================
// load subcommand
// ============================================================================

pub fn cmd_load(
    ctx: &CommandContext,
    page_path: &str,
    url: &str,
    variant: &str,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let variant: WidgetVariant = variant.parse()?;
    let mut page = HostPage::parse(&std::fs::read_to_string(page_path)?, url)?;
    let api = HttpWidgetApi::new(ctx.timeout)?;
    let mut host = RecordingHost::new().with_global("renderReactApp");

    if ctx.verbose > 0 {
        eprintln!("Booting {} widget from {}...", variant, page_path);
    }

    let loaded = ctx.loader(variant).boot(&mut page, &api, &mut host)?;
    describe(&loaded);
    print_effects(&host)?;
    write_output(output, &page.to_html())
}

// ============================================================================
// submit subcommand
// ============================================================================

/// One value from the `--values` YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    File { file: String },
}

impl FieldValue {
    fn as_strings(&self) -> Vec<String> {
        match self {
            FieldValue::Flag(b) => vec![b.to_string()],
            FieldValue::Number(n) => vec![n.to_string()],
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
            FieldValue::File { file } => vec![file.clone()],
        }
    }
}

pub fn parse_values(content: &str) -> Result<BTreeMap<String, FieldValue>, WidgetError> {
    serde_yaml::from_str(content).map_err(|e| WidgetError::Config(format!("invalid values file: {}", e)))
}

pub fn read_file_blob(path: &str) -> Result<FileBlob, WidgetError> {
    let bytes = std::fs::read(path).map_err(|e| WidgetError::Config(format!("cannot read '{}': {}", path, e)))?;
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(FileBlob {
        name,
        mime_type: "application/octet-stream".to_string(),
        bytes,
    })
}

pub fn cmd_submit(
    ctx: &CommandContext,
    page_path: &str,
    url: &str,
    values_path: &str,
    bot_token: Option<&str>,
    output: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let values = parse_values(&std::fs::read_to_string(values_path)?)?;
    let mut page = HostPage::parse(&std::fs::read_to_string(page_path)?, url)?;
    let api = HttpWidgetApi::new(ctx.timeout)?;
    let mut host = RecordingHost::new();
    if let Some(token) = bot_token {
        host = host.with_bot_token(token);
    }

    let mut loaded = ctx.loader(WidgetVariant::Contact).boot(&mut page, &api, &mut host)?;
    let form = loaded
        .as_form_mut()
        .ok_or("the page did not load a form widget")?;

    for (id, value) in &values {
        let field = form
            .engine
            .field(id)
            .ok_or_else(|| WidgetError::Config(format!("form has no field '{}'", id)))?
            .clone();
        let accepted = match value {
            FieldValue::File { file } => select_files(&mut page.tree, &field, vec![read_file_blob(file)?]),
            other => fill_field(&mut page.tree, &field, &other.as_strings()),
        };
        if !accepted {
            return Err(format!("field '{}' ({}) does not accept that value", id, field.kind.name()).into());
        }
        if ctx.verbose > 1 {
            eprintln!("  Filled: {}", id);
        }
    }

    let outcome = form.submit(&mut page, &api, &mut host)?;
    let submitted = match &outcome {
        SubmitOutcome::Invalid { fields } => {
            println!("{}", WidgetError::Validation { fields: fields.clone() });
            false
        }
        SubmitOutcome::Dispatched { response, effect } => {
            println!("Server action: {}", response.action_name());
            println!("{}", serde_json::to_string(effect)?);
            true
        }
    };

    print_effects(&host)?;
    write_output(output, &page.to_html())?;
    Ok(submitted)
}

// ============================================================================
// render-pricing subcommand
// ============================================================================

pub fn cmd_render_pricing(input: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let payload: PricingPayload = serde_json::from_str(&std::fs::read_to_string(input)?)?;
    write_output(output, &render_pricing_html(&payload))
}

/// Render cards into standalone, sanitized HTML.
pub fn render_pricing_html(payload: &PricingPayload) -> String {
    let Some(cards) = sanitize_fragment(render_cards(&payload.content, &payload.appearance)) else {
        return String::new();
    };
    let mut tree = RenderTree::new();
    let root = tree.root();
    let holder = cards.append_to(&mut tree, root);
    outer_html(&tree, holder)
}

// ============================================================================
// Helpers
// ============================================================================

fn describe(loaded: &LoadedWidget) {
    let mount = loaded.mount();
    match loaded {
        LoadedWidget::Form(form) => println!(
            "Loaded form widget {} ({} fields, {} pre-filled)",
            mount.id,
            form.engine.fields.len(),
            form.prefilled.len()
        ),
        LoadedWidget::Cards { payload, .. } => {
            println!("Loaded pricing widget {} ({} plans)", mount.id, payload.content.len())
        }
        LoadedWidget::External { global, .. } => println!("Handed widget {} to {}()", mount.id, global),
        LoadedWidget::Passthrough { response, .. } => {
            println!("Forwarded query parameters for {}: {}", mount.id, response)
        }
    }
}

fn print_effects(host: &RecordingHost) -> Result<(), Box<dyn std::error::Error>> {
    for effect in &host.effects {
        eprintln!("{}", serde_json::to_string(effect)?);
    }
    Ok(())
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{}", content),
    }
    Ok(())
}
