use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::net::endpoints::{DEFAULT_API_BASE, DEFAULT_STATIC_BASE, Endpoints};
use crate::widget::loader::LoaderSettings;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "widget-loader",
    version,
    about = "Headless runtime for embeddable contact, pricing and booking widgets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: widget-loader.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Widget API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Static asset base URL
    #[arg(long, global = true)]
    pub static_base: Option<String>,

    /// Append JSONL lifecycle events to this file
    #[arg(long, global = true)]
    pub trace_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Boot a widget against a saved host page and print the result
    Load {
        /// Host page HTML file
        #[arg(long)]
        page: String,

        /// Location the page is served from (query string feeds pre-fill)
        #[arg(long, default_value = "https://localhost/")]
        url: String,

        /// Widget variant: contact, pricing, pricing-preview, booking
        #[arg(long, default_value = "contact")]
        variant: String,

        /// Write the resulting page HTML here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Boot a contact widget, fill it from a YAML file and submit it
    Submit {
        /// Host page HTML file
        #[arg(long)]
        page: String,

        /// Location the page is served from
        #[arg(long, default_value = "https://localhost/")]
        url: String,

        /// YAML mapping of field id to value (string, list, bool or {file: path})
        #[arg(long)]
        values: String,

        /// Bot-mitigation token to hand out when the widget asks for one
        #[arg(long)]
        bot_token: Option<String>,

        /// Write the resulting page HTML here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render pricing cards from a saved JSON payload without network access
    RenderPricing {
        /// Pricing payload JSON file
        #[arg(long)]
        input: String,

        /// Write the card HTML here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `widget-loader.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Forward the host page's query string instead of rendering the form
    #[serde(default)]
    pub query_passthrough: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            timeout_secs: default_timeout(),
            query_passthrough: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_static_base")]
    pub static_base: String,

    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_base: default_static_base(),
            pixel_ratio: default_pixel_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BotConfig {
    #[serde(default)]
    pub site_key: String,
}

// Serde default helpers
fn default_api_base() -> String { DEFAULT_API_BASE.to_string() }
fn default_static_base() -> String { DEFAULT_STATIC_BASE.to_string() }
fn default_timeout() -> u64 { 30 }
fn default_pixel_ratio() -> f32 { 1.0 }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("widget-loader.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(content: &str) -> AppConfig {
    serde_yaml::from_str(content).unwrap_or_default()
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve loader settings: CLI flags win over the config file.
pub fn build_loader_settings(
    config: &AppConfig,
    api_base: Option<&str>,
    static_base: Option<&str>,
) -> LoaderSettings {
    LoaderSettings {
        endpoints: Endpoints::new(
            api_base.unwrap_or(&config.api.base_url),
            static_base.unwrap_or(&config.assets.static_base),
        ),
        query_passthrough: config.api.query_passthrough,
        bot_site_key: config.bot.site_key.clone(),
        pixel_ratio: config.assets.pixel_ratio,
    }
}
