use crate::widget::variant::WidgetId;

pub const DEFAULT_API_BASE: &str = "https://widgetcontact.myfindata.com";
pub const DEFAULT_STATIC_BASE: &str = "https://widgetcontact.myfindata.com/static";
pub const RECAPTCHA_SCRIPT: &str = "https://www.google.com/recaptcha/api.js";

/// URL layout of the widget backend and its static asset host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub static_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_STATIC_BASE)
    }
}

impl Endpoints {
    pub fn new(api_base: &str, static_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            static_base: static_base.trim_end_matches('/').to_string(),
        }
    }

    fn widgets(&self, path: &str) -> String {
        format!("{}/widgets/{}", self.api_base, path)
    }

    /// `GET` form widget config; also the form submission target.
    pub fn widget_config(&self, id: &WidgetId) -> String {
        self.widgets(&id.0)
    }

    pub fn submission(&self, id: &WidgetId) -> String {
        self.widgets(&id.0)
    }

    pub fn pricing(&self, id: &WidgetId) -> String {
        self.widgets(&format!("pr/{}", id.0))
    }

    pub fn pricing_preview(&self, id: &WidgetId) -> String {
        self.widgets(&format!("v2/pricing/{}/", id.0))
    }

    pub fn booking(&self, id: &WidgetId) -> String {
        self.widgets(&format!("booking/{}", id.0))
    }

    /// Direct form post used when the host page forwards its own query string.
    pub fn query_passthrough(&self, id: &WidgetId, query: &str) -> String {
        self.widgets(&format!("widget/{}/form/?{}", id.0, query))
    }

    pub fn asset(&self, file: &str) -> String {
        format!("{}/{}", self.static_base, file.trim_start_matches('/'))
    }

    pub fn recaptcha_script(&self, site_key: &str) -> String {
        format!("{}?render={}", RECAPTCHA_SCRIPT, site_key)
    }
}
