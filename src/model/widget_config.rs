use serde::{Deserialize, Serialize};

/// Payload returned by the widget config endpoint.
///
/// Only `html` is guaranteed; richer deployments add pre-fill mappings,
/// spam protection and branding. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub html: String,

    #[serde(default)]
    pub pre_fill_values: Vec<PrefillMapping>,

    #[serde(default)]
    pub spam_protection: bool,

    #[serde(default)]
    pub admin_brand_info: Option<BrandInfo>,

    #[serde(default)]
    pub user_brand_info: Option<BrandInfo>,
}

/// Copy host-page query parameter `parameter_name` into field `field_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefillMapping {
    pub field_id: String,
    pub parameter_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandInfo {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

impl BrandInfo {
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty) && self.logo.as_deref().is_none_or(str::is_empty)
    }
}

impl WidgetConfig {
    pub fn from_markup(html: &str) -> Self {
        Self {
            html: html.to_string(),
            pre_fill_values: Vec::new(),
            spam_protection: false,
            admin_brand_info: None,
            user_brand_info: None,
        }
    }

    /// Brand shown under the form: the owner's own brand wins over the
    /// platform default.
    pub fn effective_brand(&self) -> Option<&BrandInfo> {
        self.user_brand_info
            .as_ref()
            .filter(|b| !b.is_empty())
            .or(self.admin_brand_info.as_ref().filter(|b| !b.is_empty()))
    }
}
