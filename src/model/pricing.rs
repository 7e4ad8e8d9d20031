use serde::{Deserialize, Serialize};

// ============================================================================
// Pricing payload (GET /widgets/pr/{uuid})
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPayload {
    #[serde(default)]
    pub content: Vec<PlanCard>,
    #[serde(default)]
    pub appearance: Appearance,
}

/// One pricing tier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub featured_column: bool,
    #[serde(default)]
    pub ribbon_text: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub button: Option<CardButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub icon: FeatureIcon,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureIcon {
    #[serde(rename = "CH")]
    Check,
    #[serde(rename = "CR")]
    Cross,
    #[serde(rename = "M")]
    Dash,
    #[default]
    #[serde(rename = "N")]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub currency: String,
    #[serde(default, deserialize_with = "amount_as_string")]
    pub amount: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub postfix: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Amounts arrive either as JSON numbers or decimal strings.
fn amount_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardButton {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub link_type: LinkType,
    #[serde(default)]
    pub link_value: String,
    #[serde(default)]
    pub new_tab: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkType {
    Url,
    Email,
    /// Link types this loader does not act on; the card still renders.
    #[serde(other)]
    Other,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Url => "URL",
            LinkType::Email => "EMAIL",
            LinkType::Other => "OTHER",
        }
    }
}

// ============================================================================
// Appearance tokens (shared by every card)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(default)]
    pub title: TextAppearance,
    #[serde(default)]
    pub feature: TextAppearance,
    #[serde(default)]
    pub price: TextAppearance,
    #[serde(default)]
    pub button: ButtonAppearance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAppearance {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_caption_color")]
    pub caption_color: String,
    #[serde(default = "default_font")]
    pub font: i32,
}

impl Default for TextAppearance {
    fn default() -> Self {
        Self {
            color: default_color(),
            caption_color: default_caption_color(),
            font: default_font(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonAppearance {
    #[serde(rename = "type", default)]
    pub kind: ButtonKind,
    #[serde(default)]
    pub size: ButtonSize,
    #[serde(default = "default_button_color")]
    pub button_color: String,
    #[serde(default = "default_label_color")]
    pub label_color: String,
}

impl Default for ButtonAppearance {
    fn default() -> Self {
        Self {
            kind: ButtonKind::default(),
            size: ButtonSize::default(),
            button_color: default_button_color(),
            label_color: default_label_color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonKind {
    #[default]
    #[serde(rename = "F")]
    Filled,
    #[serde(rename = "O")]
    Outline,
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonSize {
    S,
    L,
    #[default]
    #[serde(other)]
    M,
}

// Serde default helpers
fn default_color() -> String { "#111827".to_string() }
fn default_caption_color() -> String { "#6b7280".to_string() }
fn default_font() -> i32 { 16 }
fn default_button_color() -> String { "#2563eb".to_string() }
fn default_label_color() -> String { "#ffffff".to_string() }
