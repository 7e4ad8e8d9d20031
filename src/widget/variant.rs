use std::fmt;
use std::str::FromStr;

use crate::net::endpoints::Endpoints;
use crate::net::fetch::StatusPolicy;

/// Opaque identifier taken from the mount's class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(pub String);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The widget families served by the backend. They share one pipeline and
/// differ only in the data returned by the methods below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetVariant {
    Contact,
    Pricing,
    PricingPreview,
    Booking,
}

/// How the fetched payload reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Insert the config markup and wire up the form engine.
    Form,
    /// Build pricing cards natively.
    Cards,
    /// Hand the JSON to a global registered by an external runtime script.
    External { global: &'static str },
}

/// Whether widget activation waits for a script to finish loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    Deferred,
    Immediate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptAsset {
    pub src: String,
    pub mode: ScriptMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPlan {
    pub stylesheet: String,
    pub script: Option<ScriptAsset>,
}

impl WidgetVariant {
    pub const ALL: [WidgetVariant; 4] = [
        WidgetVariant::Contact,
        WidgetVariant::Pricing,
        WidgetVariant::PricingPreview,
        WidgetVariant::Booking,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WidgetVariant::Contact => "contact",
            WidgetVariant::Pricing => "pricing",
            WidgetVariant::PricingPreview => "pricing-preview",
            WidgetVariant::Booking => "booking",
        }
    }

    pub fn class_prefix(&self) -> &'static str {
        match self {
            WidgetVariant::Pricing => "clicflo-widget-",
            _ => "cont-app-",
        }
    }

    pub fn config_url(&self, endpoints: &Endpoints, id: &WidgetId) -> String {
        match self {
            WidgetVariant::Contact => endpoints.widget_config(id),
            WidgetVariant::Pricing => endpoints.pricing(id),
            WidgetVariant::PricingPreview => endpoints.pricing_preview(id),
            WidgetVariant::Booking => endpoints.booking(id),
        }
    }

    pub fn status_policy(&self) -> StatusPolicy {
        match self {
            WidgetVariant::PricingPreview => StatusPolicy::Strict,
            _ => StatusPolicy::Lenient,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        match self {
            WidgetVariant::Contact => RenderMode::Form,
            WidgetVariant::Pricing => RenderMode::Cards,
            WidgetVariant::PricingPreview | WidgetVariant::Booking => RenderMode::External {
                global: "renderReactApp",
            },
        }
    }

    pub fn assets(&self, endpoints: &Endpoints) -> AssetPlan {
        match self {
            WidgetVariant::Contact | WidgetVariant::Pricing => AssetPlan {
                stylesheet: endpoints.asset("style.css"),
                script: None,
            },
            WidgetVariant::PricingPreview => AssetPlan {
                stylesheet: endpoints.asset("pricing.css"),
                script: Some(ScriptAsset {
                    src: endpoints.asset("pricing.js"),
                    mode: ScriptMode::Deferred,
                }),
            },
            WidgetVariant::Booking => AssetPlan {
                stylesheet: endpoints.asset("index.css"),
                script: Some(ScriptAsset {
                    src: endpoints.asset("appointment2.js"),
                    mode: ScriptMode::Immediate,
                }),
            },
        }
    }
}

impl fmt::Display for WidgetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetVariant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| format!("unknown widget variant '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_urls_per_variant() {
        let e = Endpoints::new("https://api.test", "https://cdn.test");
        let id = WidgetId("abc-123".into());
        assert_eq!(WidgetVariant::Contact.config_url(&e, &id), "https://api.test/widgets/abc-123");
        assert_eq!(
            WidgetVariant::PricingPreview.config_url(&e, &id),
            "https://api.test/widgets/v2/pricing/abc-123/"
        );
        assert_eq!(WidgetVariant::Pricing.config_url(&e, &id), "https://api.test/widgets/pr/abc-123");
        assert_eq!(WidgetVariant::Booking.config_url(&e, &id), "https://api.test/widgets/booking/abc-123");
    }

    #[test]
    fn variant_names_round_trip_through_from_str() {
        for v in WidgetVariant::ALL {
            assert_eq!(v.name().parse::<WidgetVariant>(), Ok(v));
        }
        assert!("carousel".parse::<WidgetVariant>().is_err());
    }
}
