use crate::dom::builder::HtmlNode;
use crate::model::pricing::{ButtonAppearance, ButtonKind, ButtonSize, FeatureIcon};

// ============================================================================
// Appearance token mappings
// ============================================================================

const COMMON_BUTTON_STYLE: &str = "display: inline-block; border-radius: 4px; text-align: center; cursor: pointer;";

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "\u{20ac}",
        other => other,
    }
}

pub fn size_style(size: ButtonSize) -> &'static str {
    match size {
        ButtonSize::S => "padding: 5px 20px; font-size: 12px;",
        ButtonSize::M => "padding: 9px 28px; font-size: 14px;",
        ButtonSize::L => "padding: 9px 36px; font-size: 16px;",
    }
}

/// Inline style for a card's call-to-action. Featured cards always get the
/// filled look regardless of the configured kind.
pub fn button_style(button: &ButtonAppearance, featured: bool) -> String {
    if button.kind == ButtonKind::Filled || featured {
        return format!(
            "{} background-color: {}; color: {}; {}",
            COMMON_BUTTON_STYLE,
            button.button_color,
            button.label_color,
            size_style(button.size)
        );
    }
    match button.kind {
        ButtonKind::Outline => format!(
            "{} background-color: transparent; border: 1px solid {}; color: {}; {}",
            COMMON_BUTTON_STYLE,
            button.button_color,
            button.label_color,
            size_style(button.size)
        ),
        _ => COMMON_BUTTON_STYLE.to_string(),
    }
}

fn stroke_icon(color_class: &str, path: &str) -> HtmlNode {
    HtmlNode::element("svg")
        .attr("xmlns", "http://www.w3.org/2000/svg")
        .class(&format!("w-4 h-4 {}", color_class))
        .attr("fill", "none")
        .attr("viewBox", "0 0 24 24")
        .attr("stroke", "currentColor")
        .attr("stroke-width", "2")
        .child(
            HtmlNode::element("path")
                .attr("stroke-linecap", "round")
                .attr("stroke-linejoin", "round")
                .attr("d", path),
        )
}

/// Icon shown before a feature line; `None` renders nothing.
pub fn icon_for(icon: FeatureIcon) -> Option<HtmlNode> {
    match icon {
        FeatureIcon::Check => Some(stroke_icon("text-green-500", "M5 13l4 4L19 7")),
        FeatureIcon::Cross => Some(stroke_icon("text-red-500", "M6 18L18 6M6 6l12 12")),
        FeatureIcon::Dash => Some(stroke_icon("text-gray-500", "M4 12h16")),
        FeatureIcon::None => None,
    }
}
