use widget_loader::dom::serialize::inner_html;
use widget_loader::host::{HostEffect, RecordingHost};
use widget_loader::model::pricing::{FeatureIcon, PricingPayload};
use widget_loader::pricing::renderer::{CARD_HOLDER_ID, activate_button, render_cards};
use widget_loader::pricing::style::currency_symbol;
use widget_loader::widget::loader::{LoadedWidget, WidgetLoader};
use widget_loader::WidgetVariant;

use crate::common::fixtures::{API, STATIC, host_page, pricing_payload, settings};
use crate::common::stub_api::StubApi;

mod common;

fn payload() -> PricingPayload {
    serde_json::from_value(pricing_payload()).unwrap()
}

// ============================================================================
// Payload decoding
// ============================================================================

#[test]
fn payload_decodes_icons_amounts_and_links() {
    let p = payload();
    assert_eq!(p.content.len(), 2);
    let features = p.content[0].features.as_ref().unwrap();
    assert_eq!(features[0].icon, FeatureIcon::Check);
    assert_eq!(features[1].icon, FeatureIcon::Cross);
    assert_eq!(p.content[0].price.as_ref().unwrap().amount, "9");
    assert_eq!(p.content[1].price.as_ref().unwrap().amount, "29.50");
}

#[test]
fn unknown_icon_code_falls_back_to_none() {
    let feature: widget_loader::model::pricing::Feature =
        serde_json::from_value(serde_json::json!({"icon": "ZZ", "text": "x"})).unwrap();
    assert_eq!(feature.icon, FeatureIcon::None);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn currency_mapping() {
    assert_eq!(currency_symbol("USD"), "$");
    assert_eq!(currency_symbol("EUR"), "€");
    assert_eq!(currency_symbol("JPY"), "JPY");
}

#[test]
fn one_card_per_plan_in_order() {
    let holder = render_cards(&payload().content, &payload().appearance);
    assert_eq!(holder.get_attr("id"), Some(CARD_HOLDER_ID));

    let titles: Vec<String> = holder
        .walk()
        .into_iter()
        .filter(|n| n.tag() == Some("h2"))
        .map(|n| match n {
            widget_loader::dom::builder::HtmlNode::Element { children, .. } => match &children[0] {
                widget_loader::dom::builder::HtmlNode::Text(t) => t.clone(),
                _ => String::new(),
            },
            _ => String::new(),
        })
        .collect();
    assert_eq!(titles, vec!["Basic", "Pro"]);
}

#[test]
fn pricing_widget_mounts_sanitized_cards() {
    let api = StubApi::new().on_get(&format!("{}/widgets/pr/xyz", API), pricing_payload());
    let mut page = host_page("<div class=\"clicflo-widget-xyz\"></div>");

    let loaded = WidgetLoader::new(WidgetVariant::Pricing, settings())
        .boot(&mut page, &api, &mut RecordingHost::new())
        .unwrap();
    let LoadedWidget::Cards { mount, holder, .. } = &loaded else {
        panic!("expected cards");
    };

    assert_eq!(page.tree.parent(*holder), Some(mount.node));
    let markup = inner_html(&page.tree, mount.node);
    assert!(markup.contains("<sup>$</sup>9"));
    assert!(markup.contains("<sup>€</sup>29.50"));
    assert!(markup.contains("/mo"));
    assert!(markup.contains("-translate-y-5"));
    assert!(markup.contains(">Popular</div>"));
    assert!(markup.contains("(email only)"));
    assert!(page.to_html().contains(&format!("{}/style.css", STATIC)));
}

#[test]
fn featured_card_button_is_filled_even_when_outline_is_configured() {
    let holder = render_cards(&payload().content, &payload().appearance);
    let buttons: Vec<_> = holder.walk().into_iter().filter(|n| n.tag() == Some("button")).collect();

    let plain = buttons[0].get_attr("style").unwrap();
    assert!(plain.contains("border: 1px solid #ff0000"));
    assert!(plain.contains("padding: 9px 36px; font-size: 16px;"));

    let featured = buttons[1].get_attr("style").unwrap();
    assert!(featured.contains("background-color: #ff0000"));
    assert!(!featured.contains("border: 1px solid"));
}

#[test]
fn extreme_font_sizes_saturate_instead_of_overflowing() {
    let mut p = payload();
    p.appearance.title.font = i32::MIN;
    p.appearance.price.font = i32::MAX;
    let holder = render_cards(&p.content, &p.appearance);

    let styles: Vec<String> = holder
        .walk()
        .into_iter()
        .filter_map(|n| n.get_attr("style").map(str::to_string))
        .collect();
    assert!(styles.iter().any(|s| s.contains(&format!("font-size: {}px", i32::MIN))));
    assert!(styles.iter().any(|s| s.contains(&format!("font-size: {}px", i32::MAX))));
}

#[test]
fn price_font_is_four_above_configured_font() {
    let holder = render_cards(&payload().content, &payload().appearance);
    let amount_span = holder
        .walk()
        .into_iter()
        .find(|n| n.tag() == Some("span") && n.get_attr("style").is_some_and(|s| s.contains("font-size: 24px")))
        .is_some();
    assert!(amount_span);
}

// ============================================================================
// Button activation
// ============================================================================

#[test]
fn buttons_navigate_open_tabs_or_mail() {
    let api = StubApi::new().on_get(&format!("{}/widgets/pr/xyz", API), pricing_payload());
    let mut page = host_page("<div class=\"clicflo-widget-xyz\"></div>");
    let mut host = RecordingHost::new();
    WidgetLoader::new(WidgetVariant::Pricing, settings())
        .boot(&mut page, &api, &mut host)
        .unwrap();

    let buttons = page.tree.find_all(page.tree.root(), |el| el.tag == "button");
    assert_eq!(buttons.len(), 2);
    assert!(activate_button(&page.tree, buttons[0], &mut host));
    assert!(activate_button(&page.tree, buttons[1], &mut host));

    assert_eq!(
        host.effects,
        vec![
            HostEffect::OpenedTab { url: "https://shop.test/basic".into() },
            HostEffect::Navigated { url: "mailto:sales@shop.test".into() },
        ]
    );
}

#[test]
fn unknown_link_type_still_renders_every_card_but_button_does_nothing() {
    let mut raw = pricing_payload();
    raw["content"][0]["button"]["link"]["link_type"] = serde_json::json!("PHONE");
    let api = StubApi::new().on_get(&format!("{}/widgets/pr/xyz", API), raw);
    let mut page = host_page("<div class=\"clicflo-widget-xyz\"></div>");
    let mut host = RecordingHost::new();
    WidgetLoader::new(WidgetVariant::Pricing, settings())
        .boot(&mut page, &api, &mut host)
        .unwrap();

    let buttons = page.tree.find_all(page.tree.root(), |el| el.tag == "button");
    assert_eq!(buttons.len(), 2);
    assert!(!activate_button(&page.tree, buttons[0], &mut host));
    assert!(activate_button(&page.tree, buttons[1], &mut host));
    assert_eq!(host.effects, vec![HostEffect::Navigated { url: "mailto:sales@shop.test".into() }]);
}

#[test]
fn elements_without_link_data_are_not_buttons() {
    let page = host_page("<p id=\"x\">plain</p>");
    let p = page.tree.element_by_id(page.tree.root(), "x").unwrap();
    let mut host = RecordingHost::new();
    assert!(!activate_button(&page.tree, p, &mut host));
    assert!(host.effects.is_empty());
}
