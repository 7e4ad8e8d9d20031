use tracing::debug;

use crate::dom::builder::HtmlNode;
use crate::dom::page::HostPage;
use crate::dom::sanitize::sanitize_fragment;
use crate::dom::tree::{NodeId, RenderTree};
use crate::error::WidgetError;
use crate::host::HostEnvironment;
use crate::model::pricing::{Appearance, Feature, PlanCard, Price, TextAppearance};
use crate::pricing::style::{button_style, currency_symbol, icon_for};
use crate::widget::mount::WidgetMount;

pub const CARD_HOLDER_ID: &str = "cardHolder";
const CARD_HOLDER_CLASS: &str = "flex gap-x-4 items-center flex-wrap space-y-2 min-h-screen";
const CARD_CLASS: &str = "max-w-64 mx-auto bg-white border border-gray-200 rounded-lg shadow overflow-hidden relative";

// ============================================================================
// Card rendering
// ============================================================================

fn text_style(color: &str, font: i32) -> String {
    format!("color: {}; font-size: {}px;", color, font)
}

fn render_feature(feature: &Feature, appearance: &TextAppearance) -> HtmlNode {
    let mut icon_slot = HtmlNode::element("span").style("margin-right: 8px;");
    if let Some(icon) = icon_for(feature.icon) {
        icon_slot = icon_slot.child(icon);
    }

    HtmlNode::element("li")
        .style(text_style(&appearance.color, appearance.font))
        .class("flex items-center")
        .child(icon_slot)
        .child(HtmlNode::text(feature.text.as_str()))
        .child_if(feature.hint.as_deref().is_some_and(|h| !h.is_empty()), || {
            HtmlNode::element("span")
                .style("font-size: 12px; color: #6b7280; margin-left: 8px;")
                .child(HtmlNode::text(format!("({})", feature.hint.as_deref().unwrap_or_default())))
        })
}

fn render_price(price: &Price, appearance: &TextAppearance) -> Vec<HtmlNode> {
    let mut line = HtmlNode::element("p")
        .class("text-center")
        .style(text_style(&appearance.color, appearance.font));
    if let Some(prefix) = price.prefix.as_deref() {
        line = line.child(HtmlNode::text(prefix));
    }
    line = line.child(
        HtmlNode::element("span")
            .style(text_style(&appearance.color, appearance.font.saturating_add(4)))
            .child(HtmlNode::element("sup").child(HtmlNode::text(currency_symbol(&price.currency))))
            .child(HtmlNode::text(price.amount.as_str())),
    );
    if let Some(postfix) = price.postfix.as_deref().filter(|p| !p.is_empty()) {
        line = line.child(HtmlNode::text(format!("/{}", postfix)));
    }

    let caption = HtmlNode::element("span")
        .class("text-xs mx-auto ")
        .child(HtmlNode::text(price.caption.clone().unwrap_or_default()));

    vec![line, caption]
}

fn render_card(card: &PlanCard, appearance: &Appearance) -> HtmlNode {
    let class = if card.featured_column {
        format!("{} -translate-y-5", CARD_CLASS)
    } else {
        CARD_CLASS.to_string()
    };

    let mut body = HtmlNode::element("div").class("p-6");
    if let Some(title) = card.title.as_deref() {
        body = body.child(
            HtmlNode::element("h2")
                .class("text-center")
                .style(text_style(&appearance.title.color, appearance.title.font))
                .child(HtmlNode::text(title)),
        );
    }
    body = body.child(
        HtmlNode::element("p")
            .class("text-center opacity-70")
            .style(text_style(&appearance.title.caption_color, appearance.title.font.saturating_sub(8)))
            .child(HtmlNode::text(card.caption.clone().unwrap_or_default())),
    );
    if let Some(features) = &card.features {
        body = body.child(
            HtmlNode::element("ul")
                .class("mt-4 space-y-2 text-xs text-gray-700 flex flex-col items-start mx-auto w-fit")
                .children(features.iter().map(|f| render_feature(f, &appearance.feature))),
        );
    }

    let mut footer = HtmlNode::element("div").class("mt-6 flex flex-col");
    if let Some(price) = &card.price {
        footer = footer.children(render_price(price, &appearance.price));
    }
    if let Some(button) = &card.button {
        footer = footer
            .child(
                HtmlNode::element("button")
                    .attr("type", "button")
                    .style(button_style(&appearance.button, card.featured_column))
                    .class("mt-4 mx-auto hover:opacity-80 duration-150")
                    .attr("data-link-type", button.link.link_type.as_str())
                    .attr("data-link-value", button.link.link_value.as_str())
                    .attr("data-new-tab", button.link.new_tab.to_string())
                    .child(HtmlNode::text(button.text.as_str())),
            )
            .child(
                HtmlNode::element("span")
                    .class("text-xs mx-auto mt-1.5")
                    .child(HtmlNode::text(button.caption.clone().unwrap_or_default())),
            );
    }
    body = body.child(footer);

    HtmlNode::element("div")
        .class(&class)
        .child_if(card.featured_column, || {
            HtmlNode::element("div")
                .class("bg-yellow-400 w-fit px-8 py-1 absolute rotate-45 -right-8 top-4")
                .child(HtmlNode::text(card.ribbon_text.clone().unwrap_or_default()))
        })
        .child_if(card.picture.is_some(), || {
            HtmlNode::element("img")
                .attr("src", card.picture.clone().unwrap_or_default())
                .attr("alt", card.title.clone().unwrap_or_default())
                .class("w-72 h-40 object-cover")
        })
        .child(body)
}

/// Build the card holder with one card per plan, in payload order.
pub fn render_cards(content: &[PlanCard], appearance: &Appearance) -> HtmlNode {
    HtmlNode::element("div")
        .attr("id", CARD_HOLDER_ID)
        .class(CARD_HOLDER_CLASS)
        .children(content.iter().map(|card| render_card(card, appearance)))
}

/// Sanitize the rendered cards and append them to the mount.
pub fn mount_cards(page: &mut HostPage, mount: &WidgetMount, cards: HtmlNode) -> Result<NodeId, WidgetError> {
    mount.ensure_live(page)?;
    let cards = sanitize_fragment(cards)
        .ok_or_else(|| WidgetError::Host("card fragment was removed by the sanitizer".to_string()))?;
    let holder = cards.append_to(&mut page.tree, mount.node);
    debug!(widget = %mount.id, "pricing cards mounted");
    Ok(holder)
}

// ============================================================================
// Button activation
// ============================================================================

/// Follow a card button's link. Returns false when `node` carries no link.
pub fn activate_button(tree: &RenderTree, node: NodeId, host: &mut dyn HostEnvironment) -> bool {
    let Some(value) = tree.attr(node, "data-link-value") else {
        return false;
    };
    let new_tab = tree.attr(node, "data-new-tab") == Some("true");

    match tree.attr(node, "data-link-type") {
        Some("URL") if new_tab => host.open_new_tab(value),
        Some("URL") => host.navigate(value),
        Some("EMAIL") => host.navigate(&format!("mailto:{}", value)),
        _ => return false,
    }
    true
}
