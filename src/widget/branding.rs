use crate::dom::builder::HtmlNode;
use crate::dom::sanitize::sanitize_fragment;
use crate::model::widget_config::BrandInfo;

/// "Powered by" footer shown under a form widget.
pub fn brand_footer(brand: &BrandInfo) -> Option<HtmlNode> {
    let name = brand.name.clone().unwrap_or_default();

    let mut inner = HtmlNode::element("span").class("widget-brand-label");
    if !name.is_empty() {
        inner = inner.child(HtmlNode::text(format!("Powered by {}", name)));
    }

    let logo = brand
        .logo
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(|src| {
            HtmlNode::element("img")
                .class("widget-brand-logo")
                .attr("src", src)
                .attr("alt", name.clone())
        });

    let content = match brand.redirect_url.as_deref().filter(|u| !u.is_empty()) {
        Some(href) => HtmlNode::element("a")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer"),
        None => HtmlNode::element("span"),
    }
    .children(logo)
    .child(inner);

    sanitize_fragment(
        HtmlNode::element("div")
            .class("widget-branding flex items-center justify-center gap-2 mt-4 text-xs")
            .child(content),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_links_to_brand_page() {
        let brand = BrandInfo {
            logo: Some("https://cdn.test/logo.png".into()),
            name: Some("Acme".into()),
            redirect_url: Some("https://acme.test".into()),
        };
        let footer = brand_footer(&brand).unwrap();
        let link = footer.walk().into_iter().find(|n| n.tag() == Some("a")).unwrap();
        assert_eq!(link.get_attr("href"), Some("https://acme.test"));
        assert!(footer.walk().iter().any(|n| matches!(n, HtmlNode::Text(t) if t == "Powered by Acme")));
    }
}
