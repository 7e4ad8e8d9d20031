use serde_json::{Value, json};
use widget_loader::dom::page::HostPage;
use widget_loader::net::endpoints::Endpoints;
use widget_loader::widget::loader::LoaderSettings;

pub const API: &str = "https://api.test";
pub const STATIC: &str = "https://cdn.test/static";
pub const PAGE_URL: &str = "https://shop.test/contact";

pub fn settings() -> LoaderSettings {
    LoaderSettings {
        endpoints: Endpoints::new(API, STATIC),
        ..LoaderSettings::default()
    }
}

pub fn host_page(body: &str) -> HostPage {
    host_page_at(body, PAGE_URL)
}

pub fn host_page_at(body: &str, url: &str) -> HostPage {
    let html = format!(
        "<!DOCTYPE html><html><head><title>Host</title></head><body>{}</body></html>",
        body
    );
    HostPage::parse(&html, url).unwrap()
}

/// Contact form covering every field kind the introspector knows.
pub const CONTACT_FORM: &str = r#"<form>
  <input type="text" id="name" aria-required="true"><div class="error"></div>
  <input type="email" id="email"><div class="error"></div>
  <textarea id="message"></textarea><div class="error"></div>
  <input type="file" id="resume"><div class="error"></div>
  <div role="radiogroup" data-type="choice" id="plan">
    <label><input type="radio" name="plan" value="basic"> Basic</label>
    <label><input type="radio" name="plan" value="pro"> Pro</label>
  </div><div class="error"></div>
  <div role="group" data-type="multiple_choice" id="colors">
    <label><input type="checkbox" name="colors" value="red"> Red</label>
    <label><input type="checkbox" name="colors" value="green"> Green</label>
    <label><input type="checkbox" name="colors" value="blue"> Blue</label>
  </div><div class="error"></div>
  <input type="checkbox" id="agree" required><div class="error"></div>
  <div role="radiogroup" data-type="scale" id="nps">
    <input type="radio" name="nps" value="1"><input type="radio" name="nps" value="2"><input type="radio" name="nps" value="3">
  </div><div class="error"></div>
  <div data-type="signature" id="sig"><canvas width="300" height="100"></canvas><input type="hidden" id="sig-value"></div><div class="error"></div>
  <button type="submit">Send</button>
</form>"#;

pub fn contact_config(html: &str) -> Value {
    json!({
        "html": html,
        "pre_fill_values": [],
        "spam_protection": false,
    })
}

pub fn pricing_payload() -> Value {
    json!({
        "content": [
            {
                "title": "Basic",
                "caption": "For individuals",
                "featured_column": false,
                "features": [
                    {"icon": "CH", "text": "1 user"},
                    {"icon": "CR", "text": "Priority support", "hint": "email only"}
                ],
                "price": {"currency": "USD", "amount": 9, "postfix": "mo"},
                "button": {"text": "Start", "link": {"link_type": "URL", "link_value": "https://shop.test/basic", "new_tab": true}}
            },
            {
                "title": "Pro",
                "featured_column": true,
                "ribbon_text": "Popular",
                "features": [{"icon": "M", "text": "Unlimited users"}],
                "price": {"currency": "EUR", "amount": "29.50"},
                "button": {"text": "Contact us", "link": {"link_type": "EMAIL", "link_value": "sales@shop.test", "new_tab": false}}
            }
        ],
        "appearance": {
            "title": {"color": "#000000", "caption_color": "#555555", "font": 24},
            "feature": {"color": "#333333", "font": 14},
            "price": {"color": "#111111", "caption_color": "#777777", "font": 20},
            "button": {"type": "O", "size": "L", "button_color": "#ff0000", "label_color": "#ffffff"}
        }
    })
}

pub const WIDGET_ID: &str = "abc-123";

pub fn widget_url() -> String {
    format!("{}/widgets/{}", API, WIDGET_ID)
}

/// Host page with a contact mount for [`WIDGET_ID`].
pub fn contact_page() -> HostPage {
    host_page(&format!("<h1>Welcome</h1><div class=\"wrapper cont-app-{}\"></div>", WIDGET_ID))
}
