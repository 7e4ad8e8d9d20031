use serde_json::json;
use widget_loader::dom::page::HostPage;
use widget_loader::dom::serialize::inner_html;
use widget_loader::form::engine::{SubmitOutcome, fill_field};
use widget_loader::host::RecordingHost;
use widget_loader::model::response::SubmitResponse;
use widget_loader::response::dispatcher::DispatchEffect;
use widget_loader::widget::loader::{FormWidget, LoadedWidget, WidgetLoader};
use widget_loader::WidgetVariant;

use crate::common::fixtures::{CONTACT_FORM, contact_config, contact_page, settings, widget_url};
use crate::common::stub_api::StubApi;

mod common;

fn submit_with(reply: serde_json::Value) -> (HostPage, FormWidget, RecordingHost, SubmitOutcome, String) {
    let api = StubApi::new()
        .on_get(&widget_url(), contact_config(CONTACT_FORM))
        .on_post(&widget_url(), reply);
    let mut host = RecordingHost::new();
    let mut page = contact_page();
    let loaded = WidgetLoader::new(WidgetVariant::Contact, settings())
        .boot(&mut page, &api, &mut host)
        .unwrap();
    let LoadedWidget::Form(mut form) = loaded else {
        panic!("expected a form widget");
    };

    for (id, value) in [("name", "Ada"), ("agree", "true"), ("message", "Hello there")] {
        let field = form.engine.field(id).unwrap().clone();
        fill_field(&mut page.tree, &field, &[value.to_string()]);
    }
    let before = inner_html(&page.tree, form.mount.node);

    let outcome = form.submit(&mut page, &api, &mut host).unwrap();
    (page, form, host, outcome, before)
}

// ============================================================================
// success_msg
// ============================================================================

#[test]
fn success_message_replaces_the_form() {
    let (page, form, _host, outcome, _) = submit_with(json!({"action": "success_msg", "value": "Thanks!"}));

    assert!(matches!(outcome, SubmitOutcome::Dispatched { effect: DispatchEffect::ShowedMessage { .. }, .. }));
    let markup = inner_html(&page.tree, form.mount.node);
    assert!(markup.starts_with("<p class=\"text-xl font-semibold text-black py-6 text-center mt-10\">Thanks!</p>"));
    assert!(markup.contains(">Close</button>"));
    assert!(!markup.contains("<form"));
}

#[test]
fn message_text_is_not_parsed_as_markup() {
    let (page, form, _host, _, _) = submit_with(json!({"action": "success_msg", "value": "<b>hi</b>"}));
    let markup = inner_html(&page.tree, form.mount.node);
    assert!(markup.contains("&lt;b&gt;hi&lt;/b&gt;"));
}

#[test]
fn closing_the_message_restores_identical_markup() {
    let (mut page, mut form, _host, outcome, before) =
        submit_with(json!({"action": "success_msg", "value": "Thanks!"}));

    let SubmitOutcome::Dispatched {
        effect: DispatchEffect::ShowedMessage { close_button },
        ..
    } = outcome
    else {
        panic!("expected a success message");
    };

    let mount = form.mount.clone();
    assert!(form.engine.dispatcher.click(&mut page, &mount, close_button).unwrap());
    assert_eq!(inner_html(&page.tree, form.mount.node), before);
    assert!(!form.close_message(&mut page).unwrap(), "nothing left to close");
}

#[test]
fn restored_form_can_submit_again() {
    let api = StubApi::new()
        .on_get(&widget_url(), contact_config(CONTACT_FORM))
        .on_post(&widget_url(), json!({"action": "success_msg", "value": "Thanks!"}));
    let mut host = RecordingHost::new();
    let mut page = contact_page();
    let mut loaded = WidgetLoader::new(WidgetVariant::Contact, settings())
        .boot(&mut page, &api, &mut host)
        .unwrap();
    let form = loaded.as_form_mut().unwrap();
    for (id, value) in [("name", "Ada"), ("agree", "true")] {
        let field = form.engine.field(id).unwrap().clone();
        fill_field(&mut page.tree, &field, &[value.to_string()]);
    }

    form.submit(&mut page, &api, &mut host).unwrap();
    form.close_message(&mut page).unwrap();
    form.submit(&mut page, &api, &mut host).unwrap();

    assert_eq!(api.submissions().len(), 2);
}

// ============================================================================
// redirect_url / hide_form / unknown
// ============================================================================

#[test]
fn redirect_navigates_the_host() {
    let (_page, _form, host, outcome, _) =
        submit_with(json!({"action": "redirect_url", "value": "https://shop.test/thanks"}));

    assert!(matches!(
        outcome,
        SubmitOutcome::Dispatched { response: SubmitResponse::Redirect { .. }, .. }
    ));
    assert_eq!(host.navigations(), vec!["https://shop.test/thanks"]);
}

#[test]
fn hide_form_sets_display_none_and_keeps_markup() {
    let (page, form, _host, outcome, before) = submit_with(json!({"action": "hide_form"}));

    assert!(matches!(outcome, SubmitOutcome::Dispatched { effect: DispatchEffect::HidForm, .. }));
    assert_eq!(page.tree.style_property(form.mount.node, "display").as_deref(), Some("none"));
    assert_eq!(inner_html(&page.tree, form.mount.node), before);
}

#[test]
fn unknown_action_changes_nothing() {
    let (page, form, host, outcome, before) = submit_with(json!({"action": "confetti", "value": 3}));

    assert!(matches!(outcome, SubmitOutcome::Dispatched { effect: DispatchEffect::Ignored, .. }));
    assert_eq!(inner_html(&page.tree, form.mount.node), before);
    assert!(page.tree.style_property(form.mount.node, "display").is_none());
    assert!(host.navigations().is_empty());
}

#[test]
fn error_body_without_action_is_ignored() {
    let (_page, _form, _host, outcome, _) = submit_with(json!({"errors": {"email": ["invalid"]}}));
    assert!(matches!(
        outcome,
        SubmitOutcome::Dispatched { response: SubmitResponse::Unknown, effect: DispatchEffect::Ignored }
    ));
}
