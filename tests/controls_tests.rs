use widget_loader::dom::page::HostPage;
use widget_loader::form::rating::{RatingControl, RatingStyle};
use widget_loader::widget::discovery::discover_mount;
use widget_loader::WidgetError;

use crate::common::fixtures::host_page;

mod common;

const STARS: &str = r#"<div class="cont-app-r1"><div data-rating="star" id="stars">
  <span data-rank="1"></span><span data-rank="2"></span><span data-rank="3"></span>
  <span data-rank="4"></span><span data-rank="5"></span>
  <input type="hidden" id="stars-value">
</div></div>"#;

const SMILEYS: &str = r#"<div data-rating="smiley">
  <span data-rank="3"></span><span data-rank="1"></span><span data-rank="2"></span>
  <input type="hidden" name="mood">
</div>"#;

fn rating(page: &HostPage) -> RatingControl {
    let controls = RatingControl::attach_all(&page.tree, page.tree.root());
    assert_eq!(controls.len(), 1);
    controls.into_iter().next().unwrap()
}

fn active_ranks(page: &HostPage, control: &RatingControl, class: &str) -> Vec<String> {
    page.tree
        .find_all(control.block, |el| el.attr("data-rank").is_some())
        .into_iter()
        .filter(|&n| page.tree.has_class(n, class))
        .map(|n| page.tree.attr(n, "data-rank").unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Rating controls
// ============================================================================

#[test]
fn star_click_lights_every_rank_up_to_choice() {
    let mut page = host_page(STARS);
    let control = rating(&page);
    assert_eq!(control.style, RatingStyle::Star);
    assert_eq!(control.max_rank(), 5);

    control.click(&mut page.tree, 3);

    assert_eq!(control.value(&page.tree), Some(3));
    assert_eq!(active_ranks(&page, &control, "active"), vec!["1", "2", "3"]);
    let events = page.tree.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].target, control.hidden);
}

#[test]
fn smiley_click_lights_only_the_chosen_face() {
    let mut page = host_page(SMILEYS);
    let control = rating(&page);
    assert_eq!(control.style, RatingStyle::Smiley);

    control.click(&mut page.tree, 2);
    assert_eq!(active_ranks(&page, &control, "active"), vec!["2"]);

    control.click(&mut page.tree, 1);
    assert_eq!(active_ranks(&page, &control, "active"), vec!["1"]);
    assert_eq!(control.value(&page.tree), Some(1));
}

#[test]
fn hover_previews_without_committing() {
    let mut page = host_page(STARS);
    let control = rating(&page);

    control.hover(&mut page.tree, 4);
    assert_eq!(active_ranks(&page, &control, "hover"), vec!["1", "2", "3", "4"]);
    assert_eq!(control.value(&page.tree), None);

    control.leave(&mut page.tree);
    assert!(active_ranks(&page, &control, "hover").is_empty());
}

#[test]
fn clicking_an_unknown_rank_is_ignored() {
    let mut page = host_page(STARS);
    let control = rating(&page);
    control.click(&mut page.tree, 9);
    assert_eq!(control.value(&page.tree), None);
    assert!(page.tree.drain_events().is_empty());
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn first_mount_in_document_order_wins() {
    let page = host_page(r#"<div class="box cont-app-first"></div><div class="cont-app-second"></div>"#);
    let mount = discover_mount(&page, "cont-app-").unwrap();
    assert_eq!(mount.id.0, "first");
    assert_eq!(mount.class_token, "cont-app-first");
}

#[test]
fn discovery_never_mutates_the_page() {
    let page = host_page(r#"<div class="cont-app-"></div>"#);
    let before = page.to_html();
    let err = discover_mount(&page, "cont-app-").unwrap_err();
    assert!(matches!(err, WidgetError::EmptyIdentifier { .. }));
    assert_eq!(page.to_html(), before);
}

#[test]
fn teardown_cancels_the_mount() {
    let mut page = host_page(r#"<div class="cont-app-x"></div>"#);
    let mount = discover_mount(&page, "cont-app-").unwrap();
    assert!(mount.ensure_live(&page).is_ok());

    mount.teardown(&mut page);
    assert!(mount.token.is_cancelled());
    assert!(matches!(mount.ensure_live(&page), Err(WidgetError::MountDetached)));
    assert!(!page.to_html().contains("cont-app-x"));
}
