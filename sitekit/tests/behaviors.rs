mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use sitekit::clipboard::{Clipboard, ClipboardError};
use sitekit::prelude::*;

fn site() -> Document {
    Document::new(
        Element::body()
            .child(
                Element::new("nav")
                    .child(
                        Element::div()
                            .id("hamburger")
                            .class("hamburger")
                            .child(Element::new("span").id("bar")),
                    )
                    .child(
                        Element::new("ul")
                            .id("links")
                            .class("nav-links")
                            .child(Element::new("li").child(Element::anchor("#services").id("to-services")))
                            .child(Element::new("li").child(Element::anchor("#missing").id("to-missing")))
                            .child(Element::new("li").child(Element::anchor("/news").id("to-news"))),
                    ),
            )
            .child(Element::new("section").id("hero").class("hero"))
            .child(
                Element::new("section")
                    .id("services")
                    .child(Element::div().id("card-1").class("service-card"))
                    .child(Element::div().id("card-2").class("news-card"))
                    .child(Element::div().id("plain").class("card")),
            )
            .child(
                Element::img()
                    .id("photo")
                    .class("lazy")
                    .data("src", "/media/team.jpg"),
            )
            .child(Element::new("span").id("stat").child(Element::text("0")))
            .child(
                Element::div()
                    .id("video-modal")
                    .class("modal")
                    .child(Element::div().id("modal-content").class("modal-content")),
            )
            .child(Element::button("Top").id("top").class("scroll-to-top")),
    )
}

fn style<'a>(page: &'a Page, id: &str, property: &str) -> Option<&'a str> {
    page.document().get(id).unwrap().get_style(property)
}

fn classes(page: &Page, id: &str) -> Vec<String> {
    page.document().get(id).unwrap().classes.clone()
}

// ============================================================================
// Menu
// ============================================================================

#[test]
fn test_hamburger_toggles_menu() {
    let mut page = load(site());

    page.click_on("bar");
    assert!(page.is_menu_open());
    assert!(classes(&page, "hamburger").contains(&"active".to_string()));

    page.click_on("hamburger");
    assert!(!page.is_menu_open());
    assert!(!classes(&page, "hamburger").contains(&"active".to_string()));
}

#[test]
fn test_menu_link_closes_menu() {
    let mut page = load(site());
    assert!(page.toggle_menu());

    page.click_on("to-news");
    assert!(!page.is_menu_open());

    page.close_menu();
    assert!(!page.is_menu_open());
}

#[test]
fn test_menu_absent_is_noop() {
    let mut page = load(contact_page());
    assert!(!page.toggle_menu());
    page.close_menu();
}

// ============================================================================
// Anchors
// ============================================================================

#[test]
fn test_anchor_click_scrolls_smoothly() {
    let mut page = load(site());
    let dispatch = page.click_on("to-services");

    assert!(dispatch.default_prevented);
    assert_eq!(
        page.take_effects(),
        vec![Effect::ScrollIntoView {
            id: "services".to_string(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }]
    );
    assert!(!page.is_menu_open());
}

#[test]
fn test_anchor_to_missing_section_only_prevents_default() {
    let mut page = load(site());
    assert!(page.click_on("to-missing").default_prevented);
    assert!(page.take_effects().is_empty());
}

#[test]
fn test_regular_link_keeps_default() {
    let mut page = load(site());
    assert!(!page.click_on("to-news").default_prevented);
    assert!(page.take_effects().is_empty());
}

// ============================================================================
// Reveal and lazy images
// ============================================================================

#[test]
fn test_observed_elements() {
    let page = load(site());
    let observed = page.observed_elements();
    assert_eq!(observed, vec!["card-1", "card-2", "photo"]);
}

#[test]
fn test_cards_animate_past_threshold() {
    let mut page = load(site());

    page.dispatch(Event::Intersect {
        target: "card-1".to_string(),
        ratio: 0.05,
    });
    assert_eq!(style(&page, "card-1", "animation"), None);

    page.dispatch(Event::Intersect {
        target: "card-1".to_string(),
        ratio: 0.1,
    });
    assert_eq!(
        style(&page, "card-1", "animation"),
        Some("fadeInUp 1s ease forwards")
    );

    page.dispatch(Event::Intersect {
        target: "plain".to_string(),
        ratio: 1.0,
    });
    assert_eq!(style(&page, "plain", "animation"), None);
}

#[test]
fn test_lazy_image_loads_once() {
    let mut page = load(site());

    page.dispatch(Event::Intersect {
        target: "photo".to_string(),
        ratio: 0.0,
    });
    assert_eq!(page.document().get("photo").unwrap().get_attr("src"), None);

    page.dispatch(Event::Intersect {
        target: "photo".to_string(),
        ratio: 0.01,
    });
    let photo = page.document().get("photo").unwrap();
    assert_eq!(photo.get_attr("src"), Some("/media/team.jpg"));
    assert!(!photo.has_class("lazy"));
    assert!(!page.observed_elements().contains(&"photo".to_string()));
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_parallax_moves_hero() {
    let mut page = load(site());
    page.dispatch(Event::Scroll { offset_y: 200.0 });
    assert_eq!(style(&page, "hero", "transform"), Some("translateY(-100px)"));

    page.dispatch(Event::Scroll { offset_y: 101.0 });
    assert_eq!(style(&page, "hero", "transform"), Some("translateY(-50.5px)"));

    page.dispatch(Event::Scroll { offset_y: 0.0 });
    assert_eq!(style(&page, "hero", "transform"), Some("translateY(0px)"));
}

#[test]
fn test_scroll_to_top_button_visibility() {
    let mut page = load(site());

    page.dispatch(Event::Scroll { offset_y: 300.0 });
    assert_eq!(style(&page, "top", "display"), Some("none"));

    page.dispatch(Event::Scroll { offset_y: 301.0 });
    assert_eq!(style(&page, "top", "display"), Some("block"));
}

#[test]
fn test_scroll_to_top_click() {
    let mut page = load(site());
    page.click_on("top");
    page.scroll_to_top();

    let expected = Effect::ScrollTo {
        top: 0.0,
        behavior: ScrollBehavior::Smooth,
    };
    assert_eq!(page.take_effects(), vec![expected.clone(), expected]);
}

// ============================================================================
// Dark mode
// ============================================================================

#[test]
fn test_dark_mode_persists_across_loads() {
    let settings = SettingsProvider::in_memory();
    let services = Services::default().with_settings(settings.clone());

    let mut page = Page::load(site(), SiteConfig::default(), services.clone());
    assert!(!page.is_dark_mode());
    assert!(page.toggle_dark_mode());
    assert_eq!(settings.get_raw("darkMode").unwrap().as_deref(), Some("true"));

    let mut reloaded = Page::load(site(), SiteConfig::default(), services);
    assert!(reloaded.is_dark_mode());

    assert!(!reloaded.toggle_dark_mode());
    assert_eq!(settings.get_raw("darkMode").unwrap().as_deref(), Some("false"));
}

#[test]
fn test_dark_mode_ignores_other_stored_values() {
    let settings = SettingsProvider::in_memory();
    settings.set("darkMode", &"yes").unwrap();

    let page = Page::load(
        site(),
        SiteConfig::default(),
        Services::default().with_settings(settings),
    );
    assert!(!page.is_dark_mode());
}

// ============================================================================
// Modals
// ============================================================================

#[test]
fn test_modal_open_close() {
    let mut page = load(site());

    assert!(page.open_modal("video-modal"));
    assert_eq!(style(&page, "video-modal", "display"), Some("block"));
    assert_eq!(page.document().body().get_style("overflow"), Some("hidden"));

    assert!(page.close_modal("video-modal"));
    assert_eq!(style(&page, "video-modal", "display"), Some("none"));
    assert_eq!(page.document().body().get_style("overflow"), Some("auto"));

    assert!(!page.open_modal("nope"));
}

#[test]
fn test_backdrop_click_closes_modal() {
    let mut page = load(site());
    page.open_modal("video-modal");

    page.click_on("modal-content");
    assert_eq!(style(&page, "video-modal", "display"), Some("block"));

    page.click_on("video-modal");
    assert_eq!(style(&page, "video-modal", "display"), Some("none"));
    assert_eq!(page.document().body().get_style("overflow"), Some("auto"));
}

// ============================================================================
// Counter
// ============================================================================

#[test]
fn test_counter_reaches_target() {
    let mut page = load(site());
    assert!(page.animate_counter("stat", 250.0, Some(Duration::from_millis(160))));
    assert!(page.has_animations());

    let mut guard = 0;
    while page.frame() > 0 {
        guard += 1;
        assert!(guard < 100);
    }
    assert_eq!(page.document().get("stat").unwrap().text_content(), "250");
    assert!(!page.has_animations());
}

#[test]
fn test_counter_default_duration() {
    let mut page = load(site());
    page.animate_counter("stat", 125.0, None);

    // 2000ms / 16ms = 125 frames of 1.
    assert_eq!(page.document().get("stat").unwrap().text_content(), "1");
    page.frame();
    assert_eq!(page.document().get("stat").unwrap().text_content(), "2");
}

// ============================================================================
// Clipboard
// ============================================================================

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Denied("no permission".to_string()))
    }
}

#[test]
fn test_copy_to_clipboard_confirms() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let services = Services::default().with_clipboard(clipboard.clone());
    let mut page = Page::load(site(), SiteConfig::default(), services);

    assert!(page.copy_to_clipboard("contact@azigroup.com"));
    assert_eq!(clipboard.contents().as_deref(), Some("contact@azigroup.com"));
    assert_eq!(
        visible_flashes(&page),
        vec![("Text copied to clipboard!".to_string(), Severity::Success)]
    );
}

#[test]
fn test_copy_failure_flashes_error() {
    let services = Services::default().with_clipboard(Arc::new(BrokenClipboard));
    let mut page = Page::load(site(), SiteConfig::default(), services);

    assert!(!page.copy_to_clipboard("x"));
    assert_eq!(
        visible_flashes(&page),
        vec![("Copy failed".to_string(), Severity::Error)]
    );
}

// ============================================================================
// Date formatting
// ============================================================================

#[test]
fn test_format_date() {
    assert_eq!(format_date("2024-03-05").unwrap(), "5 mars 2024");
    assert_eq!(format_date("2024-07-14T09:30:00Z").unwrap(), "14 juillet 2024");
    assert_eq!(format_date("2024-02-29T23:30:00-02:00").unwrap(), "29 février 2024");
    assert!(matches!(format_date("05/03/2024"), Err(FormatError::InvalidDate(_))));
}
