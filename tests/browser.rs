#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::js_sys::{Array, Function, Reflect};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, KeyboardEventInit,
    MouseEvent, MouseEventInit, Window,
};

use priere_landing::analytics::PageGlobals;
use priere_landing::components::{
    accordion, cookie_banner, cta_tracking, header, lazy_load, mobile_menu, preload,
    smooth_scroll, sticky_cta,
};
use priere_landing::config::PageConfig;
use priere_landing::consent::{BrowserStorage, ConsentStore};
use priere_landing::dom;
use priere_landing::error::BindError;
use priere_landing::rate_limit::{Debounce, Throttle};
use priere_landing::schedule_cookie_banner;

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(html: &str) -> Document {
    let document = dom::document().unwrap();
    document.body().unwrap().set_inner_html(html);
    document
}

fn element(document: &Document, selector: &str) -> Element {
    document.query_selector(selector).unwrap().unwrap()
}

fn click(element: &Element) {
    element.dyn_ref::<HtmlElement>().unwrap().click();
}

/// Dispatches a cancelable click and returns whether the default action survived.
fn cancelable_click(target: &EventTarget) -> bool {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn key(target: &EventTarget, key: &str) -> bool {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

/// Jumps to `y` and delivers the scroll event listeners would normally get.
fn scroll_to(window: &Window, y: f64) {
    window.scroll_to_with_x_and_y(0.0, y);
    window.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
}

fn clear_consent(key: &str) {
    dom::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .remove_item(key)
        .unwrap();
}

fn display(element: &Element) -> String {
    element
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("display")
        .unwrap()
}

const STICKY_PAGE: &str = r#"<section id="hero" style="height: 100px"></section>
    <div id="sticky-cta">Je commence</div>
    <div style="height: 6000px"></div>
    <footer style="height: 200px"></footer>"#;

#[wasm_bindgen_test]
fn mobile_menu_opens_and_closes_on_escape() {
    let document = fixture(
        r##"<button id="mobile-menu-btn" aria-expanded="false">Menu</button>
           <nav id="mobile-menu" class="hidden"><a href="#programme">Programme</a></nav>"##,
    );
    mobile_menu::init(&document).unwrap();
    let button = element(&document, "#mobile-menu-btn");
    let menu = element(&document, "#mobile-menu");
    let body = document.body().unwrap();

    click(&button);
    assert!(!menu.class_list().contains("hidden"));
    assert_eq!(button.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert!(body.class_list().contains("no-scroll"));

    key(&document, "Escape");
    assert!(menu.class_list().contains("hidden"));
    assert_eq!(button.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert!(!body.class_list().contains("no-scroll"));

    // Already closed: nothing changes
    key(&document, "Escape");
    assert!(menu.class_list().contains("hidden"));
    assert_eq!(button.get_attribute("aria-expanded").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn mobile_menu_closes_when_a_link_is_followed() {
    let document = fixture(
        r##"<button id="mobile-menu-btn">Menu</button>
           <nav id="mobile-menu" class="hidden"><a id="menu-link" href="#faq">FAQ</a></nav>"##,
    );
    mobile_menu::init(&document).unwrap();
    click(&element(&document, "#mobile-menu-btn"));
    click(&element(&document, "#menu-link"));
    assert!(element(&document, "#mobile-menu").class_list().contains("hidden"));
    document.body().unwrap().class_list().remove_1("no-scroll").unwrap();
}

#[wasm_bindgen_test]
fn mobile_menu_without_markup_is_skipped() {
    let document = fixture("<p>no menu here</p>");
    let err = mobile_menu::init(&document).unwrap_err();
    assert!(err.is_missing_markup());
}

#[wasm_bindgen_test]
fn faq_accordion_keeps_one_item_open() {
    let document = fixture(
        r#"<div class="faq-item"><button class="faq-question">A</button><div class="faq-answer hidden">a</div></div>
           <div class="faq-item"><button class="faq-question">B</button><div class="faq-answer hidden">b</div></div>
           <div class="faq-item"><button class="faq-question">C</button><div class="faq-answer hidden">c</div></div>"#,
    );
    accordion::init(&document, accordion::FAQ).unwrap();
    let items = dom::query_all(&document, ".faq-item").unwrap();
    let questions = dom::query_all(&document, ".faq-question").unwrap();
    let open = || {
        items
            .iter()
            .filter(|i| i.class_list().contains("active"))
            .count()
    };

    click(&questions[0]);
    assert!(items[0].class_list().contains("active"));
    assert_eq!(open(), 1);

    click(&questions[2]);
    assert!(items[2].class_list().contains("active"));
    assert!(!items[0].class_list().contains("active"));
    let answer = element(&document, ".faq-item:nth-child(1) .faq-answer");
    assert!(answer.class_list().contains("hidden"));
    assert_eq!(open(), 1);

    click(&questions[2]);
    assert_eq!(open(), 0);
}

#[wasm_bindgen_test]
fn week_header_responds_to_enter_and_space() {
    let document = fixture(
        r#"<div class="week-accordion"><div class="week-header" tabindex="0">Semaine 1</div><div class="week-content hidden"></div></div>
           <div class="week-accordion"><div class="week-header" tabindex="0">Semaine 2</div><div class="week-content hidden"></div></div>"#,
    );
    accordion::init(&document, accordion::WEEKS).unwrap();
    let headers = dom::query_all(&document, ".week-header").unwrap();
    let items = dom::query_all(&document, ".week-accordion").unwrap();

    let not_prevented = key(&headers[1], "Enter");
    assert!(!not_prevented);
    assert!(items[1].class_list().contains("active"));

    let not_prevented = key(&headers[0], " ");
    assert!(!not_prevented);
    assert!(items[0].class_list().contains("active"));
    assert!(!items[1].class_list().contains("active"));

    // Other keys keep their default behavior
    assert!(key(&headers[0], "Tab"));
}

#[wasm_bindgen_test]
fn smooth_scroll_takes_over_links_to_existing_targets() {
    let document = fixture(
        r##"<a id="to-target" href="#temoignages">Témoignages</a>
           <a id="to-nowhere" href="#absent">Nowhere</a>
           <a id="to-top" href="#">Top</a>
           <section id="temoignages" style="margin-top: 1500px; height: 200px"></section>"##,
    );
    let window = dom::window().unwrap();
    smooth_scroll::init(&window, &document, 80.0).unwrap();

    assert!(!cancelable_click(&element(&document, "#to-target")));
    assert_eq!(window.location().hash().unwrap(), "#temoignages");

    assert!(cancelable_click(&element(&document, "#to-nowhere")));
    assert!(cancelable_click(&element(&document, "#to-top")));
}

#[wasm_bindgen_test]
async fn cookie_banner_is_shown_once_and_remembered() {
    let config = PageConfig::default();
    let window = dom::window().unwrap();
    window
        .local_storage()
        .unwrap()
        .unwrap()
        .remove_item(&config.consent_key)
        .unwrap();
    let document = fixture("<main></main>");
    let store = Rc::new(BrowserStorage::local().unwrap());

    let shown = cookie_banner::init(&document, store.clone(), &config.consent_key, &config.privacy_policy_href).unwrap();
    assert!(shown);
    let again = cookie_banner::init(&document, store.clone(), &config.consent_key, &config.privacy_policy_href).unwrap();
    assert!(!again);
    assert_eq!(document.query_selector_all(".cookie-banner").unwrap().length(), 1);

    // Let yew render into the host
    TimeoutFuture::new(20).await;
    click(&element(&document, "#accept-cookies"));

    assert_eq!(store.get(&config.consent_key).as_deref(), Some("true"));
    assert_eq!(document.query_selector_all(".cookie-banner").unwrap().length(), 0);

    let after_reload = cookie_banner::init(&document, store, &config.consent_key, &config.privacy_policy_href).unwrap();
    assert!(!after_reload);
    assert_eq!(document.query_selector_all(".cookie-banner").unwrap().length(), 0);
}

#[wasm_bindgen_test]
fn preload_hint_points_at_the_hero_image() {
    let document = fixture(r#"<section id="hero"><img src="/img/hero-priere.webp" alt=""></section>"#);
    preload::init(&document).unwrap();
    let link = element(&document, "head link[rel=\"preload\"][as=\"image\"]");
    let href = link.get_attribute("href").unwrap();
    assert!(href.ends_with("/img/hero-priere.webp"));
    link.remove();
}

#[wasm_bindgen_test]
fn preload_without_hero_image_is_skipped() {
    let document = fixture(r#"<section id="hero"></section>"#);
    assert!(preload::init(&document).unwrap_err().is_missing_markup());
}

#[wasm_bindgen_test]
fn lazy_images_get_their_deferred_source() {
    let document = fixture(
        r#"<img id="deferred" loading="lazy" data-src="/img/semaine-2.webp">
           <img id="plain" loading="lazy" src="/img/semaine-3.webp">"#,
    );
    let window = dom::window().unwrap();
    lazy_load::init(&window, &document, &PageConfig::default().lazysizes_src).unwrap();
    assert_eq!(
        element(&document, "#deferred").get_attribute("src").as_deref(),
        Some("/img/semaine-2.webp")
    );
    assert_eq!(
        element(&document, "#plain").get_attribute("src").as_deref(),
        Some("/img/semaine-3.webp")
    );
}

#[wasm_bindgen_test]
fn cta_clicks_reach_gtag_and_tolerate_missing_pixel() {
    let window = dom::window().unwrap();
    let recorder = Function::new_with_args(
        "command, name, params",
        "window.__ctaCalls = (window.__ctaCalls || []).concat([[command, name, params]]);",
    );
    Reflect::set(&window, &"gtag".into(), &recorder).unwrap();
    Reflect::delete_property(&window, &"fbq".into()).unwrap();

    let document = fixture(r#"<button class="offer-cta">  Je rejoins le parcours  </button>"#);
    cta_tracking::init(
        &window,
        &document,
        Rc::new(PageGlobals::new(window.clone())),
        &PageConfig::default().checkout,
    )
    .unwrap();
    click(&element(&document, ".offer-cta"));

    let calls: Array = Reflect::get(&window, &"__ctaCalls".into()).unwrap().dyn_into().unwrap();
    assert_eq!(calls.length(), 1);
    let call: Array = calls.get(0).dyn_into().unwrap();
    assert_eq!(call.get(0).as_string().as_deref(), Some("event"));
    assert_eq!(call.get(1).as_string().as_deref(), Some("cta_click"));
    let name = Reflect::get(&call.get(2), &"cta_name".into()).unwrap();
    assert_eq!(name.as_string().as_deref(), Some("Je rejoins le parcours"));

    Reflect::delete_property(&window, &"gtag".into()).unwrap();
    Reflect::set(&window, &"__ctaCalls".into(), &JsValue::UNDEFINED).unwrap();
}

#[wasm_bindgen_test]
async fn debounce_runs_once_after_the_last_call() {
    let runs = Rc::new(Cell::new(0));
    let last = Rc::new(Cell::new(0));
    let debounce = {
        let runs = runs.clone();
        let last = last.clone();
        Debounce::new(20, move |value: u32| {
            runs.set(runs.get() + 1);
            last.set(value);
        })
    };
    debounce.call(1);
    debounce.call(2);
    debounce.call(3);
    assert_eq!(runs.get(), 0);

    TimeoutFuture::new(80).await;
    assert_eq!(runs.get(), 1);
    assert_eq!(last.get(), 3);
}

#[wasm_bindgen_test]
async fn throttle_drops_calls_inside_the_window() {
    let runs = Rc::new(Cell::new(0));
    let throttle = {
        let runs = runs.clone();
        Throttle::new(30, move |_: ()| runs.set(runs.get() + 1))
    };
    assert!(throttle.call(()));
    assert!(!throttle.call(()));
    assert_eq!(runs.get(), 1);

    TimeoutFuture::new(80).await;
    assert!(throttle.call(()));
    assert_eq!(runs.get(), 2);
}

#[wasm_bindgen_test]
fn header_shadow_follows_the_scroll_position() {
    let document = fixture(r#"<header id="header"></header><div style="height: 6000px"></div>"#);
    let window = dom::window().unwrap();
    header::init(&window, &document, 10.0).unwrap();
    let bar = element(&document, "#header");

    scroll_to(&window, 50.0);
    assert!(bar.class_list().contains(header::SCROLLED_CLASS));

    scroll_to(&window, 10.0);
    assert!(!bar.class_list().contains(header::SCROLLED_CLASS));

    scroll_to(&window, 0.0);
    assert!(!bar.class_list().contains(header::SCROLLED_CLASS));
}

#[wasm_bindgen_test]
fn sticky_cta_follows_the_scroll_window_on_narrow_viewports() {
    let document = fixture(STICKY_PAGE);
    let window = dom::window().unwrap();
    // Every real viewport is narrower than this
    let sticky = sticky_cta::init(&window, &document, 1.0e9).unwrap();
    let cta = element(&document, "#sticky-cta");
    assert!(sticky.is_eligible());
    assert_eq!(display(&cta), "");

    scroll_to(&window, 400.0);
    assert!(cta.class_list().contains(sticky_cta::VISIBLE_CLASS));

    scroll_to(&window, 0.0);
    assert!(!cta.class_list().contains(sticky_cta::VISIBLE_CLASS));
}

#[wasm_bindgen_test]
fn sticky_cta_stays_out_of_layout_on_wide_viewports() {
    let document = fixture(STICKY_PAGE);
    let window = dom::window().unwrap();
    let sticky = sticky_cta::init(&window, &document, 768.0).unwrap();
    let cta = element(&document, "#sticky-cta");

    sticky.layout_for(1280.0).unwrap();
    assert!(!sticky.is_eligible());
    assert_eq!(display(&cta), "none");

    for y in [0.0, 400.0, 1500.0] {
        scroll_to(&window, y);
        assert!(!cta.class_list().contains(sticky_cta::VISIBLE_CLASS));
    }

    // Narrowing the window brings the bar back into layout
    sticky.layout_for(375.0).unwrap();
    assert!(sticky.is_eligible());
    assert_eq!(display(&cta), "");
    scroll_to(&window, 0.0);
}

#[wasm_bindgen_test]
fn sticky_cta_resize_listener_restores_layout() {
    let document = fixture(STICKY_PAGE);
    let window = dom::window().unwrap();
    let sticky = sticky_cta::init(&window, &document, 1.0e9).unwrap();
    let cta = element(&document, "#sticky-cta");

    sticky.layout_for(2.0e9).unwrap();
    assert_eq!(display(&cta), "none");

    window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
    assert!(sticky.is_eligible());
    assert_eq!(display(&cta), "");
}

#[wasm_bindgen_test]
fn sticky_cta_without_hero_is_skipped() {
    let document = fixture(r#"<div id="sticky-cta"></div>"#);
    let window = dom::window().unwrap();
    let err = sticky_cta::init(&window, &document, 768.0).err().unwrap();
    assert!(err.is_missing_markup());
}

#[wasm_bindgen_test]
async fn cookie_banner_waits_for_the_delay() {
    let config = PageConfig {
        cookie_banner_delay_ms: 40,
        ..PageConfig::default()
    };
    clear_consent(&config.consent_key);
    let document = fixture("<main></main>");

    schedule_cookie_banner(document.clone(), Rc::new(config));
    assert_eq!(document.query_selector_all(".cookie-banner").unwrap().length(), 0);

    TimeoutFuture::new(10).await;
    assert_eq!(document.query_selector_all(".cookie-banner").unwrap().length(), 0);

    TimeoutFuture::new(150).await;
    assert_eq!(document.query_selector_all(".cookie-banner").unwrap().length(), 1);

    element(&document, ".cookie-banner").remove();
}

#[wasm_bindgen_test]
fn class_write_failures_are_reported() {
    let document = fixture(r#"<div id="target"></div>"#);
    let target = element(&document, "#target");
    // DOMTokenList rejects the empty token
    let err = dom::set_class(&target, "", true).unwrap_err();
    assert!(matches!(err, BindError::Js(_)));
    assert!(dom::set_class(&target, "active", true).is_ok());
}

#[wasm_bindgen_test]
fn config_block_after_the_module_is_still_read() {
    let document = fixture(
        r#"<main></main>
           <script type="application/json" id="landing-config">{ "cookie_banner_delay_ms": 10, "scroll_progress": true }</script>"#,
    );
    let config = PageConfig::from_document(&document);
    assert_eq!(config.cookie_banner_delay_ms, 10);
    assert!(config.scroll_progress);
    assert_eq!(config.consent_key, "cookieConsent");
}

#[wasm_bindgen_test]
fn malformed_config_block_falls_back_to_defaults() {
    let document = fixture(r#"<script type="application/json" id="landing-config">{ nope</script>"#);
    assert_eq!(PageConfig::from_document(&document), PageConfig::default());
}
