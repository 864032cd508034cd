use std::borrow::Cow;

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::error::BindError;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Element id an in-page href points at. Bare `#` points nowhere.
pub fn fragment_target(href: &str) -> Option<Cow<'_, str>> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    urlencoding::decode(fragment).ok()
}

/// Document offset that puts the target just below the fixed header.
pub fn scroll_offset(target_top: f64, scroll_y: f64, header_height: Option<f64>, fallback: f64) -> f64 {
    let header = header_height.filter(|h| *h > 0.0).unwrap_or(fallback);
    target_top + scroll_y - header
}

fn header_height(document: &Document) -> Option<f64> {
    document
        .get_element_by_id(super::header::HEADER_ID)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .map(|header| header.offset_height() as f64)
}

/// Returns whether the click was taken over; `false` leaves the browser to navigate.
fn follow(window: &Window, document: &Document, href: &str, fallback_header: f64) -> Result<bool, BindError> {
    let Some(id) = fragment_target(href) else {
        return Ok(false);
    };
    let Some(target) = document.get_element_by_id(&id) else {
        return Ok(false);
    };

    let top = scroll_offset(
        target.get_bounding_client_rect().top(),
        dom::scroll_y(window),
        header_height(document),
        fallback_header,
    );
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    // Fragment only, no extra history entry
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(href))?;
    Ok(true)
}

pub fn init(window: &Window, document: &Document, fallback_header: f64) -> Result<(), BindError> {
    let links: Vec<Element> = dom::query_all(document, ANCHOR_SELECTOR)?;

    for link in &links {
        let window = window.clone();
        let document = document.clone();
        let anchor = link.clone();
        dom::listen(link, "click", move |e| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            // Default navigation must only be cancelled once a target is known to exist
            let has_target = fragment_target(&href)
                .map(|id| document.get_element_by_id(&id).is_some())
                .unwrap_or(false);
            if !has_target {
                return;
            }
            e.prevent_default();
            if let Err(err) = follow(&window, &document, &href, fallback_header) {
                warn!("Smooth scroll to {} failed: {}", href, err);
            }
        })?;
    }

    debug!("Smooth scroll bound to {} anchors", links.len());
    Ok(())
}
