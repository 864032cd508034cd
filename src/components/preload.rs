use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::error::BindError;

pub const HERO_IMAGE_SELECTOR: &str = "#hero img";

/// `href` for the preload hint; an image with no resolved source gets none.
pub fn preload_href(resolved_src: &str) -> Option<&str> {
    let src = resolved_src.trim();
    if src.is_empty() {
        None
    } else {
        Some(src)
    }
}

/// Runs at module start, before the document-ready handlers.
pub fn init(document: &Document) -> Result<(), BindError> {
    let image = document
        .query_selector(HERO_IMAGE_SELECTOR)?
        .ok_or_else(|| BindError::missing(HERO_IMAGE_SELECTOR))?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| BindError::WrongType(HERO_IMAGE_SELECTOR.to_string(), "HtmlImageElement"))?;

    let src = image.src();
    let Some(href) = preload_href(&src) else {
        return Ok(());
    };
    let head = document.head().ok_or_else(|| BindError::missing("head"))?;

    let link = document.create_element("link")?;
    link.set_attribute("rel", "preload")?;
    link.set_attribute("as", "image")?;
    link.set_attribute("href", href)?;
    head.append_child(&link)?;

    debug!("Preloading hero image {}", href);
    Ok(())
}
